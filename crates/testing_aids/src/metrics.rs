// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, Metric, MetricData, ResourceMetrics, ScopeMetrics};
use opentelemetry_sdk::metrics::{InMemoryMetricExporter, SdkMeterProvider};

/// Test helper for collecting and asserting on `OTel` metrics.
#[derive(Debug)]
pub struct MetricTester {
    exporter: InMemoryMetricExporter,
    provider: SdkMeterProvider,
}

impl Default for MetricTester {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricTester {
    /// Creates a tester backed by a fresh in-memory exporter.
    #[must_use]
    pub fn new() -> Self {
        let in_memory = InMemoryMetricExporter::default();

        Self {
            exporter: in_memory.clone(),
            provider: SdkMeterProvider::builder().with_periodic_exporter(in_memory).build(),
        }
    }

    /// Returns the meter provider to hand to the code under test.
    #[must_use]
    pub fn meter_provider(&self) -> &SdkMeterProvider {
        &self.provider
    }

    /// Flushes the provider and returns the attributes of every exported data point.
    ///
    /// # Panics
    ///
    /// Panics if the provider cannot be flushed or the exporter has no metrics.
    #[must_use]
    pub fn collect_attributes(&self) -> Vec<KeyValue> {
        collect_attributes(&self.finished_metrics())
    }

    /// Flushes the provider and returns the names of every exported metric.
    ///
    /// # Panics
    ///
    /// Panics if the provider cannot be flushed or the exporter has no metrics.
    #[must_use]
    pub fn collect_names(&self) -> Vec<String> {
        self.finished_metrics()
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(ScopeMetrics::metrics)
            .map(|metric| metric.name().to_string())
            .collect()
    }

    /// Flushes the provider and returns how many values were recorded by the named `f64` histogram.
    ///
    /// # Panics
    ///
    /// Panics if the provider cannot be flushed or the exporter has no metrics.
    #[must_use]
    pub fn histogram_count(&self, name: &str) -> u64 {
        self.finished_metrics()
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(ScopeMetrics::metrics)
            .filter(|metric| metric.name() == name)
            .map(|metric| match metric.data() {
                AggregatedMetrics::F64(MetricData::Histogram(data)) => data.data_points().map(|point| point.count()).sum::<u64>(),
                _ => 0,
            })
            .sum()
    }

    /// Flushes the provider and returns the total of the named `u64` counter.
    ///
    /// # Panics
    ///
    /// Panics if the provider cannot be flushed or the exporter has no metrics.
    #[must_use]
    pub fn counter_total(&self, name: &str) -> u64 {
        self.finished_metrics()
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(ScopeMetrics::metrics)
            .filter(|metric| metric.name() == name)
            .map(|metric| match metric.data() {
                AggregatedMetrics::U64(MetricData::Sum(data)) => data.data_points().map(|point| point.value()).sum::<u64>(),
                _ => 0,
            })
            .sum()
    }

    // Each flush exports cumulative totals, so the exporter is reset after every read.
    fn finished_metrics(&self) -> Vec<ResourceMetrics> {
        self.provider.force_flush().unwrap();
        let metrics = self.exporter.get_finished_metrics().unwrap();
        self.exporter.reset();
        metrics
    }

    /// Asserts that every given attribute was reported by at least one data point.
    ///
    /// # Panics
    ///
    /// Panics if any attribute is missing.
    pub fn assert_attributes_contain(&self, key_values: &[KeyValue]) {
        let attributes = self.collect_attributes();

        for attr in key_values {
            assert!(
                attributes.contains(attr),
                "attribute {attr:?} not found in collected attributes: {attributes:?}"
            );
        }
    }
}

fn collect_attributes(metrics: &[ResourceMetrics]) -> Vec<KeyValue> {
    metrics
        .iter()
        .flat_map(ResourceMetrics::scope_metrics)
        .flat_map(ScopeMetrics::metrics)
        .flat_map(collect_attributes_for_metric)
        .collect()
}

fn collect_attributes_for_metric(metric: &Metric) -> Vec<KeyValue> {
    match metric.data() {
        AggregatedMetrics::F64(data) => attributes_of(data),
        AggregatedMetrics::U64(data) => attributes_of(data),
        AggregatedMetrics::I64(data) => attributes_of(data),
    }
}

fn attributes_of<T>(data: &MetricData<T>) -> Vec<KeyValue> {
    match data {
        MetricData::Gauge(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect(),
        MetricData::Sum(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect(),
        MetricData::Histogram(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect(),
        MetricData::ExponentialHistogram(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect(),
    }
}
