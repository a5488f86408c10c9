// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]

//! End-to-end behavior of the standard client chain `Metrics → Retry → Auth → FlakyBackend`.

use std::sync::{Arc, Mutex};

use strata::{Execute, Handler, Pipeline};
use strata_client::auth::Auth;
use strata_client::metrics::{Metrics, Observation};
use strata_client::retry::Retry;
use strata_client::trace::Trace;
use strata_client::{AUTHORIZATION, FlakyBackend, PipelineContext, Request, Response, TRACE_ID};
use tick::Clock;

const PATH: &str = "/v1/payment/refund";

/// A fresh backend plus a record of every request that reached it.
struct Terminal {
    backend: Arc<FlakyBackend>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            backend: Arc::new(FlakyBackend::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn handler(&self) -> impl Handler<Request, Out = Response> + use<> {
        let backend = Arc::clone(&self.backend);
        let requests = Arc::clone(&self.requests);

        Execute::new(move |request: Request| {
            requests.lock().unwrap().push(request.clone());
            backend.invoke(request)
        })
    }
}

fn build_chain(terminal: &Terminal, max_attempts: u32, observations: &Arc<Mutex<Vec<Observation>>>) -> Pipeline<Request, Response> {
    let context = PipelineContext::new(Clock::new_frozen()).name("payments");
    let sink = Arc::clone(observations);

    Pipeline::builder()
        .terminal(terminal.handler())
        .layer(Auth::layer(&context))
        .layer(Retry::layer("retry", &context).max_attempts(max_attempts).unwrap())
        .layer(Metrics::layer("metrics", &context).on_observation(move |o| sink.lock().unwrap().push(o.clone())))
        .build()
        .unwrap()
}

fn refund_request() -> Request {
    Request::new(PATH, r#"{"orderId":"ORD-1001"}"#)
}

#[test]
fn scenario_a_retry_recovers_from_single_failure() {
    let terminal = Terminal::new();
    let observations = Arc::new(Mutex::new(Vec::new()));
    let pipeline = build_chain(&terminal, 2, &observations);

    let response = pipeline.invoke(refund_request());

    assert_eq!(response, Response::ok("ok"));
    assert_eq!(terminal.backend.calls(), 2);

    let observations = observations.lock().unwrap();
    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].path(), PATH);
    assert_eq!(observations[0].status(), 200);
}

#[test]
fn scenario_b_single_attempt_returns_failure() {
    let terminal = Terminal::new();
    let observations = Arc::new(Mutex::new(Vec::new()));
    let pipeline = build_chain(&terminal, 1, &observations);

    let response = pipeline.invoke(refund_request());

    assert_eq!(response, Response::new(500, "temporary_error"));
    assert_eq!(terminal.backend.calls(), 1);

    let observations = observations.lock().unwrap();
    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].status(), 500);
}

#[test]
fn scenario_c_wrapping_with_trace_keeps_inner_behavior() {
    let terminal = Terminal::new();
    let observations = Arc::new(Mutex::new(Vec::new()));
    let context = PipelineContext::new(Clock::new_frozen());
    let pipeline = build_chain(&terminal, 2, &observations).wrap(Trace::layer(&context).trace_id("trace-1001"));

    let response = pipeline.invoke(refund_request());

    assert_eq!(response, Response::ok("ok"));
    assert_eq!(terminal.backend.calls(), 2);
    assert_eq!(observations.lock().unwrap().len(), 1);

    let requests = terminal.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        assert_eq!(request.header(AUTHORIZATION), Some("Bearer demo-token"));
        assert_eq!(request.header(TRACE_ID), Some("trace-1001"));
        assert_eq!(request.path(), PATH);
        assert_eq!(request.body(), r#"{"orderId":"ORD-1001"}"#);
    }
}

#[test]
fn scenario_a_repeated_calls_reuse_the_chain() {
    let terminal = Terminal::new();
    let observations = Arc::new(Mutex::new(Vec::new()));
    let pipeline = build_chain(&terminal, 2, &observations);

    for _ in 0..3 {
        assert_eq!(pipeline.invoke(refund_request()), Response::ok("ok"));
    }

    assert_eq!(terminal.backend.calls(), 4);
    assert_eq!(observations.lock().unwrap().len(), 3);
}
