// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// An error raised while assembling a [`Pipeline`][crate::Pipeline].
///
/// Build errors are always reported by [`PipelineBuilder::build`][crate::PipelineBuilder::build],
/// before the first call is made. A pipeline that was built successfully never fails because
/// of its construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// No terminal handler was supplied, so the layers have nothing to wrap.
    #[error("pipeline has {layers} layer(s) but no terminal handler to wrap")]
    MissingTerminal {
        /// The number of layers that were registered.
        layers: usize,
    },
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_terminal_display_mentions_layer_count() {
        let error = BuildError::MissingTerminal { layers: 3 };

        assert_eq!(error.to_string(), "pipeline has 3 layer(s) but no terminal handler to wrap");
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(BuildError: Send, Sync, std::error::Error);
    }
}
