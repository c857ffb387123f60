//! Error types for stageplot operations.
//!
//! This module provides the main error type [`StageplotError`]. Failures to
//! read a single parameter value are not errors at this level: they are
//! recovered during tooltip rendering (see
//! [`ParamReadError`](stageplot_core::stage::ParamReadError)).

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for stageplot operations.
#[derive(Debug, Error)]
pub enum StageplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The pipeline file is not valid.
    ///
    /// Carries the source text and, when known, the byte span of the
    /// offending input so it can be reported with context.
    #[error("Invalid pipeline file: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    /// A stage satisfies none of the recognized stage kinds.
    #[error("Stage `{stage}` is not a pipeline, pipeline model, estimator or transformer")]
    Classification { stage: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// An exporter failed to produce its output.
    #[error("Export error: {0}")]
    Export(String),
}

impl StageplotError {
    /// Create a new `Parse` error from a TOML deserialization error.
    pub fn new_parse_error(err: &toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }
}
