//! Error adapter for converting StageplotError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Pipeline file
//! errors keep their source text and span so the report can point at the
//! offending input.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use stageplot::StageplotError;

/// Adapter for a pipeline file parse error.
pub struct ParseAdapter<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    /// Create a new parse error adapter.
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid pipeline file: {}", self.message.trim_end())
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("stageplot::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "each [[stages]] entry needs an `id` and a `capabilities` list",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-diagnostic [`StageplotError`] variants.
///
/// This adapter handles errors that don't carry source information, such as
/// I/O, classification, configuration and export errors.
pub struct ErrorAdapter<'a>(pub &'a StageplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StageplotError::Io(_) => "stageplot::io",
            StageplotError::Parse { .. } => "stageplot::parse",
            StageplotError::Classification { .. } => "stageplot::classification",
            StageplotError::Config(_) => "stageplot::config",
            StageplotError::Export(_) => "stageplot::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            StageplotError::Classification { .. } => Some(Box::new(
                "list at least one of: composite_pipeline, fitted_pipeline_model, estimator, transformer",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with source location information.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a byte range to a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`StageplotError`] into a reportable error.
pub fn to_reportable(err: &StageplotError) -> Reportable<'_> {
    match err {
        StageplotError::Parse { message, span, src } => {
            Reportable::Parse(ParseAdapter::new(message, span.as_ref(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_has_label() {
        let err = StageplotError::Parse {
            message: "unknown variant `oracle`".to_string(),
            span: Some(4..12),
            src: "abc \"oracle\"".to_string(),
        };

        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Parse(p) => {
                assert_eq!(p.to_string(), "Invalid pipeline file: unknown variant `oracle`");
            }
            Reportable::Error(_) => panic!("Expected Parse"),
        }
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 8);
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_parse_error_without_span() {
        let err = StageplotError::Parse {
            message: "missing field `stages`".to_string(),
            span: None,
            src: String::new(),
        };

        assert!(to_reportable(&err).labels().is_none());
    }

    #[test]
    fn test_classification_error_code_and_help() {
        let err = StageplotError::Classification {
            stage: "Mystery_1".to_string(),
        };

        let reportable = to_reportable(&err);

        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "stageplot::classification"
        );
        assert!(reportable.help().is_some());
        assert!(reportable.to_string().contains("Mystery_1"));
    }

    #[test]
    fn test_config_error_code() {
        let err = StageplotError::Config("plot width must be positive".to_string());

        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "stageplot::config");
        assert!(reportable.help().is_none());
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_export_error_code() {
        let err = StageplotError::Export("template render failed".to_string());

        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "stageplot::export");
        assert!(reportable.to_string().contains("template render failed"));
    }
}
