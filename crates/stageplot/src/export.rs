//! Diagram exporters.
//!
//! - [`svg::SvgExporter`] renders a standalone SVG image; each stage box
//!   carries a native `<title>` tooltip.
//! - [`html::HtmlExporter`] renders a self-contained HTML page embedding the
//!   SVG and showing each box's tooltip table on mouse-over.

pub mod html;
pub mod svg;

use std::{fmt, str::FromStr};

use crate::{StageplotError, diagram::Diagram};

/// Renders a [`Diagram`] to a textual artifact.
pub trait Exporter {
    /// # Errors
    ///
    /// Returns [`StageplotError::Export`] if the output cannot be rendered.
    fn export(&self, diagram: &Diagram) -> Result<String, StageplotError>;
}

/// Output formats supported by the exporters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    Html,
}

impl OutputFormat {
    /// Infers the format from a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            other => Err(format!("unsupported output format `{other}`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => f.write_str("svg"),
            Self::Html => f.write_str("html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension("HTML"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_extension("htm"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_extension("png"), None);
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Svg, OutputFormat::Html] {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }
}
