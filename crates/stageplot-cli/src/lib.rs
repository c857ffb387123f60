//! CLI logic for the stageplot diagram tool.
//!
//! Reads a pipeline file, lays it out and writes the diagram as SVG or as a
//! standalone HTML page.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{fs, path::Path};

use log::{debug, info};

use stageplot::{
    DiagramBuilder, OutputFormat, StageplotError,
    export::{Exporter, html::HtmlExporter},
};

/// Run the stageplot CLI application
///
/// This function processes the input pipeline file and writes the rendered
/// diagram to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StageplotError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Pipeline file parsing errors
/// - Stage classification errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), StageplotError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing pipeline"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(width) = args.width {
        app_config = app_config.with_plot_width(width);
    }

    let format = output_format(args)?;
    debug!(format:% = format; "Output format selected");

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let pipeline = builder.parse(&source)?;
    let diagram = builder.build(pipeline.stages())?;

    let output = match (format, pipeline.name()) {
        (OutputFormat::Html, Some(name)) => {
            HtmlExporter::new(builder.config().style())?
                .with_title(name)
                .export(&diagram)?
        }
        _ => builder.render(&diagram, format)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}

/// Resolves the output format from the explicit flag or the output file extension.
fn output_format(args: &Args) -> Result<OutputFormat, StageplotError> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }

    let extension = Path::new(&args.output)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    OutputFormat::from_extension(extension).ok_or_else(|| {
        StageplotError::Config(format!(
            "cannot infer output format from `{}`; use --format",
            args.output
        ))
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_output_format_from_extension() {
        let args = Args::parse_from(["stageplot", "p.toml", "-o", "plot.html"]);
        assert_eq!(output_format(&args).unwrap(), OutputFormat::Html);

        let args = Args::parse_from(["stageplot", "p.toml"]);
        assert_eq!(output_format(&args).unwrap(), OutputFormat::Svg);
    }

    #[test]
    fn test_explicit_format_wins() {
        let args = Args::parse_from(["stageplot", "p.toml", "-o", "plot.out", "-f", "html"]);
        assert_eq!(output_format(&args).unwrap(), OutputFormat::Html);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let args = Args::parse_from(["stageplot", "p.toml", "-o", "plot.png"]);
        assert!(matches!(output_format(&args), Err(StageplotError::Config(_))));
    }
}
