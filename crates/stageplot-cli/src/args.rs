//! Command-line argument definitions for the stageplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, output format,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use stageplot::OutputFormat;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Svg,
    Html,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => OutputFormat::Svg,
            Format::Html => OutputFormat::Html,
        }
    }
}

/// Command-line arguments for the stageplot diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input pipeline file (TOML)
    #[arg(help = "Path to the input pipeline file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format; inferred from the output file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Plot width, overriding the configured value
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["stageplot", "pipeline.toml"]);

        assert_eq!(args.input, "pipeline.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.format, None);
        assert_eq!(args.width, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "stageplot",
            "pipeline.toml",
            "--output",
            "plot.html",
            "--format",
            "html",
            "--width",
            "1200",
            "--config",
            "style.toml",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.output, "plot.html");
        assert_eq!(args.format, Some(Format::Html));
        assert_eq!(args.width, Some(1200));
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(OutputFormat::from(Format::Html), OutputFormat::Html);
    }
}
