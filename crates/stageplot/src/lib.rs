//! stageplot - Diagrams of machine-learning pipeline stages.
//!
//! Lays out the stages of a pipeline as a vertical stack of color-coded
//! boxes joined by arrows, with a legend of stage kinds and a hover tooltip
//! per box listing the stage's parameters. The result is a plain
//! [`Diagram`] value that can be exported to SVG or to a standalone HTML
//! page.
//!
//! # Example
//!
//! ```
//! use stageplot::{DiagramBuilder, stage::{Capabilities, StageDescriptor}};
//!
//! let stages = vec![
//!     StageDescriptor::new("Tokenizer_1", Capabilities::transformer())
//!         .with_param("inputCol", "text"),
//!     StageDescriptor::new("LogisticRegression_2", Capabilities::estimator())
//!         .with_param("maxIter", "10"),
//! ];
//!
//! let builder = DiagramBuilder::default();
//! let diagram = builder.build(&stages).unwrap();
//! assert_eq!(diagram.boxes().len(), 2);
//! assert_eq!(diagram.canvas().height(), 400.0);
//!
//! let svg = builder.render_svg(&diagram).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod config;
pub mod diagram;
pub mod export;
pub mod layout;
pub mod pipeline;
pub mod tooltip;

mod error;

pub use stageplot_core::{color, geometry, stage};

pub use diagram::Diagram;
pub use error::StageplotError;
pub use export::OutputFormat;
pub use pipeline::Pipeline;

use log::{debug, info, trace};

use stageplot_core::stage::{PipelineStage, StageKind};

use config::AppConfig;
use diagram::{LayoutBox, LegendEntry};
use export::{Exporter, html::HtmlExporter, svg::SvgExporter};
use layout::{StackLayout, label_anchor};
use tooltip::Tooltip;

/// Margin between a tooltip and the width of the box it describes.
const TOOLTIP_MARGIN: u32 = 20;

/// Builder for laying out and rendering pipeline diagrams.
///
/// A builder only holds configuration; [`build`](Self::build) computes a
/// fresh [`Diagram`] on every call and never mutates its input.
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout, style and tooltip settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML pipeline file.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Parse`] if the source is not a valid
    /// pipeline document.
    pub fn parse(&self, source: &str) -> Result<Pipeline, StageplotError> {
        info!("Parsing pipeline");
        Pipeline::from_toml(source)
    }

    /// Lay out `stages` on a plot of the configured width.
    ///
    /// # Errors
    ///
    /// See [`build_with_width`](Self::build_with_width).
    pub fn build<S: PipelineStage>(&self, stages: &[S]) -> Result<Diagram, StageplotError> {
        self.build_with_width(stages, self.config.layout().plot_width())
    }

    /// Lay out `stages` on a plot `plot_width` units wide.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Classification`] for the first stage that
    /// satisfies no known stage kind, and [`StageplotError::Config`] for a
    /// zero width, a zero box height or arrow length, or an invalid fill
    /// color.
    ///
    /// # Examples
    ///
    /// ```
    /// use stageplot::{DiagramBuilder, stage::{Capabilities, StageDescriptor}};
    ///
    /// let stages = [StageDescriptor::new("Binarizer_1", Capabilities::transformer())];
    /// let diagram = DiagramBuilder::default().build_with_width(&stages, 1200).unwrap();
    /// assert_eq!(diagram.canvas().width(), 1200.0);
    /// ```
    pub fn build_with_width<S: PipelineStage>(
        &self,
        stages: &[S],
        plot_width: u32,
    ) -> Result<Diagram, StageplotError> {
        info!(stages_count = stages.len(), plot_width; "Building pipeline diagram");

        if plot_width == 0 {
            return Err(StageplotError::Config(
                "plot width must be positive".to_string(),
            ));
        }
        self.config
            .layout()
            .validate()
            .map_err(StageplotError::Config)?;

        let palette = self
            .config
            .style()
            .palette()
            .map_err(StageplotError::Config)?;
        let layout = StackLayout::new(self.config.layout(), plot_width, stages.len());
        debug!(
            width = layout.canvas().width(),
            height = layout.canvas().height(),
            box_width = layout.box_width();
            "Canvas dimensions derived"
        );

        let tooltip_width = (layout.box_width() as u32).saturating_sub(TOOLTIP_MARGIN);
        let wrap_width = self.config.tooltip().wrap_width();

        let mut boxes = Vec::with_capacity(stages.len());
        let mut arrows = Vec::with_capacity(stages.len());
        for (index, stage) in stages.iter().enumerate() {
            let kind = StageKind::classify(stage.capabilities()).ok_or_else(|| {
                StageplotError::Classification {
                    stage: stage.uid().to_string(),
                }
            })?;
            trace!(index, stage = stage.uid(), kind:% = kind; "Stage classified");

            let bounds = layout.stage_bounds(index);
            boxes.push(LayoutBox::new(
                stage.uid().to_string(),
                kind,
                bounds,
                palette.fill(kind),
                label_anchor(bounds),
                Tooltip::for_stage(stage, kind, wrap_width, tooltip_width),
            ));
            arrows.push(layout.connector(index));
        }

        let legend = StageKind::ALL
            .iter()
            .enumerate()
            .map(|(index, &kind)| {
                let bounds = layout.legend_bounds(index);
                LegendEntry::new(kind, palette.fill(kind), bounds, label_anchor(bounds))
            })
            .collect();

        info!(boxes_count = boxes.len(); "Pipeline diagram built");
        Ok(Diagram::new(layout.canvas(), boxes, arrows, legend))
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Config`] for an invalid background color.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, StageplotError> {
        self.render(diagram, OutputFormat::Svg)
    }

    /// Render a diagram to a standalone HTML page with hover tooltips.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Config`] for an invalid background color.
    pub fn render_html(&self, diagram: &Diagram) -> Result<String, StageplotError> {
        self.render(diagram, OutputFormat::Html)
    }

    /// Render a diagram in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Config`] for an invalid background color and
    /// [`StageplotError::Export`] if the output cannot be rendered.
    pub fn render(&self, diagram: &Diagram, format: OutputFormat) -> Result<String, StageplotError> {
        info!(format:% = format; "Rendering diagram");

        let exporter: Box<dyn Exporter> = match format {
            OutputFormat::Svg => Box::new(SvgExporter::new(self.config.style())?),
            OutputFormat::Html => Box::new(HtmlExporter::new(self.config.style())?),
        };
        let output = exporter.export(diagram)?;

        info!(bytes = output.len(); "Diagram rendered");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use stageplot_core::{
        color::Color,
        stage::{Capabilities, ParamReadError, StageDescriptor},
    };

    use super::*;

    #[test]
    fn test_builder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagramBuilder>();
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let stages = [StageDescriptor::new("Tokenizer_1", Capabilities::transformer())];

        let err = DiagramBuilder::default()
            .build_with_width(&stages, 0)
            .unwrap_err();
        assert!(matches!(err, StageplotError::Config(_)));
    }

    #[test]
    fn test_zero_box_and_arrow_dimensions_are_rejected() {
        let stages = [
            StageDescriptor::new("Tokenizer_1", Capabilities::transformer()),
            StageDescriptor::new("HashingTF_2", Capabilities::transformer()),
        ];

        for (box_height, arrow_length) in [(0, 0), (30, 0), (0, 20)] {
            let config = AppConfig::new(
                config::LayoutConfig::new(800, box_height, arrow_length, 300),
                config::StyleConfig::default(),
                config::TooltipConfig::default(),
            );

            let err = DiagramBuilder::new(config).build(&stages).unwrap_err();
            assert!(
                matches!(err, StageplotError::Config(_)),
                "box_height={box_height} arrow_length={arrow_length}"
            );
        }
    }

    #[test]
    fn test_short_arrows_are_still_drawn() {
        let config = AppConfig::new(
            config::LayoutConfig::new(800, 30, 1, 300),
            config::StyleConfig::default(),
            config::TooltipConfig::default(),
        );
        let stages = [
            StageDescriptor::new("Tokenizer_1", Capabilities::transformer()),
            StageDescriptor::new("HashingTF_2", Capabilities::transformer()),
        ];
        let builder = DiagramBuilder::new(config);

        let diagram = builder.build(&stages).unwrap();

        assert!(!diagram.arrows()[1].is_degenerate());
        assert!(diagram.boxes()[0].top() > diagram.boxes()[1].top());
        let svg = builder.render_svg(&diagram).unwrap();
        assert_eq!(svg.matches("marker-end=").count(), 1);
    }

    #[test]
    fn test_classification_error_names_stage() {
        let stages = [
            StageDescriptor::new("Tokenizer_1", Capabilities::transformer()),
            StageDescriptor::new("Mystery_2", Capabilities::default()),
        ];

        let err = DiagramBuilder::default().build(&stages).unwrap_err();
        match err {
            StageplotError::Classification { stage } => assert_eq!(stage, "Mystery_2"),
            other => panic!("Expected classification error, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_stage_sources() {
        struct Opaque;

        impl PipelineStage for Opaque {
            fn uid(&self) -> &str {
                "CustomTransformer_9"
            }

            fn capabilities(&self) -> Capabilities {
                Capabilities::transformer()
            }

            fn param_names(&self) -> Vec<&str> {
                vec!["secret"]
            }

            fn param_value(&self, name: &str) -> Result<Option<String>, ParamReadError> {
                Err(ParamReadError::new(self.uid(), name, "access denied"))
            }
        }

        let described = StageDescriptor::new("Tokenizer_1", Capabilities::transformer());
        let stages: Vec<Box<dyn PipelineStage>> = vec![Box::new(described), Box::new(Opaque)];

        let diagram = DiagramBuilder::default().build(&stages).unwrap();

        assert_eq!(diagram.boxes()[1].name(), "CustomTransformer_9");
        assert_eq!(
            diagram.boxes()[1].tooltip().value_of("secret").as_deref(),
            Some("None")
        );
    }

    #[test]
    fn test_tooltip_width_follows_box_width() {
        let stages = [StageDescriptor::new("Tokenizer_1", Capabilities::transformer())];

        let diagram = DiagramBuilder::default().build(&stages).unwrap();

        assert!(diagram.boxes()[0]
            .tooltip()
            .html()
            .starts_with("<div style=\"width:380px\">"));
    }

    #[test]
    fn test_configured_palette_is_used() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            estimator_color = "purple"
            "#,
        )
        .unwrap();
        let stages = [StageDescriptor::new("KMeans_1", Capabilities::estimator())];

        let diagram = DiagramBuilder::new(config).build(&stages).unwrap();

        assert_eq!(diagram.boxes()[0].fill(), Color::new("purple").unwrap());
        assert_eq!(diagram.legend()[0].fill(), Color::new("purple").unwrap());
    }

    #[test]
    fn test_render_formats() {
        let stages = [StageDescriptor::new("Tokenizer_1", Capabilities::transformer())];
        let builder = DiagramBuilder::default();
        let diagram = builder.build(&stages).unwrap();

        let svg = builder.render_svg(&diagram).unwrap();
        let html = builder.render_html(&diagram).unwrap();

        assert!(svg.contains("<svg"));
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
    }
}
