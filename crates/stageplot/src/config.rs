//! Configuration types for stageplot diagrams.
//!
//! All types implement [`serde::Deserialize`] and every field has a
//! documented default, so a configuration file only needs to name the
//! values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Plot width and the fixed box and arrow dimensions.
//! - [`StyleConfig`] - Background, per-kind fill colors and label font size.
//! - [`TooltipConfig`] - Hover tooltip formatting.
//!
//! # Example
//!
//! ```
//! # use stageplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().plot_width(), 800);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use stageplot_core::{color::Color, stage::StageKind};

/// Top-level configuration combining layout, style and tooltip settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Tooltip configuration section.
    #[serde(default)]
    tooltip: TooltipConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Plot width and box geometry.
    /// * `style` - Visual styling options.
    /// * `tooltip` - Tooltip formatting options.
    pub fn new(layout: LayoutConfig, style: StyleConfig, tooltip: TooltipConfig) -> Self {
        Self {
            layout,
            style,
            tooltip,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the tooltip configuration.
    pub fn tooltip(&self) -> &TooltipConfig {
        &self.tooltip
    }

    /// Returns a copy with the plot width replaced.
    pub fn with_plot_width(mut self, plot_width: u32) -> Self {
        self.layout.plot_width = plot_width;
        self
    }
}

/// Plot width and the fixed dimensions of boxes and connectors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Target canvas width. Boxes are half as wide. Default `800`.
    plot_width: u32,

    /// Height of every stage box. Default `30`.
    box_height: u32,

    /// Vertical gap between boxes, spanned by a connector. Default `20`.
    arrow_length: u32,

    /// Canvas height before any stage is added. Default `300`.
    base_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            plot_width: 800,
            box_height: 30,
            arrow_length: 20,
            base_height: 300,
        }
    }
}

impl LayoutConfig {
    pub fn new(plot_width: u32, box_height: u32, arrow_length: u32, base_height: u32) -> Self {
        Self {
            plot_width,
            box_height,
            arrow_length,
            base_height,
        }
    }

    pub fn plot_width(&self) -> u32 {
        self.plot_width
    }

    pub fn box_height(&self) -> u32 {
        self.box_height
    }

    pub fn arrow_length(&self) -> u32 {
        self.arrow_length
    }

    pub fn base_height(&self) -> u32 {
        self.base_height
    }

    /// Checks that boxes and connectors have a visible extent.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first zero dimension.
    pub fn validate(&self) -> Result<(), String> {
        if self.box_height == 0 {
            return Err("layout.box_height must be positive".to_string());
        }
        if self.arrow_length == 0 {
            return Err("layout.arrow_length must be positive".to_string());
        }
        Ok(())
    }
}

/// Visual styling of rendered diagrams.
///
/// Colors are CSS color strings. Unset fill colors fall back to the
/// built-in palette: estimators red, transformers blue, pipelines green
/// and pipeline models yellow.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas background color. Default white.
    background_color: Option<String>,

    estimator_color: Option<String>,
    transformer_color: Option<String>,
    pipeline_color: Option<String>,
    pipeline_model_color: Option<String>,

    /// Label font size in points. Default `10`.
    font_size: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            estimator_color: None,
            transformer_color: None,
            pipeline_color: None,
            pipeline_model_color: None,
            font_size: 10,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Resolves the fill color of every stage kind.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending kind if an override cannot be parsed.
    pub fn palette(&self) -> Result<Palette, String> {
        let resolve = |kind: StageKind| -> Result<Color, String> {
            let configured = match kind {
                StageKind::Estimator => &self.estimator_color,
                StageKind::Transformer => &self.transformer_color,
                StageKind::CompositePipeline => &self.pipeline_color,
                StageKind::FittedPipelineModel => &self.pipeline_model_color,
            };
            let color_str = configured
                .as_deref()
                .unwrap_or_else(|| Palette::default_fill(kind));
            Color::new(color_str).map_err(|err| format!("Invalid {kind} color in config: {err}"))
        };

        Ok(Palette {
            estimator: resolve(StageKind::Estimator)?,
            transformer: resolve(StageKind::Transformer)?,
            pipeline: resolve(StageKind::CompositePipeline)?,
            pipeline_model: resolve(StageKind::FittedPipelineModel)?,
        })
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

/// The fill color of each [`StageKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    estimator: Color,
    transformer: Color,
    pipeline: Color,
    pipeline_model: Color,
}

impl Palette {
    fn default_fill(kind: StageKind) -> &'static str {
        match kind {
            StageKind::Estimator => "#FF6969",
            StageKind::Transformer => "#26AAE1",
            StageKind::CompositePipeline => "#B3DE69",
            StageKind::FittedPipelineModel => "#FFFF69",
        }
    }

    /// Returns the fill color for a stage kind.
    pub fn fill(&self, kind: StageKind) -> Color {
        match kind {
            StageKind::Estimator => self.estimator,
            StageKind::Transformer => self.transformer,
            StageKind::CompositePipeline => self.pipeline,
            StageKind::FittedPipelineModel => self.pipeline_model,
        }
    }
}

/// Hover tooltip formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Parameter values longer than this many characters are wrapped. Default `70`.
    wrap_width: usize,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self { wrap_width: 70 }
    }
}

impl TooltipConfig {
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }
}
