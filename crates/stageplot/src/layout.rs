//! Vertical stack layout.
//!
//! Every position is a pure function of the stage count, the plot width and
//! the fixed dimensions from [`LayoutConfig`]. Boxes are stacked from the
//! top of the canvas downward in input order, so the first stage has the
//! highest `top`. Legend swatches sit in the upper-right corner above the
//! first box.

use stageplot_core::geometry::{Bounds, Point, Size};

use crate::{config::LayoutConfig, diagram::ConnectorArrow};

/// Gap between the top of the canvas and the top of the first stage box.
const FIRST_BOX_TOP_MARGIN: f32 = 200.0;

/// Gap between the top of the canvas and the top of the first legend swatch.
const LEGEND_TOP_MARGIN: f32 = 20.0;

/// Vertical gap between legend swatches.
const LEGEND_SPACING: f32 = 5.0;

/// Gap between the right edge of the canvas and the legend swatches.
const LEGEND_RIGHT_MARGIN: f32 = 20.0;
const LEGEND_WIDTH: f32 = 100.0;

/// Offset of a label anchor from the lower-left corner of its box.
const LABEL_OFFSET: f32 = 5.0;

/// Derived canvas and box dimensions for one diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    canvas: Size,
    box_width: f32,
    box_height: f32,
    arrow_length: f32,
    left: f32,
}

impl StackLayout {
    /// Derives the dimensions for `stage_count` stages on a plot of `plot_width`.
    ///
    /// The box width is half the plot width, rounded down; the canvas is
    /// exactly two boxes wide and grows by one box plus one connector per
    /// stage.
    pub fn new(config: &LayoutConfig, plot_width: u32, stage_count: usize) -> Self {
        let box_width = (plot_width / 2) as f32;
        let box_height = config.box_height() as f32;
        let arrow_length = config.arrow_length() as f32;
        let height = config.base_height() as f32 + stage_count as f32 * (box_height + arrow_length);

        Self {
            canvas: Size::new(2.0 * box_width, height),
            box_width,
            box_height,
            arrow_length,
            left: box_width / 3.0,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    fn stage_bottom(&self, index: usize) -> f32 {
        let first_bottom = self.canvas.height() - self.box_height - FIRST_BOX_TOP_MARGIN;
        first_bottom - index as f32 * (self.box_height + self.arrow_length)
    }

    /// Bounds of the box for the stage at `index`.
    pub fn stage_bounds(&self, index: usize) -> Bounds {
        let bottom = self.stage_bottom(index);
        Bounds::from_edges(
            self.left,
            bottom,
            self.left + self.box_width,
            bottom + self.box_height,
        )
    }

    /// Connector ending at the top of the box for the stage at `index`.
    ///
    /// The arrow runs down the horizontal middle of the boxes, from the
    /// bottom edge of the previous box. Index 0 yields the off-canvas
    /// placeholder.
    pub fn connector(&self, index: usize) -> ConnectorArrow {
        if index == 0 {
            return ConnectorArrow::off_canvas();
        }

        let x = self.left + self.box_width / 2.0;
        let top = self.stage_bottom(index) + self.box_height;
        ConnectorArrow::new(Point::new(x, top + self.arrow_length), Point::new(x, top))
    }

    /// Bounds of the legend swatch at `index`.
    ///
    /// Swatches are right-aligned with a fixed margin. On canvases too
    /// narrow for the full swatch and margin, the swatch starts at the left
    /// edge and is cut to the canvas width.
    pub fn legend_bounds(&self, index: usize) -> Bounds {
        let first_bottom = self.canvas.height() - self.box_height - LEGEND_TOP_MARGIN;
        let bottom = first_bottom - index as f32 * (self.box_height + LEGEND_SPACING);
        let left = (self.canvas.width() - LEGEND_RIGHT_MARGIN - LEGEND_WIDTH).max(0.0);
        let right = (left + LEGEND_WIDTH).min(self.canvas.width());
        Bounds::from_edges(left, bottom, right, bottom + self.box_height)
    }
}

/// Anchor for a label drawn inside `bounds`.
pub fn label_anchor(bounds: Bounds) -> Point {
    Point::new(bounds.min_x() + LABEL_OFFSET, bounds.min_y() + LABEL_OFFSET)
}
