//! The diagram value produced by [`DiagramBuilder`](crate::DiagramBuilder).
//!
//! All coordinates are plot coordinates with `y` increasing upward (see
//! [`stageplot_core::geometry`]). A [`Diagram`] is plain data: exporters
//! in [`crate::export`] turn it into SVG or HTML.

use stageplot_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    stage::StageKind,
};

use crate::tooltip::Tooltip;

/// A positioned, colored stage box with its hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    name: String,
    kind: StageKind,
    bounds: Bounds,
    fill: Color,
    label: Point,
    tooltip: Tooltip,
}

impl LayoutBox {
    pub(crate) fn new(
        name: String,
        kind: StageKind,
        bounds: Bounds,
        fill: Color,
        label: Point,
        tooltip: Tooltip,
    ) -> Self {
        Self {
            name,
            kind,
            bounds,
            fill,
            label,
            tooltip,
        }
    }

    /// The stage identifier shown inside the box.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn top(&self) -> f32 {
        self.bounds.max_y()
    }

    pub fn bottom(&self) -> f32 {
        self.bounds.min_y()
    }

    pub fn left(&self) -> f32 {
        self.bounds.min_x()
    }

    pub fn right(&self) -> f32 {
        self.bounds.max_x()
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Anchor of the stage label, at the lower-left inside the box.
    pub fn label(&self) -> Point {
        self.label
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

/// A downward connector between two consecutive boxes.
///
/// The first stage has no predecessor; its connector is kept as an
/// off-canvas degenerate arrow so that boxes and arrows pair up by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorArrow {
    start: Point,
    end: Point,
}

impl ConnectorArrow {
    /// Coordinate of both endpoints of the degenerate first connector.
    pub const OFF_CANVAS: f32 = -100.0;

    pub(crate) fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub(crate) fn off_canvas() -> Self {
        let point = Point::new(Self::OFF_CANVAS, Self::OFF_CANVAS);
        Self::new(point, point)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns true for the off-canvas placeholder, which is never drawn.
    pub fn is_degenerate(&self) -> bool {
        let sentinel = Point::new(Self::OFF_CANVAS, Self::OFF_CANVAS);
        self.start == sentinel && self.end == sentinel
    }
}

/// A legend swatch for one stage kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    kind: StageKind,
    fill: Color,
    bounds: Bounds,
    label: Point,
}

impl LegendEntry {
    pub(crate) fn new(kind: StageKind, fill: Color, bounds: Bounds, label: Point) -> Self {
        Self {
            kind,
            fill,
            bounds,
            label,
        }
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> Point {
        self.label
    }
}

/// A laid-out pipeline diagram.
///
/// `boxes` and `arrows` have one entry per input stage, in input order.
/// `legend` always lists every [`StageKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    canvas: Size,
    boxes: Vec<LayoutBox>,
    arrows: Vec<ConnectorArrow>,
    legend: Vec<LegendEntry>,
}

impl Diagram {
    pub(crate) fn new(
        canvas: Size,
        boxes: Vec<LayoutBox>,
        arrows: Vec<ConnectorArrow>,
        legend: Vec<LegendEntry>,
    ) -> Self {
        Self {
            canvas,
            boxes,
            arrows,
            legend,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    pub fn arrows(&self) -> &[ConnectorArrow] {
        &self.arrows
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Number of stages in the diagram.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_off_canvas_arrow_is_degenerate() {
        assert!(ConnectorArrow::off_canvas().is_degenerate());

        let point = Point::new(200.0, 150.0);
        assert!(!ConnectorArrow::new(point, point).is_degenerate());

        let half_off = ConnectorArrow::new(
            Point::new(ConnectorArrow::OFF_CANVAS, ConnectorArrow::OFF_CANVAS),
            point,
        );
        assert!(!half_off.is_degenerate());
    }
}
