//! SVG rendering of pipeline diagrams.
//!
//! Diagram coordinates point up; SVG coordinates point down, so every
//! position is flipped against the canvas height before it is written.

use log::debug;
use svg::{
    Document, Node,
    node::{self, element as svg_element},
};

use stageplot_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use crate::{
    StageplotError,
    config::StyleConfig,
    diagram::{ConnectorArrow, Diagram, LayoutBox, LegendEntry},
    export::Exporter,
};

/// Size of the vee arrow-head, in canvas units.
const ARROW_HEAD_SIZE: f32 = 15.0;

const FONT_FAMILY: &str = "arial, sans-serif";

/// Renders diagrams to SVG documents.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Color,
    stroke: Color,
    font_size: u32,
    titles: bool,
}

impl SvgExporter {
    /// Creates an exporter styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Config`] if the background color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, StageplotError> {
        let background = style
            .background_color()
            .map_err(StageplotError::Config)?
            .map_or_else(
                || Color::new("white").map_err(StageplotError::Config),
                Ok,
            )?;

        Ok(Self {
            background,
            stroke: Color::default(),
            font_size: style.font_size(),
            titles: true,
        })
    }

    /// Enables or disables the native `<title>` tooltip on stage boxes.
    pub fn with_titles(mut self, titles: bool) -> Self {
        self.titles = titles;
        self
    }

    /// Builds the SVG document for a diagram.
    pub fn render_document(&self, diagram: &Diagram) -> Document {
        let width = diagram.canvas().width();
        let height = diagram.canvas().height();
        debug!(width, height; "Rendering SVG document");

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", self.background);

        let legend = diagram
            .legend()
            .iter()
            .fold(svg_element::Group::new().set("class", "legend"), |group, entry| {
                group.add(self.render_legend_entry(entry, height))
            });

        let stages = diagram.boxes().iter().enumerate().fold(
            svg_element::Group::new().set("class", "stages"),
            |group, (index, layout_box)| group.add(self.render_stage(index, layout_box, height)),
        );

        let connectors = diagram
            .arrows()
            .iter()
            .filter(|arrow| !arrow.is_degenerate())
            .fold(
                svg_element::Group::new().set("class", "connectors"),
                |group, arrow| group.add(self.render_connector(arrow, height)),
            );

        Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(self.marker_definitions())
            .add(background)
            .add(legend)
            .add(stages)
            .add(connectors)
    }

    fn marker_id(&self) -> String {
        format!("arrow-vee-{}", self.stroke.to_id_safe_string())
    }

    fn marker_definitions(&self) -> svg_element::Definitions {
        let head = svg_element::Path::new()
            .set("d", "M 0 0 L 10 5 L 0 10")
            .set("fill", "none")
            .set("stroke", self.stroke)
            .set("stroke-width", 1.5);

        let marker = svg_element::Marker::new()
            .set("id", self.marker_id())
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerUnits", "userSpaceOnUse")
            .set("markerWidth", ARROW_HEAD_SIZE)
            .set("markerHeight", ARROW_HEAD_SIZE)
            .set("orient", "auto")
            .add(head);

        svg_element::Definitions::new().add(marker)
    }

    fn rectangle(&self, bounds: Bounds, fill: Color, height: f32) -> svg_element::Rectangle {
        let flipped = bounds.flip_y(height);
        svg_element::Rectangle::new()
            .set("x", flipped.min_x())
            .set("y", flipped.min_y())
            .set("width", flipped.width())
            .set("height", flipped.height())
            .set("fill", fill)
            .set("stroke", self.stroke)
    }

    fn label(&self, content: &str, anchor: Point, height: f32) -> svg_element::Text {
        let anchor = anchor.flip_y(height);
        svg_element::Text::new(content)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("font-family", FONT_FAMILY)
            .set("font-size", format!("{}pt", self.font_size))
    }

    fn render_legend_entry(&self, entry: &LegendEntry, height: f32) -> svg_element::Group {
        svg_element::Group::new()
            .set("class", "legend-entry")
            .add(self.rectangle(entry.bounds(), entry.fill(), height))
            .add(self.label(entry.kind().name(), entry.label(), height))
    }

    fn render_stage(&self, index: usize, layout_box: &LayoutBox, height: f32) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "stage")
            .set("data-stage-index", index.to_string())
            .set("data-stage-kind", layout_box.kind().name())
            .add(self.rectangle(layout_box.bounds(), layout_box.fill(), height))
            .add(self.label(layout_box.name(), layout_box.label(), height));

        if self.titles {
            let mut title = svg_element::Element::new("title");
            title.append(node::Text::new(layout_box.tooltip().plain_text()));
            group = group.add(title);
        }

        group
    }

    fn render_connector(&self, arrow: &ConnectorArrow, height: f32) -> svg_element::Path {
        let start = arrow.start().flip_y(height);
        let end = arrow.end().flip_y(height);

        svg_element::Path::new()
            .set(
                "d",
                format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
            )
            .set("fill", "none")
            .set("stroke", self.stroke)
            .set("stroke-width", 1)
            .set("marker-end", format!("url(#{})", self.marker_id()))
    }
}

impl Exporter for SvgExporter {
    fn export(&self, diagram: &Diagram) -> Result<String, StageplotError> {
        let document = self.render_document(diagram);
        debug!("SVG document rendered");
        Ok(document.to_string())
    }
}
