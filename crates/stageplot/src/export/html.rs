//! Standalone HTML page export.
//!
//! The page inlines the SVG diagram and keeps every stage tooltip in a
//! `<template>` element keyed by stage index. A small script shows the
//! matching tooltip next to the pointer while it hovers a stage box.

use handlebars::Handlebars;
use log::debug;
use serde_json::json;

use crate::{
    StageplotError,
    config::StyleConfig,
    diagram::Diagram,
    export::{Exporter, svg::SvgExporter},
};

const DEFAULT_TITLE: &str = "Pipeline plot";

/// Page skeleton. `svg` and each tooltip `html` are already escaped markup.
const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
body { margin: 0; font-family: arial, sans-serif; }
.stageplot-tooltip {
    position: absolute;
    z-index: 10;
    padding: 4px;
    background: #ffffff;
    border: 1px solid #dddddd;
    box-shadow: 2px 2px 4px rgba(0, 0, 0, 0.2);
    pointer-events: none;
}
.stageplot-tooltip table {
    font-family: arial, sans-serif;
    border-collapse: collapse;
    table-layout: fixed;
    width: 100%;
}
.stageplot-tooltip td, .stageplot-tooltip th {
    border: 1px solid #dddddd;
    font-size: 10px;
    text-align: left;
    padding: 1px;
}
.stageplot-tooltip tr:nth-child(even) {
    background-color: #dddddd;
    font-size: 10px;
}
g.stage { cursor: pointer; }
</style>
</head>
<body>
<div class="stageplot">
{{{svg}}}
</div>
<div id="stageplot-tooltip" class="stageplot-tooltip" hidden></div>
{{#each tooltips}}
<template id="stageplot-tooltip-{{@index}}" data-stage="{{this.stage}}">{{{this.html}}}</template>
{{/each}}
<script>
(function () {
    var panel = document.getElementById("stageplot-tooltip");
    document.querySelectorAll("g.stage").forEach(function (stage) {
        var content = document.getElementById("stageplot-tooltip-" + stage.dataset.stageIndex);
        if (!content) {
            return;
        }
        stage.addEventListener("mousemove", function (event) {
            panel.innerHTML = content.innerHTML;
            panel.style.left = (event.pageX + 12) + "px";
            panel.style.top = (event.pageY + 12) + "px";
            panel.hidden = false;
        });
        stage.addEventListener("mouseleave", function () {
            panel.hidden = true;
        });
    });
})();
</script>
</body>
</html>
"##;

/// Renders diagrams to self-contained HTML pages.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    svg: SvgExporter,
    title: String,
}

impl HtmlExporter {
    /// Creates an exporter styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Config`] if the style is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, StageplotError> {
        Ok(Self {
            svg: SvgExporter::new(style)?.with_titles(false),
            title: DEFAULT_TITLE.to_string(),
        })
    }

    /// Sets the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, diagram: &Diagram) -> Result<String, StageplotError> {
        let tooltips: Vec<_> = diagram
            .boxes()
            .iter()
            .map(|layout_box| {
                json!({
                    "stage": layout_box.name(),
                    "html": layout_box.tooltip().html(),
                })
            })
            .collect();

        let handlebars = Handlebars::new();
        let page = handlebars
            .render_template(
                PAGE_TEMPLATE,
                &json!({
                    "title": self.title,
                    "svg": self.svg.export(diagram)?,
                    "tooltips": tooltips,
                }),
            )
            .map_err(|err| StageplotError::Export(err.to_string()))?;

        debug!(tooltips_count = tooltips.len(); "HTML page rendered");
        Ok(page)
    }
}
