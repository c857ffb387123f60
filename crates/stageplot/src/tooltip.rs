//! Hover tooltips for stage boxes.
//!
//! A [`Tooltip`] holds the stage header and a `Param` / `Value` table.
//! Fitted pipeline models get a single `stages` row listing their nested
//! stages; every other kind gets one row per declared parameter.

use std::borrow::Cow;

use log::warn;
use textwrap::{Options, WrapAlgorithm};

use stageplot_core::stage::{PipelineStage, StageKind};

/// Placeholder shown for parameters that are unset or cannot be read.
pub const MISSING_VALUE: &str = "None";

const HEADER_COLOR: &str = "#26AAE1";

/// One `Param` / `Value` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
    param: String,
    value: String,
    value_lines: Vec<String>,
}

impl TooltipRow {
    fn new(param: impl Into<String>, value: String, wrap_width: usize) -> Self {
        Self {
            param: param.into(),
            value_lines: wrap(&value, wrap_width),
            value,
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn value_lines(&self) -> &[String] {
        &self.value_lines
    }

    /// Returns the unwrapped value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Hover payload of one stage box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    stage: String,
    kind: StageKind,
    rows: Vec<TooltipRow>,
    width: u32,
}

impl Tooltip {
    /// Collects the tooltip rows of a stage.
    ///
    /// Parameter read failures are logged and rendered as [`MISSING_VALUE`].
    pub fn for_stage<S: PipelineStage>(
        stage: &S,
        kind: StageKind,
        wrap_width: usize,
        width: u32,
    ) -> Self {
        let rows = if kind == StageKind::FittedPipelineModel {
            let nested = format!("[{}]", stage.nested_stages().join(", "));
            vec![TooltipRow::new("stages", nested, wrap_width)]
        } else {
            stage
                .param_names()
                .into_iter()
                .map(|name| {
                    let value = match stage.param_value(name) {
                        Ok(Some(value)) => value,
                        Ok(None) => MISSING_VALUE.to_string(),
                        Err(err) => {
                            warn!(stage = stage.uid(), param = name, err:err; "Parameter value unavailable");
                            MISSING_VALUE.to_string()
                        }
                    };
                    TooltipRow::new(name, value, wrap_width)
                })
                .collect()
        };

        Self {
            stage: stage.uid().to_string(),
            kind,
            rows,
            width,
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn rows(&self) -> &[TooltipRow] {
        &self.rows
    }

    /// Looks up the unwrapped value of a row by parameter name.
    pub fn value_of(&self, param: &str) -> Option<String> {
        self.rows
            .iter()
            .find(|row| row.param == param)
            .map(|row| row.value.clone())
    }

    /// Renders the tooltip as an HTML fragment.
    pub fn html(&self) -> String {
        let mut table = String::from("<table><tr><th>Param</th><th>Value</th></tr>");
        for row in &self.rows {
            let value = row
                .value_lines
                .iter()
                .map(|line| escape_html(line))
                .collect::<Vec<_>>()
                .join("<br>");
            table.push_str(&format!(
                "<tr><td>{}</td><td>{value}</td></tr>",
                escape_html(&row.param)
            ));
        }
        table.push_str("</table>");

        format!(
            "<div style=\"width:{width}px\"><p style=\"font-size:10px\">\
             <font color=\"{HEADER_COLOR}\">Stage: </font>{stage} <br>\
             <font color=\"{HEADER_COLOR}\">Type: </font>{kind} <br>\
             {table}</p></div>",
            width = self.width,
            stage = escape_html(&self.stage),
            kind = self.kind,
        )
    }

    /// Renders the tooltip as plain text, one `param: value` per line.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![
            format!("Stage: {}", self.stage),
            format!("Type: {}", self.kind),
        ];
        lines.extend(
            self.rows
                .iter()
                .map(|row| format!("{}: {}", row.param, row.value())),
        );
        lines.join("\n")
    }
}

/// Greedy word wrap of a parameter value.
///
/// Every whitespace character counts as a space, lines may break after a
/// hyphen, and words longer than `width` are split. Blank input yields no
/// lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let spaced: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let options = Options::new(width.max(1)).wrap_algorithm(WrapAlgorithm::FirstFit);

    textwrap::wrap(&spaced, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
