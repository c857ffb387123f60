//! Pipeline files.
//!
//! A pipeline file is a TOML document listing stages in execution order:
//!
//! ```toml
//! name = "text-classifier"
//!
//! [[stages]]
//! id = "Tokenizer_4b1c"
//! capabilities = ["transformer"]
//! params = [
//!     { name = "inputCol", value = "text" },
//!     { name = "outputCol" },
//! ]
//!
//! [[stages]]
//! id = "PipelineModel_77aa"
//! capabilities = ["fitted_pipeline_model", "transformer"]
//! nested_stages = ["Tokenizer_1", "LogisticRegressionModel_2"]
//! ```

use log::{debug, trace};
use serde::Deserialize;

use stageplot_core::stage::StageDescriptor;

use crate::StageplotError;

/// An ordered list of stages loaded from a pipeline file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    stages: Vec<StageDescriptor>,
}

impl Pipeline {
    pub fn new(name: Option<String>, stages: Vec<StageDescriptor>) -> Self {
        Self { name, stages }
    }

    /// Parses a pipeline from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`StageplotError::Parse`] with the offending span when the
    /// source is not a valid pipeline document.
    pub fn from_toml(source: &str) -> Result<Self, StageplotError> {
        let pipeline: Self =
            toml::from_str(source).map_err(|err| StageplotError::new_parse_error(&err, source))?;

        debug!(
            name:? = pipeline.name,
            stages_count = pipeline.stages.len();
            "Pipeline file parsed"
        );
        trace!(pipeline:?; "Parsed pipeline");

        Ok(pipeline)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }
}
