//! Pipeline stage model.
//!
//! Stages reach the diagram builder through the [`PipelineStage`] trait,
//! which exposes exactly what a diagram needs: a unique id, the set of
//! [`Capabilities`] the stage satisfies, and its declared parameters.
//! [`StageDescriptor`] is the plain-data implementation used when stages
//! are loaded from a pipeline file.
//!
//! Classification into a [`StageKind`] happens once per stage through
//! [`StageKind::classify`].

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

/// A single trait a stage can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The stage wraps an unfitted sequence of sub-stages.
    CompositePipeline,
    /// The stage wraps a fitted sequence of sub-stages.
    FittedPipelineModel,
    /// The stage produces a model when fitted.
    Estimator,
    /// The stage transforms a dataset.
    Transformer,
}

/// The set of [`Capability`] values a stage satisfies.
///
/// A composite pipeline usually also satisfies [`Capability::Estimator`] and
/// a fitted pipeline model usually satisfies [`Capability::Transformer`];
/// [`StageKind::classify`] resolves such overlaps.
///
/// # Examples
///
/// ```
/// # use stageplot_core::stage::{Capabilities, Capability};
/// let caps = Capabilities::from_iter([Capability::CompositePipeline, Capability::Estimator]);
/// assert!(caps.contains(Capability::Estimator));
/// assert!(!caps.contains(Capability::Transformer));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Vec<Capability>")]
pub struct Capabilities {
    composite_pipeline: bool,
    fitted_pipeline_model: bool,
    estimator: bool,
    transformer: bool,
}

impl Capabilities {
    /// Capabilities of a plain estimator.
    pub fn estimator() -> Self {
        Self::from_iter([Capability::Estimator])
    }

    /// Capabilities of a plain transformer.
    pub fn transformer() -> Self {
        Self::from_iter([Capability::Transformer])
    }

    /// Capabilities of an unfitted composite pipeline, which is also an estimator.
    pub fn composite_pipeline() -> Self {
        Self::from_iter([Capability::CompositePipeline, Capability::Estimator])
    }

    /// Capabilities of a fitted pipeline model, which is also a transformer.
    pub fn fitted_pipeline_model() -> Self {
        Self::from_iter([Capability::FittedPipelineModel, Capability::Transformer])
    }

    /// Returns a copy with the given capability added.
    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::CompositePipeline => self.composite_pipeline = true,
            Capability::FittedPipelineModel => self.fitted_pipeline_model = true,
            Capability::Estimator => self.estimator = true,
            Capability::Transformer => self.transformer = true,
        }
        self
    }

    pub fn contains(self, capability: Capability) -> bool {
        match capability {
            Capability::CompositePipeline => self.composite_pipeline,
            Capability::FittedPipelineModel => self.fitted_pipeline_model,
            Capability::Estimator => self.estimator,
            Capability::Transformer => self.transformer,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |caps, capability| caps.with(capability))
    }
}

impl From<Vec<Capability>> for Capabilities {
    fn from(capabilities: Vec<Capability>) -> Self {
        capabilities.into_iter().collect()
    }
}

/// The closed set of stage kinds a diagram distinguishes.
///
/// The declaration order is the legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    Estimator,
    Transformer,
    CompositePipeline,
    FittedPipelineModel,
}

impl StageKind {
    /// Every kind, in legend order.
    pub const ALL: [StageKind; 4] = [
        StageKind::Estimator,
        StageKind::Transformer,
        StageKind::CompositePipeline,
        StageKind::FittedPipelineModel,
    ];

    /// Classifies a stage from its capabilities.
    ///
    /// The pipeline capabilities are tested before the generic estimator and
    /// transformer ones, since composite stages satisfy those as well.
    /// Returns `None` when no capability is present.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stageplot_core::stage::{Capabilities, StageKind};
    /// assert_eq!(
    ///     StageKind::classify(Capabilities::composite_pipeline()),
    ///     Some(StageKind::CompositePipeline),
    /// );
    /// assert_eq!(StageKind::classify(Capabilities::default()), None);
    /// ```
    pub fn classify(capabilities: Capabilities) -> Option<Self> {
        if capabilities.contains(Capability::CompositePipeline) {
            Some(Self::CompositePipeline)
        } else if capabilities.contains(Capability::FittedPipelineModel) {
            Some(Self::FittedPipelineModel)
        } else if capabilities.contains(Capability::Estimator) {
            Some(Self::Estimator)
        } else if capabilities.contains(Capability::Transformer) {
            Some(Self::Transformer)
        } else {
            None
        }
    }

    /// Returns the display name used in legends and tooltips.
    pub fn name(self) -> &'static str {
        match self {
            Self::Estimator => "Estimator",
            Self::Transformer => "Transformer",
            Self::CompositePipeline => "Pipeline",
            Self::FittedPipelineModel => "PipelineModel",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to read the current value of a stage parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read parameter `{param}` of stage `{stage}`: {reason}")]
pub struct ParamReadError {
    stage: String,
    param: String,
    reason: String,
}

impl ParamReadError {
    pub fn new(
        stage: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }
}

/// Read-only view of a pipeline stage, as consumed by the diagram builder.
pub trait PipelineStage {
    /// Stable unique identifier, used as the box label.
    fn uid(&self) -> &str;

    /// Capabilities used to classify the stage.
    fn capabilities(&self) -> Capabilities;

    /// Names of the declared parameters, in the stage's native order.
    fn param_names(&self) -> Vec<&str>;

    /// Current value of a parameter, or its default.
    ///
    /// `Ok(None)` means the parameter has neither a value nor a default.
    fn param_value(&self, name: &str) -> Result<Option<String>, ParamReadError>;

    /// Identifiers of the wrapped sub-stages for composite kinds.
    fn nested_stages(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: PipelineStage + ?Sized> PipelineStage for &T {
    fn uid(&self) -> &str {
        (**self).uid()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn param_names(&self) -> Vec<&str> {
        (**self).param_names()
    }

    fn param_value(&self, name: &str) -> Result<Option<String>, ParamReadError> {
        (**self).param_value(name)
    }

    fn nested_stages(&self) -> Vec<String> {
        (**self).nested_stages()
    }
}

impl<T: PipelineStage + ?Sized> PipelineStage for Box<T> {
    fn uid(&self) -> &str {
        (**self).uid()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn param_names(&self) -> Vec<&str> {
        (**self).param_names()
    }

    fn param_value(&self, name: &str) -> Result<Option<String>, ParamReadError> {
        (**self).param_value(name)
    }

    fn nested_stages(&self) -> Vec<String> {
        (**self).nested_stages()
    }
}

/// A declared stage parameter and its value, if any.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    name: String,
    #[serde(default)]
    value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Plain-data description of a pipeline stage.
///
/// Parameter names are unique: the builder methods replace the value of a
/// name that is already declared, and deserialization rejects duplicates.
///
/// # Examples
///
/// ```
/// # use stageplot_core::stage::{Capabilities, PipelineStage, StageDescriptor};
/// let stage = StageDescriptor::new("HashingTF_a1", Capabilities::transformer())
///     .with_param("numFeatures", "262144")
///     .with_unset_param("outputCol");
///
/// assert_eq!(stage.param_names(), ["numFeatures", "outputCol"]);
/// assert_eq!(stage.param_value("outputCol"), Ok(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageDescriptor {
    id: String,
    capabilities: Capabilities,
    #[serde(default, deserialize_with = "unique_params")]
    params: Vec<Parameter>,
    #[serde(default)]
    nested_stages: Vec<String>,
}

impl StageDescriptor {
    pub fn new(id: impl Into<String>, capabilities: Capabilities) -> Self {
        Self {
            id: id.into(),
            capabilities,
            params: Vec::new(),
            nested_stages: Vec::new(),
        }
    }

    /// Declares a parameter with a value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name.into(), Some(value.into()));
        self
    }

    /// Declares a parameter that has no value.
    pub fn with_unset_param(mut self, name: impl Into<String>) -> Self {
        self.set_param(name.into(), None);
        self
    }

    fn set_param(&mut self, name: String, value: Option<String>) {
        match self.params.iter_mut().find(|param| param.name == name) {
            Some(param) => param.value = value,
            None => self.params.push(Parameter::new(name, value)),
        }
    }

    /// Sets the identifiers of the wrapped sub-stages.
    pub fn with_nested_stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_stages = stages.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

fn unique_params<'de, D>(deserializer: D) -> Result<Vec<Parameter>, D::Error>
where
    D: Deserializer<'de>,
{
    let params = Vec::<Parameter>::deserialize(deserializer)?;

    let duplicate = {
        let mut seen = HashSet::with_capacity(params.len());
        params
            .iter()
            .find(|param| !seen.insert(param.name.as_str()))
            .map(|param| param.name.clone())
    };

    match duplicate {
        Some(name) => Err(de::Error::custom(format!("duplicate parameter `{name}`"))),
        None => Ok(params),
    }
}

impl PipelineStage for StageDescriptor {
    fn uid(&self) -> &str {
        &self.id
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(Parameter::name).collect()
    }

    fn param_value(&self, name: &str) -> Result<Option<String>, ParamReadError> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.clone())
            .ok_or_else(|| ParamReadError::new(&self.id, name, "parameter is not declared"))
    }

    fn nested_stages(&self) -> Vec<String> {
        self.nested_stages.clone()
    }
}
