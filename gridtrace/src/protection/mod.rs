//! Protection Coordination
//!
//! Time-current characteristic evaluation for protective devices: the
//! curve function library, the specification evaluator, coordination
//! geometry, and the plot-model output consumed by a visualization layer.

pub mod curves;
mod evaluator;
mod geometry;
mod params;
mod spec;

pub use evaluator::{evaluate_curve, CurveError, CurvePoint};
pub use geometry::{build_region, CoordinationRegion, GeometryError};
pub use params::{Field, ParameterSet};
pub use spec::{CurveArg, CurveFamily, CurveSegment, VarScope};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Whether a device model describes a protective characteristic (with an
/// operating envelope between its two curves) or an equipment damage /
/// starting characteristic (plotted as bare profiles).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    Protection,
    Damage,
}

/// A protective device's curve model: adjustable parameters plus the
/// upper and lower characteristic specifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionModel {
    pub title: String,
    #[serde(default)]
    pub kind: DeviceKind,
    #[serde(default)]
    pub parameters: ParameterSet,
    pub curve_upper: Vec<CurveSegment>,
    pub curve_lower: Vec<CurveSegment>,
}

impl ProtectionModel {
    pub fn new(
        title: impl Into<String>,
        parameters: ParameterSet,
        curve_upper: Vec<CurveSegment>,
        curve_lower: Vec<CurveSegment>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: DeviceKind::Protection,
            parameters,
            curve_upper,
            curve_lower,
        }
    }

    pub fn with_kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Take over the values of matching parameters from another set,
    /// keeping this model's captions, units and selection lists.
    pub fn update_parameters(&mut self, incoming: &ParameterSet) {
        self.parameters.update_values(incoming);
    }

    /// Evaluate both characteristics. `settings` is the `f` scope; the `d`
    /// scope is `data` when given, else the device's own parameter set.
    pub fn evaluate(
        &self,
        settings: &ParameterSet,
        data: Option<&ParameterSet>,
    ) -> Result<EvaluatedDevice, CurveError> {
        let data = data.unwrap_or(&self.parameters);
        let curve_upper = evaluate_curve(&self.curve_upper, settings, data)?;
        let curve_lower = evaluate_curve(&self.curve_lower, settings, data)?;
        info!(
            device = %self.title,
            upper_points = curve_upper.len(),
            lower_points = curve_lower.len(),
            "curves evaluated"
        );
        Ok(EvaluatedDevice {
            title: self.title.clone(),
            kind: self.kind,
            curve_upper,
            curve_lower,
        })
    }

    /// Evaluate using the device's own parameters for both scopes.
    pub fn evaluate_with_defaults(&self) -> Result<EvaluatedDevice, CurveError> {
        self.evaluate(&self.parameters, None)
    }
}

/// A device with both characteristics expanded to sample points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedDevice {
    pub title: String,
    pub kind: DeviceKind,
    pub curve_upper: Vec<CurvePoint>,
    pub curve_lower: Vec<CurvePoint>,
}

impl EvaluatedDevice {
    /// Build the coordination region between the two characteristics.
    /// Degenerate curves are a recoverable condition, not a failure of the
    /// evaluation that produced them.
    pub fn coordination_region(&self) -> Result<CoordinationRegion, GeometryError> {
        build_region(&self.curve_upper, &self.curve_lower)
    }

    /// Plot-ready model for the visualization layer. Protection devices
    /// render their envelope as one closed polygon trace; damage devices
    /// render up to two profile traces. A device whose region is
    /// degenerate produces no traces.
    pub fn graph_model(&self) -> GraphModel {
        match self.kind {
            DeviceKind::Protection => {
                let traces = match self.coordination_region() {
                    Ok(region) => {
                        let mut points = region.polygon.clone();
                        if let Some(first) = points.first().copied() {
                            points.push(first); // close the ring
                        }
                        vec![GraphTrace::new(TraceMode::Polygon, self.title.clone(), &points)]
                    }
                    Err(GeometryError::Degenerate { .. }) => Vec::new(),
                };
                GraphModel {
                    title: self.title.clone(),
                    traces,
                }
            }
            DeviceKind::Damage => {
                let mut traces = Vec::new();
                if !self.curve_upper.is_empty() {
                    traces.push(GraphTrace::new(
                        TraceMode::Profile,
                        format!("{} - Damage", self.title),
                        &self.curve_upper,
                    ));
                }
                if !self.curve_lower.is_empty() {
                    traces.push(GraphTrace::new(
                        TraceMode::Profile,
                        format!("{} - Starting", self.title),
                        &self.curve_lower,
                    ));
                }
                let title = match (self.curve_upper.is_empty(), self.curve_lower.is_empty()) {
                    (false, true) => format!("{} - Damage curve", self.title),
                    (true, false) => format!("{} - Starting curve", self.title),
                    _ => self.title.clone(),
                };
                GraphModel { title, traces }
            }
        }
    }
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Profile,
    Polygon,
}

/// One plottable series in current/time coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphTrace {
    pub mode: TraceMode,
    pub title: String,
    pub currents: Vec<f64>,
    pub times: Vec<f64>,
}

impl GraphTrace {
    fn new(mode: TraceMode, title: String, points: &[CurvePoint]) -> Self {
        Self {
            mode,
            title,
            currents: points.iter().map(|p| p.current).collect(),
            times: points.iter().map(|p| p.time).collect(),
        }
    }
}

/// Title plus traces, the unit a plotting layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphModel {
    pub title: String,
    pub traces: Vec<GraphTrace>,
}
