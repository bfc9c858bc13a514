//! Curve Evaluator
//!
//! Expands a curve specification into a sampled point sequence: resolves
//! each segment's symbolic arguments against the device's setting (`f`)
//! and data (`d`) scopes, dispatches to the curve function library, and
//! concatenates the segments' samples in specification order.

use serde::{Deserialize, Serialize};

use crate::protection::curves::{self, CurveSamples};
use crate::protection::params::ParameterSet;
use crate::protection::spec::{CurveArg, CurveFamily, CurveSegment, VarScope};

/// One sampled point of a time-current characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub current: f64,
    pub time: f64,
}

impl CurvePoint {
    pub fn new(current: f64, time: f64) -> Self {
        Self { current, time }
    }
}

/// Errors raised while evaluating a curve specification. Both variants are
/// fatal to the evaluation; no partial curve is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("segment {index} ({family}): expected {expected} arguments, got {got}")]
    Arity {
        index: usize,
        family: CurveFamily,
        expected: usize,
        got: usize,
    },
    #[error("segment {index} ({family}): unresolved reference {scope}.{field}")]
    Unresolved {
        index: usize,
        family: CurveFamily,
        scope: VarScope,
        field: String,
    },
}

/// Evaluate a curve specification against the two variable scopes.
pub fn evaluate_curve(
    spec: &[CurveSegment],
    settings: &ParameterSet,
    data: &ParameterSet,
) -> Result<Vec<CurvePoint>, CurveError> {
    let mut samples = CurveSamples::default();
    for (index, segment) in spec.iter().enumerate() {
        let expected = segment.family.arity();
        if segment.args.len() != expected {
            return Err(CurveError::Arity {
                index,
                family: segment.family,
                expected,
                got: segment.args.len(),
            });
        }
        let mut resolved = Vec::with_capacity(expected);
        for arg in &segment.args {
            let value = match arg {
                CurveArg::Literal(v) => *v,
                CurveArg::Var { scope, field } => {
                    let scoped = match scope {
                        VarScope::Setting => settings,
                        VarScope::Data => data,
                    };
                    scoped.value(field).ok_or_else(|| CurveError::Unresolved {
                        index,
                        family: segment.family,
                        scope: *scope,
                        field: field.clone(),
                    })?
                }
            };
            resolved.push(value);
        }
        samples.extend(invoke(segment.family, &resolved));
    }
    Ok(samples
        .currents
        .into_iter()
        .zip(samples.times)
        .map(|(current, time)| CurvePoint { current, time })
        .collect())
}

/// Sample counts arrive as numeric arguments; negative or fractional
/// values are clamped and rounded.
fn count(v: f64) -> usize {
    if v.is_finite() && v > 0.0 {
        v.round() as usize
    } else {
        0
    }
}

/// The explicit family-to-function dispatch table. `args` has already been
/// arity-checked against the family.
fn invoke(family: CurveFamily, a: &[f64]) -> CurveSamples {
    match family {
        CurveFamily::Point => curves::point(a[0], a[1]),
        CurveFamily::Iec => {
            curves::iec(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], count(a[8]))
        }
        CurveFamily::IecInverse => {
            curves::iec_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::IecVeryInverse => {
            curves::iec_very_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::IecExtremelyInverse => {
            curves::iec_extremely_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::IeeeModeratelyInverse => {
            curves::ieee_moderately_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::IeeeVeryInverse => {
            curves::ieee_very_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::IeeeExtremelyInverse => {
            curves::ieee_extremely_inverse(a[0], a[1], a[2], a[3], a[4], count(a[5]))
        }
        CurveFamily::Thermal => curves::thermal(a[0], a[1], a[2], a[3], count(a[4])),
        CurveFamily::I2t => {
            curves::i2t(a[0], a[1], a[2], a[3], a[4], a[5], a[6], count(a[7]))
        }
    }
}
