//! Curve Specification Types
//!
//! A protection curve is an ordered list of segments, each naming a curve
//! family and its arguments. Family names form a closed enumeration mapped
//! explicitly to the library functions, and symbolic arguments are
//! structured scope/field references resolved by table lookup. Nothing in
//! a specification is ever interpreted as executable text.
//!
//! Segments keep their historical wire form, a flat sequence:
//! `["iec_inverse", 0.1, "f.i_n", "f.i_f", 20000.0, 0.01, 50]`
//! where numbers are literals and `"f.x"` / `"d.x"` are variable
//! references into the device's setting and data scopes.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed set of supported curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveFamily {
    Point,
    Iec,
    IecInverse,
    IecVeryInverse,
    IecExtremelyInverse,
    IeeeModeratelyInverse,
    IeeeVeryInverse,
    IeeeExtremelyInverse,
    Thermal,
    I2t,
}

impl CurveFamily {
    /// Canonical wire name.
    pub fn name(&self) -> &'static str {
        match self {
            CurveFamily::Point => "point",
            CurveFamily::Iec => "iec",
            CurveFamily::IecInverse => "iec_inverse",
            CurveFamily::IecVeryInverse => "iec_very_inverse",
            CurveFamily::IecExtremelyInverse => "iec_extremely_inverse",
            CurveFamily::IeeeModeratelyInverse => "ieee_moderately_inverse",
            CurveFamily::IeeeVeryInverse => "ieee_very_inverse",
            CurveFamily::IeeeExtremelyInverse => "ieee_extremely_inverse",
            CurveFamily::Thermal => "thermal",
            CurveFamily::I2t => "i2t",
        }
    }

    /// Look up a family by wire name. Accepts the abbreviated historical
    /// spellings (`iec_v_inverse`, `ieee_m_inverse`, ...) alongside the
    /// canonical ones.
    pub fn from_name(name: &str) -> Option<Self> {
        let family = match name {
            "point" => CurveFamily::Point,
            "iec" => CurveFamily::Iec,
            "iec_inverse" => CurveFamily::IecInverse,
            "iec_very_inverse" | "iec_v_inverse" => CurveFamily::IecVeryInverse,
            "iec_extremely_inverse" | "iec_e_inverse" => CurveFamily::IecExtremelyInverse,
            "ieee_moderately_inverse" | "ieee_m_inverse" => CurveFamily::IeeeModeratelyInverse,
            "ieee_very_inverse" | "ieee_v_inverse" => CurveFamily::IeeeVeryInverse,
            "ieee_extremely_inverse" | "ieee_e_inverse" => CurveFamily::IeeeExtremelyInverse,
            "thermal" => CurveFamily::Thermal,
            "i2t" => CurveFamily::I2t,
            _ => return None,
        };
        Some(family)
    }

    /// Number of arguments the family's function takes.
    pub fn arity(&self) -> usize {
        match self {
            CurveFamily::Point => 2,
            CurveFamily::Iec => 9,
            CurveFamily::IecInverse
            | CurveFamily::IecVeryInverse
            | CurveFamily::IecExtremelyInverse
            | CurveFamily::IeeeModeratelyInverse
            | CurveFamily::IeeeVeryInverse
            | CurveFamily::IeeeExtremelyInverse => 6,
            CurveFamily::Thermal => 5,
            CurveFamily::I2t => 8,
        }
    }
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown curve function '{}'", s))
    }
}

/// Variable scope for symbolic curve arguments: `f` holds the device's
/// adjustable settings, `d` its fixed/derived data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarScope {
    Setting,
    Data,
}

impl VarScope {
    pub fn tag(&self) -> &'static str {
        match self {
            VarScope::Setting => "f",
            VarScope::Data => "d",
        }
    }
}

impl fmt::Display for VarScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One argument of a curve segment: a literal number or a scoped field
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveArg {
    Literal(f64),
    Var { scope: VarScope, field: String },
}

impl CurveArg {
    pub fn var(scope: VarScope, field: impl Into<String>) -> Self {
        CurveArg::Var {
            scope,
            field: field.into(),
        }
    }

    /// Parse the `"f.field"` / `"d.field"` wire form.
    fn parse_symbol(sym: &str) -> Result<Self, String> {
        let (tag, field) = sym
            .split_once('.')
            .ok_or_else(|| format!("invalid variable reference '{}'", sym))?;
        let scope = match tag {
            "f" => VarScope::Setting,
            "d" => VarScope::Data,
            _ => return Err(format!("unknown variable scope '{}' in '{}'", tag, sym)),
        };
        if field.is_empty() {
            return Err(format!("invalid variable reference '{}'", sym));
        }
        Ok(CurveArg::var(scope, field))
    }
}

impl From<f64> for CurveArg {
    fn from(value: f64) -> Self {
        CurveArg::Literal(value)
    }
}

impl Serialize for CurveArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CurveArg::Literal(v) => serializer.serialize_f64(*v),
            CurveArg::Var { scope, field } => {
                serializer.serialize_str(&format!("{}.{}", scope.tag(), field))
            }
        }
    }
}

impl<'de> Deserialize<'de> for CurveArg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Symbol(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(CurveArg::Literal(v)),
            Repr::Symbol(s) => CurveArg::parse_symbol(&s).map_err(de::Error::custom),
        }
    }
}

/// One curve segment: family plus ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSegment {
    pub family: CurveFamily,
    pub args: Vec<CurveArg>,
}

impl CurveSegment {
    pub fn new(family: CurveFamily, args: Vec<CurveArg>) -> Self {
        Self { family, args }
    }
}

impl Serialize for CurveSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.args.len() + 1))?;
        seq.serialize_element(self.family.name())?;
        for arg in &self.args {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for CurveSegment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SegmentVisitor;

        impl<'de> Visitor<'de> for SegmentVisitor {
            type Value = CurveSegment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a curve segment: [\"family\", arg, ...]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let name: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::custom("empty curve segment"))?;
                let family = CurveFamily::from_name(&name)
                    .ok_or_else(|| de::Error::custom(format!("unknown curve function '{}'", name)))?;
                let mut args = Vec::new();
                while let Some(arg) = seq.next_element::<CurveArg>()? {
                    args.push(arg);
                }
                Ok(CurveSegment { family, args })
            }
        }

        deserializer.deserialize_seq(SegmentVisitor)
    }
}
