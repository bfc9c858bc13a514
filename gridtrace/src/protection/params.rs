//! Device Parameter Fields
//!
//! Named numeric fields with caption/unit/selection metadata, the shape in
//! which device parameter rows arrive from the element catalog. The curve
//! evaluator only reads values; the metadata rides along for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One named numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub caption: String,
    pub unit: String,
    pub value: f64,
    /// Discrete values the setting may take, when the device offers a dial
    /// rather than a continuous range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<f64>>,
}

impl Field {
    pub fn new(caption: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            caption: caption.into(),
            unit: unit.into(),
            value,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Vec<f64>) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// An ordered map of named fields forming one variable scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    fields: BTreeMap<String, Field>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Numeric value of a field, if present.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.fields.get(name).map(|f| f.value)
    }

    /// Overwrite the values of fields that exist in both sets, leaving
    /// captions, units and selections untouched.
    pub fn update_values(&mut self, other: &ParameterSet) {
        for (name, field) in &other.fields {
            if let Some(existing) = self.fields.get_mut(name) {
                existing.value = field.value;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Field)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
