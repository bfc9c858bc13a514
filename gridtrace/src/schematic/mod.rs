//! Schematic Input Schema
//!
//! Data types describing a drawn project as the topology resolver consumes
//! it: an ordered list of drawing pages, each an ordered list of elements,
//! each exposing its connection-point groups. The element catalog itself
//! (how a transformer or a bus is parameterized and rendered) lives outside
//! this crate; only the connection structure crosses this interface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protection::ProtectionModel;

/// Identity of one element within a project: drawing page index plus the
/// element's index on that page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementCode {
    pub page: usize,
    pub index: usize,
}

impl ElementCode {
    pub fn new(page: usize, index: usize) -> Self {
        Self { page, index }
    }
}

impl fmt::Display for ElementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.page, self.index)
    }
}

/// Element-scoped connection-point identifier: one per port group, stable
/// within the element's own group enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LocalNode {
    pub element: ElementCode,
    pub group: usize,
}

impl LocalNode {
    pub fn new(element: ElementCode, group: usize) -> Self {
        Self { element, group }
    }
}

impl fmt::Display for LocalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.element, self.group)
    }
}

/// A connection point as an element declares it, before page qualification.
///
/// Coordinates are drawing grid units. Equality is exact; elements that
/// should share a node must declare the identical grid position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortRef {
    /// Connection point in page coordinates; the owning page index is
    /// supplied by the resolver.
    Coord { x: i64, y: i64 },
    /// Opaque reference token connecting across drawing pages.
    Remote(String),
}

/// Globally qualified connection-point identity.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PortKey {
    /// Page-local coordinate reference.
    Coord { page: usize, x: i64, y: i64 },
    /// Cross-page reference token.
    Remote(String),
}

impl PortKey {
    /// Qualify a declared port with the page it was declared on. Remote
    /// tokens are already global and pass through unchanged.
    pub fn from_ref(page: usize, port: &PortRef) -> Self {
        match port {
            PortRef::Coord { x, y } => PortKey::Coord { page, x: *x, y: *y },
            PortRef::Remote(token) => PortKey::Remote(token.clone()),
        }
    }
}

impl fmt::Display for PortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKey::Coord { page, x, y } => write!(f, "({},{},{})", page, x, y),
            PortKey::Remote(token) => write!(f, "({})", token),
        }
    }
}

/// One port group of an element: zero or more ports declared electrically
/// identical. A group with more than one port is a junction/connector; a
/// group with none is an internal terminal with no external connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortGroup {
    #[serde(default)]
    pub ports: Vec<PortRef>,
}

impl PortGroup {
    pub fn new(ports: Vec<PortRef>) -> Self {
        Self { ports }
    }
}

/// A drawn element's connection structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Optional display name, used in reports and error messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered port groups; order defines the element's local node ids.
    #[serde(default)]
    pub groups: Vec<PortGroup>,
}

impl Element {
    pub fn new(groups: Vec<PortGroup>) -> Self {
        Self { name: None, groups }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One drawing page: an ordered list of elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Drawing {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

/// A complete project: drawing pages plus the protective devices whose
/// coordination curves are studied against the resolved network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub drawings: Vec<Drawing>,
    #[serde(default)]
    pub devices: Vec<ProtectionModel>,
}
