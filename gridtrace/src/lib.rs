//! GridTrace - electrical schematic topology and protection coordination
//!
//! This library collapses a drawn project's per-element connection points
//! into a minimal set of electrically distinct network nodes, and
//! evaluates standardized time-current characteristics for protective
//! devices into curves and coordination regions.
//!
//! # Quick Start
//!
//! ```
//! use gridtrace::schematic::{Drawing, Element, PortGroup, PortRef};
//! use gridtrace::topology::resolve;
//!
//! // A source and a line sharing the connection point at (0,0).
//! let drawings = vec![Drawing::new(vec![
//!     Element::new(vec![PortGroup::new(vec![PortRef::Coord { x: 0, y: 0 }])]),
//!     Element::new(vec![
//!         PortGroup::new(vec![PortRef::Coord { x: 0, y: 0 }]),
//!         PortGroup::new(vec![PortRef::Coord { x: 10, y: 0 }]),
//!     ]),
//! ])];
//!
//! let topology = resolve(&drawings).unwrap();
//! assert_eq!(topology.node_count(), 2);
//! ```
//!
//! # Features
//!
//! - **Topology resolution**: duplicate-port unification, virtual nodes,
//!   deterministic node ids
//! - **Trip curves**: IEC 60255-3 / IEEE C37.112 inverse-time families,
//!   thermal and I²t characteristics
//! - **Coordination geometry**: operating-envelope polygons between a
//!   device's upper and lower characteristics

pub mod core;
pub mod protection;
pub mod schematic;
pub mod topology;

// Re-export main types
pub use crate::core::{
    DeviceReport, GridTraceCore, GridTraceError, StudyResult, TopologyReport,
};
pub use protection::{
    CoordinationRegion, CurveError, CurvePoint, CurveSegment, GeometryError, ProtectionModel,
};
pub use schematic::{Drawing, Element, PortKey, Project};
pub use topology::{resolve, GlobalNode, Topology, TopologyError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{GridTraceCore, GridTraceError, StudyResult, TopologyReport};
    pub use crate::protection::{CurvePoint, ProtectionModel};
    pub use crate::schematic::{Drawing, Element, PortKey, Project};
    pub use crate::topology::{resolve, GlobalNode, Topology};
}
