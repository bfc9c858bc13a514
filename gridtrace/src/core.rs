//! Core study logic shared by library users and the CLI.
//! Loads project files, resolves topology, and evaluates every protective
//! device into serializable, deterministically ordered reports.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::protection::{
    CoordinationRegion, CurveError, DeviceKind, GeometryError, GraphModel, ProtectionModel,
};
use crate::schematic::Project;
use crate::topology::{resolve, GlobalNode, Topology, TopologyError};

#[derive(Debug, thiserror::Error)]
pub enum GridTraceError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl From<serde_json::Error> for GridTraceError {
    fn from(e: serde_json::Error) -> Self {
        GridTraceError::Parse(e.to_string())
    }
}

/// One resolved port binding, keyed by the port's display form.
#[derive(Debug, Clone, Serialize)]
pub struct PortBinding {
    pub port: String,
    pub node: GlobalNode,
}

/// One resolved element-local node binding.
#[derive(Debug, Clone, Serialize)]
pub struct NodeBinding {
    pub local: String,
    pub node: GlobalNode,
    pub is_virtual: bool,
}

/// Serializable topology summary. Binding lists are sorted so that two
/// resolutions of the same project serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyReport {
    pub node_count: usize,
    pub virtual_count: usize,
    pub port_count: usize,
    pub ports: Vec<PortBinding>,
    pub nodes: Vec<NodeBinding>,
}

impl TopologyReport {
    pub fn from_topology(topology: &Topology) -> Self {
        let mut port_entries: Vec<_> = topology.port_mapping.iter().collect();
        port_entries.sort_by(|a, b| a.0.cmp(b.0));
        let ports = port_entries
            .into_iter()
            .map(|(port, node)| PortBinding {
                port: port.to_string(),
                node: *node,
            })
            .collect();

        let mut node_entries: Vec<_> = topology.node_mapping.iter().collect();
        node_entries.sort_by_key(|(local, _)| **local);
        let nodes = node_entries
            .into_iter()
            .map(|(local, node)| NodeBinding {
                local: local.to_string(),
                node: *node,
                is_virtual: topology.virtual_nodes.contains(node),
            })
            .collect();

        Self {
            node_count: topology.global_nodes.len(),
            virtual_count: topology.virtual_nodes.len(),
            port_count: topology.port_mapping.len(),
            ports,
            nodes,
        }
    }
}

/// One protective device's evaluated state within a study.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub title: String,
    pub kind: DeviceKind,
    pub upper_points: usize,
    pub lower_points: usize,
    /// Operating envelope; absent for damage devices and for degenerate
    /// protection curves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<CoordinationRegion>,
    /// Set when a protection device's curves could not form a region.
    pub degenerate: bool,
    pub graph: GraphModel,
}

/// Whole-project study result: resolved topology plus every device.
#[derive(Debug, Clone, Serialize)]
pub struct StudyResult {
    pub file: PathBuf,
    pub topology: TopologyReport,
    pub devices: Vec<DeviceReport>,
}

/// Study entry points used by both library callers and the CLI.
pub struct GridTraceCore;

impl GridTraceCore {
    /// Load a project description from a JSON file.
    pub fn load_project(path: &Path) -> Result<Project, GridTraceError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolve a project's topology into a report.
    pub fn resolve_project(project: &Project) -> Result<TopologyReport, GridTraceError> {
        let topology = resolve(&project.drawings)?;
        Ok(TopologyReport::from_topology(&topology))
    }

    /// Evaluate one device into its report entry. Degenerate geometry is
    /// recorded, never propagated as an error.
    pub fn evaluate_device(device: &ProtectionModel) -> Result<DeviceReport, GridTraceError> {
        let evaluated = device.evaluate_with_defaults()?;
        let (region, degenerate) = match evaluated.kind {
            DeviceKind::Protection => match evaluated.coordination_region() {
                Ok(region) => (Some(region), false),
                Err(GeometryError::Degenerate { .. }) => (None, true),
            },
            DeviceKind::Damage => (None, false),
        };
        Ok(DeviceReport {
            title: evaluated.title.clone(),
            kind: evaluated.kind,
            upper_points: evaluated.curve_upper.len(),
            lower_points: evaluated.curve_lower.len(),
            region,
            degenerate,
            graph: evaluated.graph_model(),
        })
    }

    /// Resolve topology from a project file.
    pub fn resolve_file(path: &Path) -> Result<TopologyReport, GridTraceError> {
        let project = Self::load_project(path)?;
        Self::resolve_project(&project)
    }

    /// Full study of a project file: topology plus every device.
    pub fn study_file(path: &Path) -> Result<StudyResult, GridTraceError> {
        let project = Self::load_project(path)?;
        let topology = Self::resolve_project(&project)?;
        let devices = project
            .devices
            .iter()
            .map(Self::evaluate_device)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StudyResult {
            file: path.to_path_buf(),
            topology,
            devices,
        })
    }
}
