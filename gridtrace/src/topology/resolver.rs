//! Topology Resolver
//!
//! Collapses the per-element connection points of a drawn project into a
//! minimal set of electrically distinct nodes. Every downstream network
//! calculation keys off this mapping, so id assignment must be exact and
//! reproducible: resolving the same drawings twice yields numerically
//! identical node ids.
//!
//! Resolution is two-pass. Duplicate-port equivalence classes are only
//! known once every group has been seen, so the first pass can bind ports
//! only tentatively; the second pass re-reads every group through the fully
//! unified port mapping.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::schematic::{Drawing, ElementCode, LocalNode, PortKey};
use crate::topology::unify::merge_duplicate_groups;

/// Resolver-assigned node identifier, unique within one resolution pass.
/// Ids are handed out in first-seen scan order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct GlobalNode(pub u32);

impl std::fmt::Display for GlobalNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while resolving a project's topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A port key was read in the final pass without ever being bound in
    /// the registration pass. This is an input-consistency fault; the
    /// resolver refuses to invent a node for it.
    #[error("unbound port reference {port} in element {element}")]
    UnboundPort { element: ElementCode, port: PortKey },
}

/// The resolved node structure of one project, returned as an owned value.
/// A topology is rebuilt wholesale on every change; nothing in it is
/// updated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    /// Port key → electrically unified node.
    pub port_mapping: HashMap<PortKey, GlobalNode>,
    /// Element-local node → electrically unified node.
    pub node_mapping: HashMap<LocalNode, GlobalNode>,
    /// Nodes backed by at least one real port.
    pub global_nodes: BTreeSet<GlobalNode>,
    /// Internal reference nodes with no external port. Disjoint from
    /// `global_nodes` and never present in `port_mapping`.
    pub virtual_nodes: BTreeSet<GlobalNode>,
}

impl Topology {
    /// Number of electrically distinct nodes with real ports.
    pub fn node_count(&self) -> usize {
        self.global_nodes.len()
    }

    /// Node for a local node id, if the element group was resolved.
    pub fn node_for(&self, local: LocalNode) -> Option<GlobalNode> {
        self.node_mapping.get(&local).copied()
    }

    /// Node for a fully qualified port key.
    pub fn node_for_port(&self, port: &PortKey) -> Option<GlobalNode> {
        self.port_mapping.get(port).copied()
    }
}

/// Resolve the global node set and element-to-node mapping for a project.
///
/// Pass 1 walks drawings → elements → port groups in order, allocating one
/// tentative node per group (a virtual node when the group has no ports)
/// and registering multi-port groups for unification. The unifier then
/// collapses chained duplicate groups; each merged class is rebound to a
/// fresh node. Pass 2 re-walks every group and records its final node via
/// the group's first port key.
pub fn resolve(drawings: &[Drawing]) -> Result<Topology, TopologyError> {
    let mut port_mapping: HashMap<PortKey, GlobalNode> = HashMap::new();
    let mut virtual_bindings: HashMap<LocalNode, GlobalNode> = HashMap::new();
    let mut virtual_nodes: BTreeSet<GlobalNode> = BTreeSet::new();
    let mut duplicate_groups: Vec<Vec<PortKey>> = Vec::new();
    let mut next_node: u32 = 0;

    // Pass 1: tentative bindings and duplicate-group registration.
    for (page, drawing) in drawings.iter().enumerate() {
        for (index, element) in drawing.elements.iter().enumerate() {
            let code = ElementCode::new(page, index);
            for (group_no, group) in element.groups.iter().enumerate() {
                let node = GlobalNode(next_node);
                next_node += 1;
                if group.ports.is_empty() {
                    virtual_bindings.insert(LocalNode::new(code, group_no), node);
                    virtual_nodes.insert(node);
                    continue;
                }
                let keys: Vec<PortKey> = group
                    .ports
                    .iter()
                    .map(|p| PortKey::from_ref(page, p))
                    .collect();
                for key in &keys {
                    port_mapping.insert(key.clone(), node);
                }
                if keys.len() > 1 {
                    duplicate_groups.push(keys);
                }
            }
        }
    }

    // Unification: every merged class gets a fresh node overriding the
    // tentative bindings of all its members.
    let classes = merge_duplicate_groups(&duplicate_groups);
    for class in &classes {
        let node = GlobalNode(next_node);
        next_node += 1;
        debug!(node = node.0, ports = class.len(), "merged duplicate ports");
        for port in class {
            port_mapping.insert(port.clone(), node);
        }
    }

    // Pass 2: final binding of every local node through the unified
    // mapping, and accumulation of the node set actually produced.
    let mut node_mapping: HashMap<LocalNode, GlobalNode> = HashMap::new();
    let mut global_nodes: BTreeSet<GlobalNode> = BTreeSet::new();
    for (page, drawing) in drawings.iter().enumerate() {
        for (index, element) in drawing.elements.iter().enumerate() {
            let code = ElementCode::new(page, index);
            for (group_no, group) in element.groups.iter().enumerate() {
                let local = LocalNode::new(code, group_no);
                let node = match group.ports.first() {
                    Some(port) => {
                        let key = PortKey::from_ref(page, port);
                        *port_mapping.get(&key).ok_or(TopologyError::UnboundPort {
                            element: code,
                            port: key.clone(),
                        })?
                    }
                    None => virtual_bindings[&local],
                };
                if !group.ports.is_empty() {
                    global_nodes.insert(node);
                }
                node_mapping.insert(local, node);
            }
        }
    }

    info!(
        nodes = global_nodes.len(),
        virtual_nodes = virtual_nodes.len(),
        ports = port_mapping.len(),
        merged_classes = classes.len(),
        "topology resolved"
    );

    Ok(Topology {
        port_mapping,
        node_mapping,
        global_nodes,
        virtual_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schematic::{Element, PortGroup, PortRef};

    fn coord(x: i64, y: i64) -> PortRef {
        PortRef::Coord { x, y }
    }

    fn element(groups: Vec<Vec<PortRef>>) -> Element {
        Element::new(groups.into_iter().map(PortGroup::new).collect())
    }

    /// Two elements joined end to end by a shared port position, plus a
    /// three-way junction declaring its legs identical.
    fn sample_drawings() -> Vec<Drawing> {
        vec![Drawing::new(vec![
            // Source feeding node at (0,0).
            element(vec![vec![coord(0, 0)]]),
            // Line from (0,0) to (10,0).
            element(vec![vec![coord(0, 0)], vec![coord(10, 0)]]),
            // Junction tying (10,0), (10,5) and (10,-5) together.
            element(vec![vec![coord(10, 0), coord(10, 5), coord(10, -5)]]),
            // Load hanging off (10,5).
            element(vec![vec![coord(10, 5)]]),
        ])]
    }

    #[test]
    fn test_shared_port_unifies_elements() {
        let topo = resolve(&sample_drawings()).unwrap();
        let source = topo
            .node_for(LocalNode::new(ElementCode::new(0, 0), 0))
            .unwrap();
        let line_a = topo
            .node_for(LocalNode::new(ElementCode::new(0, 1), 0))
            .unwrap();
        assert_eq!(source, line_a);
    }

    #[test]
    fn test_junction_merges_all_legs() {
        let topo = resolve(&sample_drawings()).unwrap();
        let line_b = topo
            .node_for(LocalNode::new(ElementCode::new(0, 1), 1))
            .unwrap();
        let junction = topo
            .node_for(LocalNode::new(ElementCode::new(0, 2), 0))
            .unwrap();
        let load = topo
            .node_for(LocalNode::new(ElementCode::new(0, 3), 0))
            .unwrap();
        assert_eq!(line_b, junction);
        assert_eq!(junction, load);
        // Two distinct nodes in total: the source side and the junction.
        assert_eq!(topo.node_count(), 2);
    }

    #[test]
    fn test_idempotent_resolution() {
        let drawings = sample_drawings();
        let first = resolve(&drawings).unwrap();
        let second = resolve(&drawings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_virtual_node_for_empty_group() {
        let drawings = vec![Drawing::new(vec![element(vec![
            vec![coord(0, 0)],
            vec![], // internal terminal, no external port
        ])])];
        let topo = resolve(&drawings).unwrap();
        assert_eq!(topo.virtual_nodes.len(), 1);

        let local = LocalNode::new(ElementCode::new(0, 0), 1);
        let node = topo.node_for(local).unwrap();
        assert!(topo.virtual_nodes.contains(&node));
        // Virtual nodes are not port-backed and stay out of the global set.
        assert!(!topo.global_nodes.contains(&node));
        assert!(topo.port_mapping.values().all(|n| *n != node));
    }

    #[test]
    fn test_cross_page_remote_reference() {
        let drawings = vec![
            Drawing::new(vec![element(vec![vec![
                coord(0, 0),
                PortRef::Remote("TIE".into()),
            ]])]),
            Drawing::new(vec![element(vec![vec![
                coord(0, 0),
                PortRef::Remote("TIE".into()),
            ]])]),
        ];
        let topo = resolve(&drawings).unwrap();
        // The shared token merges both pages into one node; the two (0,0)
        // coordinates are page-qualified and do not collide by themselves.
        let a = topo
            .node_for(LocalNode::new(ElementCode::new(0, 0), 0))
            .unwrap();
        let b = topo
            .node_for(LocalNode::new(ElementCode::new(1, 0), 0))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(topo.node_count(), 1);
    }

    #[test]
    fn test_same_coordinates_on_different_pages_stay_apart() {
        let drawings = vec![
            Drawing::new(vec![element(vec![vec![coord(3, 3)]])]),
            Drawing::new(vec![element(vec![vec![coord(3, 3)]])]),
        ];
        let topo = resolve(&drawings).unwrap();
        assert_eq!(topo.node_count(), 2);
    }

    #[test]
    fn test_every_port_is_mapped() {
        let drawings = sample_drawings();
        let topo = resolve(&drawings).unwrap();
        for (page, drawing) in drawings.iter().enumerate() {
            for el in &drawing.elements {
                for group in &el.groups {
                    for port in &group.ports {
                        let key = PortKey::from_ref(page, port);
                        assert!(topo.port_mapping.contains_key(&key));
                    }
                }
            }
        }
    }

    #[test]
    fn test_element_without_groups_is_valid() {
        let drawings = vec![Drawing::new(vec![Element::default()])];
        let topo = resolve(&drawings).unwrap();
        assert!(topo.node_mapping.is_empty());
        assert!(topo.global_nodes.is_empty());
    }

    #[test]
    fn test_empty_project() {
        let topo = resolve(&[]).unwrap();
        assert_eq!(topo, Topology::default());
    }

    #[test]
    fn test_duplicate_chain_across_junctions() {
        // Two junctions sharing the port at (5,0): all five positions
        // collapse into a single node.
        let drawings = vec![Drawing::new(vec![
            element(vec![vec![coord(0, 0), coord(5, 0), coord(0, 5)]]),
            element(vec![vec![coord(5, 0), coord(9, 0), coord(9, 5)]]),
        ])];
        let topo = resolve(&drawings).unwrap();
        assert_eq!(topo.node_count(), 1);
        let node = *topo.port_mapping.values().next().unwrap();
        assert!(topo.port_mapping.values().all(|n| *n == node));
    }
}
