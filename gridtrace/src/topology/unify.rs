//! Duplicate-Port Unifier
//!
//! Junction and connector elements declare groups of ports that are
//! electrically identical. Group membership chains: a port shared by two
//! groups pulls both groups into one equivalence class, so the merge is a
//! connected-components problem over all declared groups, not a pairwise
//! dictionary union. A union-find over interned port keys is sufficient;
//! consecutive members of a group are linked as a path, which already
//! forces the whole group into one component.

use std::collections::HashMap;

use crate::schematic::PortKey;

/// Disjoint-set over dense indices with path compression.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new() -> Self {
        Self { parent: Vec::new() }
    }

    /// Add a fresh singleton and return its index.
    fn push(&mut self) -> usize {
        let i = self.parent.len();
        self.parent.push(i);
        i
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            let root = self.find(self.parent[i]);
            self.parent[i] = root;
        }
        self.parent[i]
    }

    fn unite(&mut self, i: usize, j: usize) {
        let ri = self.find(i);
        let rj = self.find(j);
        if ri != rj {
            self.parent[ri] = rj;
        }
    }
}

/// Merge duplicate-port groups into the coarsest partition in which two
/// port keys share a class iff a chain of group memberships connects them.
///
/// Classes are returned in first-seen order of their earliest member, and
/// members within a class keep first-seen order, so repeated runs over the
/// same input produce the same partition in the same order. An empty input
/// yields an empty partition.
pub fn merge_duplicate_groups(groups: &[Vec<PortKey>]) -> Vec<Vec<PortKey>> {
    let mut indices: HashMap<&PortKey, usize> = HashMap::new();
    let mut ports: Vec<&PortKey> = Vec::new();
    let mut sets = UnionFind::new();

    for group in groups {
        let mut prev: Option<usize> = None;
        for port in group {
            let idx = *indices.entry(port).or_insert_with(|| {
                ports.push(port);
                sets.push()
            });
            if let Some(p) = prev {
                sets.unite(p, idx);
            }
            prev = Some(idx);
        }
    }

    // Collect components keyed by root, ordered by first member appearance.
    let mut class_of_root: HashMap<usize, usize> = HashMap::new();
    let mut classes: Vec<Vec<PortKey>> = Vec::new();
    for i in 0..ports.len() {
        let root = sets.find(i);
        let class = *class_of_root.entry(root).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[class].push(ports[i].clone());
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(token: &str) -> PortKey {
        PortKey::Remote(token.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_duplicate_groups(&[]).is_empty());
    }

    #[test]
    fn test_disjoint_groups_stay_separate() {
        let groups = vec![vec![key("a"), key("b")], vec![key("c"), key("d")]];
        let classes = merge_duplicate_groups(&groups);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0], vec![key("a"), key("b")]);
        assert_eq!(classes[1], vec![key("c"), key("d")]);
    }

    #[test]
    fn test_transitive_merge() {
        // [A,B] and [B,C] chain into one class {A,B,C}.
        let groups = vec![vec![key("a"), key("b")], vec![key("b"), key("c")]];
        let classes = merge_duplicate_groups(&groups);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0], vec![key("a"), key("b"), key("c")]);
    }

    #[test]
    fn test_chain_across_three_groups() {
        let groups = vec![
            vec![key("a"), key("b")],
            vec![key("c"), key("d")],
            vec![key("b"), key("c")],
        ];
        let classes = merge_duplicate_groups(&groups);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 4);
    }

    #[test]
    fn test_multiway_group_is_one_component() {
        let groups = vec![vec![key("a"), key("b"), key("c"), key("d")]];
        let classes = merge_duplicate_groups(&groups);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 4);
    }

    #[test]
    fn test_order_is_deterministic() {
        let groups = vec![
            vec![key("x"), key("y")],
            vec![key("p"), key("q")],
            vec![key("y"), key("z")],
        ];
        let first = merge_duplicate_groups(&groups);
        let second = merge_duplicate_groups(&groups);
        assert_eq!(first, second);
        // Class order follows first appearance: the x/y/z chain before p/q.
        assert_eq!(first[0][0], key("x"));
        assert_eq!(first[1][0], key("p"));
    }

    #[test]
    fn test_mixed_key_kinds_merge() {
        let coord = PortKey::Coord { page: 0, x: 1, y: 1 };
        let groups = vec![
            vec![coord.clone(), key("tie")],
            vec![key("tie"), PortKey::Coord { page: 1, x: 9, y: 9 }],
        ];
        let classes = merge_duplicate_groups(&groups);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].len(), 3);
    }
}
