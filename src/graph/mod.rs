pub mod edge;

use std::collections::HashSet;

use edge::{DependencyEdge, EdgeKind};

/// Ordered, de-duplicated collection of dependency edges.
///
/// Uniqueness is on `(from, to, type)`. The first edge seen for a key is kept in its original
/// position; later duplicates are dropped along with their `strength`, `line` and `context`.
#[derive(Debug, Default)]
pub struct DependencySet {
    edges: Vec<DependencyEdge>,
    seen: HashSet<(String, String, EdgeKind)>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge. Returns `false` if an edge with the same key was already present.
    pub fn insert(&mut self, edge: DependencyEdge) -> bool {
        let key = (edge.from.clone(), edge.to.clone(), edge.kind);
        if !self.seen.insert(key) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Edges in first-seen order.
    pub fn into_edges(self) -> Vec<DependencyEdge> {
        self.edges
    }
}

impl Extend<DependencyEdge> for DependencySet {
    fn extend<I: IntoIterator<Item = DependencyEdge>>(&mut self, iter: I) {
        for edge in iter {
            self.insert(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, kind: EdgeKind, line: usize) -> DependencyEdge {
        DependencyEdge::new(from, to.to_owned(), kind, line, format!("line {line}"))
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let mut set = DependencySet::new();
        assert!(set.insert(edge("a.py", "b.py", EdgeKind::Import, 1)));
        assert!(!set.insert(edge("a.py", "b.py", EdgeKind::Import, 9)));
        let edges = set.into_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].line, 1, "first occurrence metadata survives");
        assert_eq!(edges[0].context, "line 1");
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let mut set = DependencySet::new();
        set.insert(edge("a.py", "b.py", EdgeKind::Import, 1));
        set.insert(edge("a.py", "b.py", EdgeKind::FromImport, 2));
        set.insert(edge("b.py", "a.py", EdgeKind::Import, 3));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_order_is_first_seen() {
        let mut set = DependencySet::new();
        set.extend([
            edge("a.py", "c.py", EdgeKind::Import, 1),
            edge("a.py", "b.py", EdgeKind::Import, 2),
            edge("a.py", "c.py", EdgeKind::Import, 3),
            edge("a.py", "d.py", EdgeKind::Import, 4),
        ]);
        let targets: Vec<_> = set.into_edges().into_iter().map(|e| e.to).collect();
        assert_eq!(targets, vec!["c.py", "b.py", "d.py"]);
    }
}
