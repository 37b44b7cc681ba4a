//! Trie nodes and the route entries stored on them.
//!
//! Nodes live in an arena owned by [`PathTrie`](crate::PathTrie) and refer
//! to each other by [`NodeId`]. This lets the static fast-path index point
//! straight at a node without shared ownership.

use regex::Regex;

use crate::method_routes::MethodRoutes;
use crate::params::{self, Params};

/// Index of a node in the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The root node, always present.
    pub(crate) const ROOT: Self = Self(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Where a parameter's value comes from in the matched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    /// The single segment at this depth.
    Segment(usize),
    /// Every segment from this depth to the end, joined with `/`.
    Tail(usize),
}

/// How a parameter's value is bound.
#[derive(Debug, Clone)]
pub enum ParamName {
    /// Bound under this name as-is.
    Named(String),
    /// Run against the segment; every named capture group becomes a parameter.
    Pattern(Regex),
}

/// One dynamic segment of a registered pattern.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Position of the value in the matched path.
    pub slot: ParamSlot,
    /// Binding for the value.
    pub name: ParamName,
    /// Whether the route may also match when this parameter is absent
    /// (a zero-length tail at the end of the path).
    pub greedy: bool,
}

/// A single registration landing on a node.
#[derive(Debug, Clone)]
pub struct RouteEntry<T> {
    pub(crate) data: T,
    pub(crate) pattern: String,
    pub(crate) param_map: Vec<ParamSpec>,
    pub(crate) param_patterns: Vec<(usize, Regex)>,
}

impl<T> RouteEntry<T> {
    /// The payload supplied at registration.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The normalized pattern this entry was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// How to recover parameters from a matched path, in pattern order.
    pub fn param_map(&self) -> &[ParamSpec] {
        &self.param_map
    }

    /// Regex constraining the segment at `depth`, if any.
    pub fn param_pattern(&self, depth: usize) -> Option<&Regex> {
        self.param_patterns
            .iter()
            .find(|(d, _)| *d == depth)
            .map(|(_, re)| re)
    }

    /// Whether this entry is constrained at `depth` and `segment` satisfies it.
    pub(crate) fn constraint_matches(&self, depth: usize, segment: &str) -> bool {
        self.param_pattern(depth)
            .is_some_and(|re| re.is_match(segment))
    }

    /// Whether the last parameter may be absent from the path.
    pub(crate) fn matches_empty_tail(&self) -> bool {
        self.param_map.last().is_some_and(|spec| spec.greedy)
    }

    pub(crate) fn extract_params(&self, segments: &[&str]) -> Params {
        if self.param_map.is_empty() {
            return Params::new();
        }
        params::extract(segments, &self.param_map)
    }
}

/// A node in the segment trie.
///
/// A node has at most one parameter child and at most one wildcard child;
/// every dynamic segment at the same depth shares those slots.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Literal children, sorted by segment for binary search.
    pub(crate) static_children: Vec<(String, NodeId)>,
    pub(crate) param_child: Option<NodeId>,
    pub(crate) wildcard_child: Option<NodeId>,
    /// Set on a parameter child when some entry below it carries a regex
    /// for this depth.
    pub(crate) has_regex_param: bool,
    /// Name of the last named parameter registered through this slot.
    pub(crate) param_name: Option<String>,
    pub(crate) routes: MethodRoutes<T>,
}

impl<T> Node<T> {
    pub(crate) fn new() -> Self {
        Self {
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
            has_regex_param: false,
            param_name: None,
            routes: MethodRoutes::new(),
        }
    }

    /// Finds a literal child by segment using binary search.
    pub(crate) fn static_child(&self, segment: &str) -> Option<NodeId> {
        self.static_children
            .binary_search_by(|(s, _)| s.as_str().cmp(segment))
            .ok()
            .map(|i| self.static_children[i].1)
    }

    /// Inserts a literal child, keeping the children sorted.
    pub(crate) fn insert_static_child(&mut self, segment: &str, id: NodeId) {
        let pos = self
            .static_children
            .binary_search_by(|(s, _)| s.as_str().cmp(segment))
            .unwrap_or_else(|pos| pos);
        self.static_children.insert(pos, (segment.to_string(), id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(param_map: Vec<ParamSpec>, param_patterns: Vec<(usize, Regex)>) -> RouteEntry<&'static str> {
        RouteEntry {
            data: "handler",
            pattern: "/test".to_string(),
            param_map,
            param_patterns,
        }
    }

    #[test]
    fn test_static_children_stay_sorted() {
        let mut node: Node<()> = Node::new();
        node.insert_static_child("users", NodeId::new(1));
        node.insert_static_child("api", NodeId::new(2));
        node.insert_static_child("posts", NodeId::new(3));

        let keys: Vec<_> = node.static_children.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(keys, vec!["api", "posts", "users"]);
        assert_eq!(node.static_child("posts"), Some(NodeId::new(3)));
        assert_eq!(node.static_child("missing"), None);
    }

    #[test]
    fn test_constraint_matches_needs_a_constraint() {
        let e = entry(Vec::new(), Vec::new());
        assert!(!e.constraint_matches(0, "anything"));
    }

    #[test]
    fn test_constraint_matches_with_constraint() {
        let re = Regex::new(r"^(?<id>\d+)$").unwrap();
        let e = entry(Vec::new(), vec![(1, re)]);
        assert!(e.constraint_matches(1, "42"));
        assert!(!e.constraint_matches(1, "abc"));
        // other depths carry no constraint
        assert!(!e.constraint_matches(0, "abc"));
        assert!(e.param_pattern(0).is_none());
    }

    #[test]
    fn test_matches_empty_tail() {
        let greedy = entry(
            vec![ParamSpec {
                slot: ParamSlot::Tail(1),
                name: ParamName::Named("_".to_string()),
                greedy: true,
            }],
            Vec::new(),
        );
        assert!(greedy.matches_empty_tail());

        let named = entry(
            vec![ParamSpec {
                slot: ParamSlot::Segment(1),
                name: ParamName::Named("id".to_string()),
                greedy: false,
            }],
            Vec::new(),
        );
        assert!(!named.matches_empty_tail());
        assert!(!entry(Vec::new(), Vec::new()).matches_empty_tail());
    }

    #[test]
    fn test_entry_accessors() {
        let e = entry(Vec::new(), Vec::new());
        assert_eq!(*e.data(), "handler");
        assert_eq!(e.pattern(), "/test");
        assert!(e.param_map().is_empty());
        assert!(e.param_pattern(0).is_none());
    }
}
