//! The route-matching trie.
//!
//! This module provides [`PathTrie`], the primary interface for registering
//! route patterns and matching request paths against them.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::error::RouteError;
use crate::method_routes::ANY_METHOD;
use crate::node::{Node, NodeId, ParamName, ParamSlot, ParamSpec, RouteEntry};
use crate::params::Params;
use crate::pattern::{canonical_path, normalize_path, normalize_pattern, split_path, Segment};

/// Entries still in contention while unwinding a tree search.
type Candidates<'t, T> = SmallVec<[&'t RouteEntry<T>; 4]>;

/// How the trie treats differently named parameters at the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamPolicy {
    /// Accept them; the parameter slot is shared and the conflict is logged.
    #[default]
    Permissive,
    /// Reject the later registration with [`RouteError::ConflictingParam`].
    Strict,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t, T> {
    /// Payload of the matched route.
    pub data: &'t T,
    /// Pattern the matched route was registered with.
    pub pattern: &'t str,
    /// Extracted path parameters.
    pub params: Params,
}

/// A segment trie mapping `(method, path)` to registered payloads.
///
/// Each node holds literal children, at most one parameter child and at most
/// one wildcard child. Patterns without any dynamic segment are also indexed
/// by their full path, so most lookups never touch the tree.
///
/// # Example
///
/// ```rust
/// use waypath_router::PathTrie;
///
/// let mut trie = PathTrie::new();
/// trie.add("GET", "/users", "listUsers").unwrap();
/// trie.add("GET", "/users/:id", "getUser").unwrap();
/// trie.add("GET", "/files/**:path", "serveFile").unwrap();
///
/// let m = trie.find("GET", "/users/42").unwrap();
/// assert_eq!(*m.data, "getUser");
/// assert_eq!(m.params.get("id"), Some("42"));
///
/// let m = trie.find("GET", "/files/css/site.css").unwrap();
/// assert_eq!(m.params.get("path"), Some("css/site.css"));
///
/// assert!(trie.find("POST", "/users").is_none());
/// ```
///
/// # Route Priority
///
/// At every depth the trie tries, in order:
///
/// 1. **Static segments** (e.g., `/users/me`)
/// 2. **Parameter segments** (e.g., `/users/:id`); a parameter whose regex
///    matches the segment outranks one without a regex
/// 3. **Wildcard segments** (e.g., `/files/**`)
///
/// A failed deeper match backtracks to the next candidate at the same depth.
#[derive(Debug, Clone)]
pub struct PathTrie<T> {
    /// Node arena; index 0 is the root
    nodes: Vec<Node<T>>,
    /// Canonical path of every parameterless pattern to its node
    static_index: HashMap<String, NodeId>,
    /// Upper-cased method keys in first-registration order
    methods: Vec<String>,
    policy: ParamPolicy,
    route_count: usize,
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTrie<T> {
    /// Creates an empty trie with the permissive parameter policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(ParamPolicy::default())
    }

    /// Creates an empty trie with the given parameter policy.
    #[must_use]
    pub fn with_policy(policy: ParamPolicy) -> Self {
        Self {
            nodes: vec![Node::new()],
            static_index: HashMap::new(),
            methods: Vec::new(),
            policy,
            route_count: 0,
        }
    }

    /// Returns the parameter policy in force.
    pub fn policy(&self) -> ParamPolicy {
        self.policy
    }

    /// Registers `data` for `method` and `pattern`.
    ///
    /// An empty `method` registers the route for every method. Methods are
    /// case-insensitive. Segments after a `**` wildcard are ignored.
    ///
    /// A rejected pattern leaves the trie unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a segment is malformed, a constraint regex
    /// does not compile, or (under [`ParamPolicy::Strict`]) the pattern
    /// renames a parameter slot that is already in use.
    pub fn add(&mut self, method: &str, pattern: &str, data: T) -> Result<(), RouteError> {
        let pattern = normalize_pattern(pattern);
        let raw_segments = split_path(&pattern).into_vec();
        let segments = raw_segments
            .iter()
            .map(|segment| Segment::parse(&pattern, segment))
            .collect::<Result<Vec<_>, _>>()?;

        if self.policy == ParamPolicy::Strict {
            self.check_param_names(&pattern, &segments)?;
        }

        let mut node = NodeId::ROOT;
        let mut param_map = Vec::new();
        let mut param_patterns = Vec::new();
        let mut unnamed = 0usize;

        for (depth, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    node = self.static_child_or_insert(node, literal);
                }
                Segment::Wildcard { name, greedy } => {
                    node = self.wildcard_child_or_insert(node);
                    param_map.push(ParamSpec {
                        slot: ParamSlot::Tail(depth),
                        name: ParamName::Named((*name).to_string()),
                        greedy: *greedy,
                    });
                    if depth + 1 < segments.len() {
                        tracing::debug!(
                            pattern = %pattern,
                            ignored = segments.len() - depth - 1,
                            "segments after wildcard ignored"
                        );
                    }
                    break;
                }
                Segment::Unnamed => {
                    node = self.param_child_or_insert(node, &pattern, None);
                    param_map.push(ParamSpec {
                        slot: ParamSlot::Segment(depth),
                        name: ParamName::Named(format!("_{unnamed}")),
                        greedy: true,
                    });
                    unnamed += 1;
                }
                Segment::Named(name) => {
                    node = self.param_child_or_insert(node, &pattern, Some(*name));
                    param_map.push(ParamSpec {
                        slot: ParamSlot::Segment(depth),
                        name: ParamName::Named((*name).to_string()),
                        greedy: false,
                    });
                }
                Segment::Constrained { name, regex } => {
                    node = self.param_child_or_insert(node, &pattern, Some(*name));
                    self.nodes[node.index()].has_regex_param = true;
                    param_patterns.push((depth, regex.clone()));
                    param_map.push(ParamSpec {
                        slot: ParamSlot::Segment(depth),
                        name: ParamName::Pattern(regex.clone()),
                        greedy: false,
                    });
                }
            }
        }

        if param_map.is_empty() {
            self.static_index.insert(canonical_path(&raw_segments), node);
        }

        let key = method.to_ascii_uppercase();
        tracing::debug!(
            method = if key.is_empty() { "*" } else { key.as_str() },
            pattern = %pattern,
            params = param_map.len(),
            "route registered"
        );
        if !self.methods.contains(&key) {
            self.methods.push(key);
        }

        self.nodes[node.index()].routes.push(
            method,
            RouteEntry {
                data,
                pattern,
                param_map,
                param_patterns,
            },
        );
        self.route_count += 1;
        Ok(())
    }

    /// Finds the route for `method` and `path`.
    ///
    /// The path is normalized the same way patterns are; an empty path is
    /// `/`. Returns `None` when nothing matches, including when the path
    /// exists but neither `method` nor the any-method key is registered.
    #[must_use]
    pub fn find(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        let path = normalize_path(path);
        if let Some(entry) = self.find_static(method, path) {
            return Some(Match {
                data: &entry.data,
                pattern: &entry.pattern,
                params: Params::new(),
            });
        }

        let segments = split_path(path);
        let entry = self.find_in_tree(method, &segments)?;
        Some(Match {
            data: &entry.data,
            pattern: &entry.pattern,
            params: entry.extract_params(&segments),
        })
    }

    /// Finds the payload for `method` and `path` without extracting
    /// parameters.
    #[must_use]
    pub fn find_data(&self, method: &str, path: &str) -> Option<&T> {
        let path = normalize_path(path);
        if let Some(entry) = self.find_static(method, path) {
            return Some(&entry.data);
        }
        let segments = split_path(path);
        self.find_in_tree(method, &segments).map(|entry| &entry.data)
    }

    /// Returns the registered methods that would match `path`.
    ///
    /// If a route registered for any method matches, every method does and
    /// the result is just [`ANY_METHOD`]. Useful for telling a missing path
    /// apart from a missing method.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<&str> {
        if self.find_data(ANY_METHOD, path).is_some() {
            return vec![ANY_METHOD];
        }
        self.methods
            .iter()
            .filter(|method| !method.is_empty() && self.find_data(method, path).is_some())
            .map(String::as_str)
            .collect()
    }

    /// Returns the number of routes registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }

    /// Looks `path` up in the static index only.
    fn find_static(&self, method: &str, path: &str) -> Option<&RouteEntry<T>> {
        let id = self.static_index.get(path)?;
        self.nodes[id.index()].routes.lookup(method)?.first()
    }

    /// Runs the full tree search, skipping the static index.
    fn find_in_tree(&self, method: &str, segments: &[&str]) -> Option<&RouteEntry<T>> {
        let found = self.search(NodeId::ROOT, method, segments, 0);
        if found.is_none() {
            tracing::trace!(method, depth = segments.len(), "no route matched");
        }
        found.and_then(|candidates| candidates.first().copied())
    }

    /// Depth-first search below `id` for `segments[depth..]`.
    fn search<'t>(
        &'t self,
        id: NodeId,
        method: &str,
        segments: &[&str],
        depth: usize,
    ) -> Option<Candidates<'t, T>> {
        let node = &self.nodes[id.index()];
        let Some(&segment) = segments.get(depth) else {
            return self.search_end(node, method);
        };

        // Try static match first (highest priority)
        if let Some(child) = node.static_child(segment) {
            if let Some(found) = self.search(child, method, segments, depth + 1) {
                return Some(found);
            }
        }

        // Try parameter match; a matching constraint outranks no constraint
        if let Some(child) = node.param_child {
            if let Some(found) = self.search(child, method, segments, depth + 1) {
                if !self.nodes[child.index()].has_regex_param {
                    return Some(found);
                }
                let constrained: Candidates<'t, T> = found
                    .iter()
                    .copied()
                    .filter(|entry| entry.constraint_matches(depth, segment))
                    .collect();
                if !constrained.is_empty() {
                    return Some(constrained);
                }
                let unconstrained: Candidates<'t, T> = found
                    .into_iter()
                    .filter(|entry| entry.param_pattern(depth).is_none())
                    .collect();
                if !unconstrained.is_empty() {
                    return Some(unconstrained);
                }
            }
        }

        // Wildcard consumes everything left (lowest priority)
        let wildcard = node.wildcard_child?;
        let entries = self.nodes[wildcard.index()].routes.lookup(method)?;
        Some(entries.iter().collect())
    }

    /// Resolves a node once every segment has been consumed.
    fn search_end<'t>(&'t self, node: &'t Node<T>, method: &str) -> Option<Candidates<'t, T>> {
        if let Some(entries) = node.routes.lookup(method) {
            return Some(entries.iter().collect());
        }
        // A greedy parameter or wildcard child may match a zero-length tail
        [node.param_child, node.wildcard_child]
            .into_iter()
            .flatten()
            .filter_map(|child| self.nodes[child.index()].routes.lookup(method))
            .find(|entries| entries.first().is_some_and(RouteEntry::matches_empty_tail))
            .map(|entries| entries.iter().collect())
    }

    fn static_child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(child) = self.nodes[parent.index()].static_child(segment) {
            return child;
        }
        let child = self.push_node();
        self.nodes[parent.index()].insert_static_child(segment, child);
        child
    }

    fn param_child_or_insert(&mut self, parent: NodeId, pattern: &str, name: Option<&str>) -> NodeId {
        let child = match self.nodes[parent.index()].param_child {
            Some(child) => child,
            None => {
                let child = self.push_node();
                self.nodes[parent.index()].param_child = Some(child);
                child
            }
        };
        if let Some(name) = name {
            let slot = &mut self.nodes[child.index()].param_name;
            if let Some(existing) = slot.as_deref().filter(|existing| *existing != name) {
                tracing::warn!(
                    pattern,
                    existing,
                    new = name,
                    "parameter slot shared by differently named parameters"
                );
            }
            *slot = Some(name.to_string());
        }
        child
    }

    fn wildcard_child_or_insert(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.nodes[parent.index()].wildcard_child {
            return child;
        }
        let child = self.push_node();
        self.nodes[parent.index()].wildcard_child = Some(child);
        child
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        NodeId::new(self.nodes.len() - 1)
    }

    /// Walks the existing nodes along `segments` and rejects any parameter
    /// whose name differs from the one already holding its slot.
    fn check_param_names(&self, pattern: &str, segments: &[Segment<'_>]) -> Result<(), RouteError> {
        let mut node = &self.nodes[NodeId::ROOT.index()];
        for segment in segments {
            let next = match segment {
                Segment::Static(literal) => node.static_child(literal),
                Segment::Wildcard { .. } => return Ok(()),
                Segment::Unnamed | Segment::Named(_) | Segment::Constrained { .. } => {
                    let Some(child) = node.param_child else {
                        return Ok(());
                    };
                    let existing = self.nodes[child.index()].param_name.as_deref();
                    if let (Some(existing), Some(new)) = (existing, segment.slot_name()) {
                        if existing != new {
                            return Err(RouteError::ConflictingParam {
                                pattern: pattern.to_string(),
                                existing: existing.to_string(),
                                new: new.to_string(),
                            });
                        }
                    }
                    Some(child)
                }
            };
            match next {
                Some(id) => node = &self.nodes[id.index()],
                None => return Ok(()),
            }
        }
        Ok(())
    }

    /// Full tree search with the static index bypassed.
    #[cfg(test)]
    pub(crate) fn find_without_index(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        let segments = split_path(normalize_path(path));
        let entry = self.find_in_tree(method, &segments)?;
        Some(Match {
            data: &entry.data,
            pattern: &entry.pattern,
            params: entry.extract_params(&segments),
        })
    }
}
