//! Per-node HTTP method tables.
//!
//! This module provides [`MethodRoutes`] which maps an upper-cased method
//! name to the ordered list of entries registered for it on one node. The
//! empty key [`ANY_METHOD`] holds routes that answer every method.

use crate::node::RouteEntry;

/// Method key for routes registered without a method.
pub const ANY_METHOD: &str = "";

/// Maps HTTP methods to the route entries registered on a single node.
///
/// Lists keep insertion order; the first entry accepted at lookup time wins.
#[derive(Debug, Clone)]
pub(crate) struct MethodRoutes<T> {
    entries: Vec<(String, Vec<RouteEntry<T>>)>,
}

impl<T> MethodRoutes<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry under `method` (upper-cased on the way in).
    pub(crate) fn push(&mut self, method: &str, entry: RouteEntry<T>) {
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(method))
        {
            Some((_, list)) => list.push(entry),
            None => self
                .entries
                .push((method.to_ascii_uppercase(), vec![entry])),
        }
    }

    /// Returns the entries registered exactly for `method`.
    pub(crate) fn get(&self, method: &str) -> Option<&[RouteEntry<T>]> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(method))
            .map(|(_, list)| list.as_slice())
    }

    /// Returns the entries for `method`, falling back to the any-method list.
    pub(crate) fn lookup(&self, method: &str) -> Option<&[RouteEntry<T>]> {
        self.get(method).or_else(|| self.get(ANY_METHOD))
    }

    /// Returns true if no entries are registered.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
