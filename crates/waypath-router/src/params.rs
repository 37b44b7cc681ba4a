//! Path parameter extraction and storage.
//!
//! This module provides efficient storage for extracted path parameters
//! using a small-vector optimization to avoid heap allocations for
//! common cases (1-4 parameters).

use smallvec::SmallVec;

use crate::node::{ParamName, ParamSlot, ParamSpec};

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// Extracted path parameters from a route match.
///
/// Uses small-vector optimization to avoid heap allocation for common
/// cases with few parameters. Parameters are stored as (name, value) pairs
/// and names are unique: binding a name twice keeps the later value.
///
/// # Example
///
/// ```rust
/// use waypath_router::Params;
///
/// let mut params = Params::new();
/// params.insert("userId", "123");
/// params.insert("action", "view");
/// params.insert("action", "edit");
///
/// assert_eq!(params.get("userId"), Some("123"));
/// assert_eq!(params.get("action"), Some("edit"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    /// Storage for parameter (name, value) pairs
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates a new empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a params set with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Binds `name` to `value`, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.inner.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.inner.push((name, value)),
        }
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a parameter with this name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the parameters in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Recovers parameter values from the segments of a matched path.
///
/// `Segment` slots bind the segment at their depth (or `""` when the path
/// stopped short of it). `Tail` slots join every segment from their depth
/// onwards with `/`. Regex bindings copy all of their named capture groups.
pub(crate) fn extract(segments: &[&str], specs: &[ParamSpec]) -> Params {
    let mut params = Params::with_capacity(specs.len());
    for spec in specs {
        let value = match spec.slot {
            ParamSlot::Segment(depth) => segments.get(depth).copied().unwrap_or_default().to_string(),
            ParamSlot::Tail(depth) => segments.get(depth..).map(|tail| tail.join("/")).unwrap_or_default(),
        };
        match &spec.name {
            ParamName::Named(name) => params.insert(name.as_str(), value),
            ParamName::Pattern(regex) => {
                let Some(captures) = regex.captures(&value) else {
                    continue;
                };
                for name in regex.capture_names().flatten() {
                    if let Some(m) = captures.name(name) {
                        params.insert(name, m.as_str());
                    }
                }
            }
        }
    }
    params
}
