//! Path-scoped middleware registration.
//!
//! Middleware bodies belong to the caller; this module only records which
//! middleware applies to which request paths and in what order.
//!
//! ## Scopes
//!
//! | Registered path | Applies to                                  |
//! |-----------------|---------------------------------------------|
//! | `""` or `*`     | every request                               |
//! | `/api/**`       | every path starting with `/api`             |
//! | `/login`        | exactly `/login` (trailing `/` ignored)     |

use waypath_router::{normalize_path, normalize_pattern};

/// Which request paths a middleware applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareScope {
    /// Every request.
    Global,
    /// Every path that starts with this base (the pattern minus `/**`).
    Prefix(String),
    /// Only this exact path.
    Exact(String),
}

impl MiddlewareScope {
    /// Parses a registration path into a scope.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        if path.is_empty() || path == "*" {
            return Self::Global;
        }
        match path.strip_suffix("/**") {
            Some(base) => Self::Prefix(base.to_string()),
            None => Self::Exact(normalize_pattern(path)),
        }
    }

    /// Whether a request for `path` falls inside this scope.
    ///
    /// `path` must already be stripped of its query string.
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Prefix(base) => path.starts_with(base.as_str()),
            Self::Exact(exact) => normalize_path(path) == exact.as_str(),
        }
    }
}

/// Middleware in registration order, each tagged with its scope.
#[derive(Debug, Clone)]
pub(crate) struct MiddlewareStack<M> {
    entries: Vec<(MiddlewareScope, M)>,
}

impl<M> Default for MiddlewareStack<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M> MiddlewareStack<M> {
    pub(crate) fn push(&mut self, path: &str, middleware: M) {
        let scope = MiddlewareScope::parse(path);
        tracing::debug!(path, scope = ?scope, "middleware registered");
        self.entries.push((scope, middleware));
    }

    /// Middleware applying to `path`, in registration order.
    pub(crate) fn matching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a M> + 'a {
        self.entries
            .iter()
            .filter(move |(scope, _)| scope.applies_to(path))
            .map(|(_, middleware)| middleware)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
