//! Route registration errors.

use thiserror::Error;

/// Errors that can occur while registering a route pattern.
///
/// Lookups never fail: a path with no matching route is reported as `None`
/// by [`PathTrie::find`](crate::PathTrie::find). Only construction can go
/// wrong, and callers are expected to abort startup when it does.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A constrained parameter carried a regex that does not compile.
    #[error("invalid regex in route pattern {pattern}: {source}")]
    InvalidRegex {
        /// The full route pattern being registered.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A dynamic segment is not well formed.
    #[error("invalid segment `{segment}` in route pattern {pattern}: {reason}")]
    InvalidSegment {
        /// The full route pattern being registered.
        pattern: String,
        /// The offending segment.
        segment: String,
        /// Why the segment was rejected.
        reason: &'static str,
    },

    /// Two different parameter names were registered at the same depth
    /// while the strict parameter policy was active.
    #[error(
        "route pattern {pattern} binds parameter `{new}` where `{existing}` is already registered"
    )]
    ConflictingParam {
        /// The full route pattern being registered.
        pattern: String,
        /// Name already occupying the parameter slot.
        existing: String,
        /// Name the new pattern tried to use.
        new: String,
    },
}

impl RouteError {
    pub(crate) fn invalid_segment(
        pattern: impl Into<String>,
        segment: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidSegment {
            pattern: pattern.into(),
            segment: segment.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_segment_display() {
        let err = RouteError::invalid_segment("/users/:", ":", "parameter name is empty");
        let msg = err.to_string();
        assert!(msg.contains("/users/:"));
        assert!(msg.contains("parameter name is empty"));
    }

    #[test]
    fn test_conflicting_param_display() {
        let err = RouteError::ConflictingParam {
            pattern: "/users/:name".to_string(),
            existing: "id".to_string(),
            new: "name".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`name`"));
        assert!(msg.contains("`id`"));
    }

    #[test]
    fn test_invalid_regex_has_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = RouteError::InvalidRegex {
            pattern: "/item/:id(()".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
