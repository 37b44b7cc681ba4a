//! Route pattern parsing and path normalization.
//!
//! Patterns and request paths go through the same normalization so that
//! `/a/` and `/a` always name the same route:
//!
//! - a leading `/` is added to patterns that lack one,
//! - trailing slashes are stripped (the root `/` is kept),
//! - empty segments (`//`) are skipped when splitting.

use regex::Regex;
use smallvec::SmallVec;

use crate::error::RouteError;

/// Number of path segments stored inline before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

/// Split path segments, borrowed from the input path.
pub(crate) type Segments<'p> = SmallVec<[&'p str; INLINE_SEGMENTS]>;

/// Name bound by a bare `**` wildcard.
pub(crate) const DEFAULT_WILDCARD_NAME: &str = "_";

/// One parsed segment of a route pattern.
#[derive(Debug, Clone)]
pub(crate) enum Segment<'p> {
    /// Literal text matched exactly.
    Static(&'p str),
    /// `*`: any single segment, bound under a generated `_N` name.
    Unnamed,
    /// `:name`: any single segment.
    Named(&'p str),
    /// `:name(regex)`: a single segment accepted only if the regex matches.
    Constrained {
        /// Parameter name (also the outer capture group name).
        name: &'p str,
        /// Compiled `^(?<name>regex)$`.
        regex: Regex,
    },
    /// `**` or `**:name`: everything from this depth to the end of the path.
    Wildcard {
        /// Bound parameter name.
        name: &'p str,
        /// Whether the wildcard also accepts an empty tail at its parent.
        greedy: bool,
    },
}

impl<'p> Segment<'p> {
    /// Parses a single non-empty segment of `pattern`.
    pub(crate) fn parse(pattern: &str, segment: &'p str) -> Result<Self, RouteError> {
        if segment == "**" {
            return Ok(Self::Wildcard {
                name: DEFAULT_WILDCARD_NAME,
                greedy: true,
            });
        }
        if let Some(rest) = segment.strip_prefix("**") {
            return match rest.strip_prefix(':') {
                Some(name) if !name.is_empty() => Ok(Self::Wildcard {
                    name,
                    greedy: false,
                }),
                _ => Err(RouteError::invalid_segment(
                    pattern,
                    segment,
                    "wildcard must be `**` or `**:name`",
                )),
            };
        }
        if segment == "*" {
            return Ok(Self::Unnamed);
        }
        let Some(body) = segment.strip_prefix(':') else {
            return Ok(Self::Static(segment));
        };
        if body.is_empty() {
            return Err(RouteError::invalid_segment(
                pattern,
                segment,
                "parameter name is empty",
            ));
        }

        match (body.find('('), body.strip_suffix(')')) {
            (Some(open), Some(inner)) => {
                let name = &body[..open];
                let constraint = &inner[open + 1..];
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                    return Err(RouteError::invalid_segment(
                        pattern,
                        segment,
                        "constrained parameter name must be alphanumeric or `_`",
                    ));
                }
                if constraint.is_empty() {
                    return Err(RouteError::invalid_segment(
                        pattern,
                        segment,
                        "parameter constraint is empty",
                    ));
                }
                let regex = Regex::new(&format!("^(?<{name}>{constraint})$")).map_err(|source| {
                    RouteError::InvalidRegex {
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;
                Ok(Self::Constrained { name, regex })
            }
            _ => Ok(Self::Named(body)),
        }
    }

    /// Parameter name this segment claims in its node's parameter slot.
    pub(crate) fn slot_name(&self) -> Option<&'p str> {
        match self {
            Self::Named(name) | Self::Constrained { name, .. } => Some(*name),
            _ => None,
        }
    }
}

/// Normalizes a request path: strips trailing slashes, maps `""` to `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Normalizes a route pattern: ensures a leading `/` and strips trailing ones.
#[must_use]
pub fn normalize_pattern(pattern: &str) -> String {
    let trimmed = normalize_path(pattern);
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Splits a path into its non-empty segments.
pub(crate) fn split_path(path: &str) -> Segments<'_> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Rebuilds the canonical form of a path from its segments.
pub(crate) fn canonical_path(segments: &[&str]) -> String {
    let mut path = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum::<usize>().max(1));
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}
