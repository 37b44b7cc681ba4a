//! File-based route discovery.
//!
//! A routes directory is mapped onto URL patterns by file path:
//!
//! | File                      | Pattern            |
//! |---------------------------|--------------------|
//! | `index.ts`                | `/`                |
//! | `about.ts`                | `/about`           |
//! | `users/index.ts`          | `/users`           |
//! | `users/[id].ts`           | `/users/:id`       |
//! | `orgs/[org]/members.js`   | `/orgs/:org/members` |
//!
//! Loading the files is left to the caller; discovery only lists them and
//! computes their patterns.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use waypath_router::normalize_pattern;

use crate::error::DiscoveryError;

/// A route file found under the routes directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    /// Full path to the file.
    pub file: PathBuf,
    /// Path relative to the routes directory, `/`-separated.
    pub route_path: String,
    /// Route pattern derived from `route_path`.
    pub pattern: String,
}

/// Translates a route file path into a route pattern.
///
/// Returns `None` when the extension is not in `extensions` or the file
/// name contains characters outside `[a-zA-Z0-9_[].~-+]`.
///
/// # Example
///
/// ```rust
/// use waypath::discovery::pattern_from_route_path;
///
/// let exts = ["ts"];
/// assert_eq!(pattern_from_route_path("users/[id].ts", &exts).as_deref(), Some("/users/:id"));
/// assert_eq!(pattern_from_route_path("users/index.ts", &exts).as_deref(), Some("/users"));
/// assert_eq!(pattern_from_route_path("users/list.rs", &exts), None);
/// ```
pub fn pattern_from_route_path<S: AsRef<str>>(route_path: &str, extensions: &[S]) -> Option<String> {
    let (without_ext, ext) = route_path.rsplit_once('.')?;
    if !extensions.iter().any(|allowed| allowed.as_ref() == ext) {
        return None;
    }

    let file_stem = without_ext.rsplit('/').next().unwrap_or(without_ext);
    if file_stem.is_empty() || !file_stem.bytes().all(is_route_name_byte) {
        return None;
    }

    let pattern = format!("/{}", bracket_params_to_colons(without_ext));
    match pattern.strip_suffix("/index") {
        Some(parent) => Some(normalize_pattern(parent)),
        None => Some(pattern),
    }
}

/// Lists every route file under `dir`, sorted by route path.
///
/// Files whose extension is not listed (exact, case-sensitive match) are
/// skipped, as are files whose name does not translate to a pattern.
/// Symlinked directories are not descended into. A missing `dir` yields an
/// empty list.
///
/// # Errors
///
/// Returns [`DiscoveryError::ReadDir`] if a directory exists but cannot be
/// listed.
pub fn scan_route_files<S: AsRef<str>>(
    dir: impl AsRef<Path>,
    extensions: &[S],
) -> Result<Vec<RouteFile>, DiscoveryError> {
    let mut files = Vec::new();
    scan_dir(dir.as_ref(), "", extensions, &mut files)?;
    files.sort_by(|a, b| a.route_path.cmp(&b.route_path));
    tracing::debug!(count = files.len(), "route files discovered");
    Ok(files)
}

fn scan_dir<S: AsRef<str>>(
    dir: &Path,
    base: &str,
    extensions: &[S],
    files: &mut Vec<RouteFile>,
) -> Result<(), DiscoveryError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(DiscoveryError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %path.display(), "skipping route file with non UTF-8 name");
            continue;
        };
        let route_path = if base.is_empty() {
            name.clone()
        } else {
            format!("{base}/{name}")
        };

        let file_type = entry.file_type().map_err(|source| DiscoveryError::ReadDir {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            scan_dir(&path, &route_path, extensions, files)?;
            continue;
        }

        let ext = name.rsplit_once('.').map(|(_, ext)| ext);
        if !ext.is_some_and(|ext| extensions.iter().any(|allowed| allowed.as_ref() == ext)) {
            continue;
        }

        match pattern_from_route_path(&route_path, extensions) {
            Some(pattern) => {
                tracing::debug!(file = %route_path, pattern = %pattern, "route file discovered");
                files.push(RouteFile {
                    file: path,
                    route_path,
                    pattern,
                });
            }
            None => {
                tracing::debug!(file = %route_path, "file name does not map to a route, skipped");
            }
        }
    }
    Ok(())
}

fn is_route_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'[' | b']' | b'.' | b'~' | b'-' | b'+')
}

/// Rewrites every `[name]` as `:name`. Empty brackets are left alone.
fn bracket_params_to_colons(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push(':');
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
