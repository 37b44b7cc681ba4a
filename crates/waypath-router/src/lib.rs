//! Segment trie route matcher for Waypath.
//!
//! This crate maps `(method, path)` pairs to registered payloads. Patterns
//! are split on `/` and stored one segment per trie level, and patterns
//! without dynamic segments are additionally indexed by their full path so
//! that most lookups are a single hash lookup.
//!
//! # Pattern Syntax
//!
//! | Segment        | Matches                           | Binds                      |
//! |----------------|-----------------------------------|----------------------------|
//! | `users`        | the literal `users`               | nothing                    |
//! | `:id`          | any single segment                | `id`                       |
//! | `:id(\d+)`     | a single segment matching `\d+`   | `id` and any inner groups  |
//! | `*`            | any single segment, or none       | `_0`, `_1`, ...            |
//! | `**`           | the rest of the path, may be empty| `_`                        |
//! | `**:path`      | the rest of the path, non-empty   | `path`                     |
//!
//! # Example
//!
//! ```rust
//! use waypath_router::PathTrie;
//!
//! let mut trie = PathTrie::new();
//!
//! trie.add("GET", "/users", "listUsers").unwrap();
//! trie.add("POST", "/users", "createUser").unwrap();
//! trie.add("GET", r"/users/:id(\d+)", "getUser").unwrap();
//! trie.add("GET", "/users/:name", "getUserByName").unwrap();
//! trie.add("", "/assets/**", "assets").unwrap();
//!
//! let m = trie.find("GET", "/users/123").unwrap();
//! assert_eq!(*m.data, "getUser");
//! assert_eq!(m.params.get("id"), Some("123"));
//!
//! let m = trie.find("GET", "/users/alice").unwrap();
//! assert_eq!(*m.data, "getUserByName");
//!
//! let m = trie.find("HEAD", "/assets/css/site.css").unwrap();
//! assert_eq!(m.params.get("_"), Some("css/site.css"));
//!
//! assert_eq!(trie.allowed_methods("/users"), vec!["GET", "POST"]);
//! ```
//!
//! # Architecture
//!
//! ```text
//!                    (root)
//!                      │
//!              ┌───────┴───────┐
//!              │               │
//!           "users"        "assets"
//!          [GET,POST]          │
//!              │              "**"
//!           (param)          [*]
//!           [GET x2]
//!
//!   static index: "/users" ──► users node
//! ```
//!
//! At each depth a lookup tries the literal child, then the parameter
//! child, then the wildcard child, backtracking when a deeper level fails.

mod error;
mod method_routes;
mod node;
mod params;
mod pattern;
mod trie;

pub use error::RouteError;
pub use method_routes::ANY_METHOD;
pub use node::{ParamName, ParamSlot, ParamSpec, RouteEntry};
pub use params::Params;
pub use pattern::{normalize_path, normalize_pattern};
pub use trie::{Match, ParamPolicy, PathTrie};
