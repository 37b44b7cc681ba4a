//! Behavioural properties of `PathTrie` lookups.

use proptest::prelude::*;
use waypath_router::{ParamPolicy, PathTrie, RouteError};

fn sample_trie() -> PathTrie<&'static str> {
    let mut trie = PathTrie::new();
    for (method, pattern, data) in [
        ("GET", "/", "root"),
        ("GET", "/users", "listUsers"),
        ("POST", "/users", "createUser"),
        ("GET", r"/users/:id(\d+)", "getUser"),
        ("GET", "/users/:name", "getUserByName"),
        ("GET", "/users/:id/posts/*", "userPosts"),
        ("", "/assets/**", "assets"),
        ("GET", "/docs/**:page", "docs"),
    ] {
        trie.add(method, pattern, data).unwrap();
    }
    trie
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.~-]{1,12}"
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("users".to_string()),
            Just("assets".to_string()),
            Just("docs".to_string()),
            Just("posts".to_string()),
            segment(),
        ],
        0..5,
    )
    .prop_map(|segments| format!("/{}", segments.join("/")))
}

proptest! {
    #[test]
    fn find_is_idempotent(path in path()) {
        let trie = sample_trie();
        prop_assert_eq!(trie.find("GET", &path), trie.find("GET", &path));
    }

    #[test]
    fn trailing_slash_is_ignored(path in path()) {
        let trie = sample_trie();
        let slashed = format!("{path}/");
        prop_assert_eq!(trie.find("GET", &path), trie.find("GET", &slashed));
    }

    #[test]
    fn find_data_agrees_with_find(path in path(), method in prop_oneof![Just("GET"), Just("POST"), Just("PUT")]) {
        let trie = sample_trie();
        prop_assert_eq!(trie.find_data(method, &path), trie.find(method, &path).map(|m| m.data));
    }

    #[test]
    fn registered_static_paths_are_found(segments in prop::collection::hash_set(segment(), 1..20)) {
        let mut trie = PathTrie::new();
        let paths: Vec<String> = segments.iter().map(|s| format!("/static/{s}")).collect();
        for path in &paths {
            trie.add("GET", path, path.clone()).unwrap();
        }
        for path in &paths {
            let m = trie.find("GET", path).unwrap();
            prop_assert_eq!(m.data, path);
            prop_assert!(m.params.is_empty());
        }
    }

    #[test]
    fn named_param_binds_segment(value in segment()) {
        let mut trie = PathTrie::new();
        trie.add("GET", "/users/:id", ()).unwrap();
        let m = trie.find("GET", &format!("/users/{value}")).unwrap();
        prop_assert_eq!(m.params.get("id"), Some(value.as_str()));
    }

    #[test]
    fn wildcard_binds_tail(tail in prop::collection::vec(segment(), 1..6)) {
        let trie = sample_trie();
        let joined = tail.join("/");
        let m = trie.find("DELETE", &format!("/assets/{joined}")).unwrap();
        prop_assert_eq!(*m.data, "assets");
        prop_assert_eq!(m.params.get("_"), Some(joined.as_str()));
    }

    #[test]
    fn constrained_param_gates_on_regex(id in 0u64..1_000_000, name in "[a-z]{1,10}") {
        let trie = sample_trie();

        let m = trie.find("GET", &format!("/users/{id}")).unwrap();
        prop_assert_eq!(*m.data, "getUser");
        let id = id.to_string();
        prop_assert_eq!(m.params.get("id"), Some(id.as_str()));

        let m = trie.find("GET", &format!("/users/{name}")).unwrap();
        prop_assert_eq!(*m.data, "getUserByName");
        prop_assert_eq!(m.params.get("name"), Some(name.as_str()));
    }
}

#[test]
fn test_priority_static_param_wildcard() {
    let mut trie = PathTrie::new();
    trie.add("GET", "/a/b", "static").unwrap();
    trie.add("GET", "/a/:x", "param").unwrap();
    trie.add("GET", "/a/**", "wildcard").unwrap();

    assert_eq!(trie.find("GET", "/a/b").map(|m| *m.data), Some("static"));
    assert_eq!(trie.find("GET", "/a/c").map(|m| *m.data), Some("param"));
    assert_eq!(trie.find("GET", "/a/c/d").map(|m| *m.data), Some("wildcard"));
    assert_eq!(trie.find("GET", "/a").map(|m| *m.data), Some("wildcard"));
}

#[test]
fn test_sample_routes() {
    let trie = sample_trie();

    assert_eq!(trie.find("GET", "/").map(|m| *m.data), Some("root"));
    assert_eq!(trie.find("POST", "/users/").map(|m| *m.data), Some("createUser"));

    let m = trie.find("GET", "/users/7/posts/3").unwrap();
    assert_eq!(*m.data, "userPosts");
    assert_eq!(m.params.get("id"), Some("7"));
    assert_eq!(m.params.get("_0"), Some("3"));

    // trailing `*` may be absent
    let m = trie.find("GET", "/users/7/posts").unwrap();
    assert_eq!(*m.data, "userPosts");
    assert_eq!(m.params.get("_0"), Some(""));

    // named wildcard needs at least one segment
    assert!(trie.find("GET", "/docs").is_none());
    let m = trie.find("GET", "/docs/guide/intro").unwrap();
    assert_eq!(m.params.get("page"), Some("guide/intro"));

    assert!(trie.find("PATCH", "/users").is_none());
    assert_eq!(trie.allowed_methods("/users"), vec!["GET", "POST"]);
    assert_eq!(trie.allowed_methods("/assets/x"), vec![""]);
    assert!(trie.allowed_methods("/nowhere/else").is_empty());
    assert_eq!(trie.len(), 8);
}

#[test]
fn test_strict_policy_rejects_renamed_slot() {
    let mut trie = PathTrie::with_policy(ParamPolicy::Strict);
    trie.add("GET", "/users/:id", 1).unwrap();
    trie.add("GET", "/users/*", 2).unwrap();

    let err = trie.add("PUT", "/users/:userId", 3).unwrap_err();
    assert!(matches!(err, RouteError::ConflictingParam { .. }));
    assert_eq!(trie.len(), 2);
}

#[test]
fn test_malformed_patterns_rejected() {
    let mut trie = PathTrie::new();
    for pattern in ["/a/:", "/a/**x", "/a/:id([)", "/a/:id()"] {
        assert!(trie.add("GET", pattern, ()).is_err(), "{pattern}");
    }
    assert!(trie.is_empty());
}
