//! End-to-end: a routes directory on disk resolved through `App`.

use std::fs;
use std::path::Path;

use http::Method;
use waypath::config::{ConfigLoader, RouterConfig};
use waypath::{AppBuilder, AppError, Resolution, RouteKind};

fn write_routes(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }
}

fn handlers_for(file: &waypath::RouteFile) -> Vec<(Method, String)> {
    let name = file.route_path.clone();
    vec![
        (Method::GET, format!("GET {name}")),
        (Method::POST, format!("POST {name}")),
    ]
}

#[test]
fn test_discovered_routes_resolve() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(
        dir.path(),
        &[
            "index.ts",
            "users/index.ts",
            "users/[id].ts",
            "users/[id]/posts.tsx",
            "users/me.js",
            "README.md",
        ],
    );

    let config = RouterConfig {
        routes_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut builder: AppBuilder<String> = AppBuilder::from_config(config);
    let registered = builder.discover(handlers_for).unwrap();
    assert_eq!(registered, 5);
    builder.static_mount("/assets", "static".to_string()).unwrap();
    let app = builder.build();

    let cases = [
        ("/", "GET index.ts", None),
        ("/users", "GET users/index.ts", None),
        ("/users/", "GET users/index.ts", None),
        ("/users/me", "GET users/me.js", None),
        ("/users/42", "GET users/[id].ts", Some(("id", "42"))),
        ("/users/42/posts?page=2", "GET users/[id]/posts.tsx", Some(("id", "42"))),
    ];
    for (path, handler, param) in cases {
        let Resolution::Matched(m) = app.resolve(&Method::GET, path) else {
            panic!("{path} did not match");
        };
        assert_eq!(m.handler(), handler, "{path}");
        assert_eq!(m.route.kind, RouteKind::Handler);
        if let Some((name, value)) = param {
            assert_eq!(m.param(name), Some(value), "{path}");
        }
    }

    let Resolution::Matched(m) = app.resolve(&Method::GET, "/assets/img/logo.png") else {
        panic!("static mount did not match");
    };
    assert_eq!(m.handler(), "static");
    assert_eq!(m.param("_"), Some("img/logo.png"));

    assert_eq!(
        app.resolve(&Method::DELETE, "/users/42"),
        Resolution::MethodNotAllowed {
            allowed: vec![Method::GET, Method::POST]
        }
    );
    assert_eq!(app.resolve(&Method::GET, "/posts"), Resolution::NotFound);
}

#[test]
fn test_missing_routes_dir_registers_nothing() {
    let config = RouterConfig {
        routes_dir: "/nonexistent/waypath/routes".into(),
        ..Default::default()
    };
    let mut builder: AppBuilder<String> = AppBuilder::from_config(config);
    assert_eq!(builder.discover(handlers_for).unwrap(), 0);
    assert!(builder.build().is_empty());
}

#[test]
fn test_discover_fails_on_file_without_handlers() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path(), &["empty.ts"]);

    let config = RouterConfig {
        routes_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut builder: AppBuilder<()> = AppBuilder::from_config(config);
    let err = builder.discover(|_| Vec::new()).unwrap_err();
    assert!(matches!(err, AppError::NoMethods { ref route_path } if route_path == "empty.ts"));
}

#[test]
fn test_configured_extensions_and_strict_params() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path(), &["users/[id].ts", "users/[name]/posts.ts", "skip.js"]);

    let toml = format!(
        "[router]\nroutes_dir = {:?}\nextensions = [\"ts\"]\nstrict_params = true\n",
        dir.path().display().to_string()
    );
    let config = ConfigLoader::new().with_string(&toml, "toml").unwrap().load().unwrap();

    let mut builder: AppBuilder<String> = AppBuilder::from_config(config.router);
    let err = builder.discover(handlers_for).unwrap_err();
    assert!(matches!(err, AppError::Route(_)));
}
