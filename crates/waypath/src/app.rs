//! Application context: route registration and request resolution.
//!
//! [`AppBuilder`] collects routes from code, from discovered route files and
//! from static mounts, plus path-scoped middleware. [`AppBuilder::build`]
//! freezes them into an [`App`], which answers [`App::resolve`] and
//! [`App::middleware_for`] for every request.

use http::Method;
use waypath_config::RouterConfig;
use waypath_router::{normalize_pattern, ParamPolicy, Params, PathTrie, ANY_METHOD};

use crate::discovery::{scan_route_files, RouteFile};
use crate::error::{AppError, AppResult};
use crate::middleware::MiddlewareStack;

/// Methods a route file may provide handlers for; static mounts answer all
/// of them.
pub const STANDARD_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
];

/// What kind of registration produced a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A handler registered directly or from a route file.
    Handler,
    /// A static file mount; the handler serves files below `url_path`.
    StaticMount {
        /// URL prefix the mount was registered at.
        url_path: String,
    },
}

/// Payload stored in the trie for every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta<H> {
    /// The caller's handler.
    pub handler: H,
    /// Pattern the route was registered with.
    pub pattern: String,
    /// How the route was registered.
    pub kind: RouteKind,
}

/// A resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, H> {
    /// The matched route.
    pub route: &'a RouteMeta<H>,
    /// Parameters extracted from the path.
    pub params: Params,
}

impl<'a, H> RouteMatch<'a, H> {
    /// The matched handler.
    pub fn handler(&self) -> &'a H {
        &self.route.handler
    }

    /// Returns a path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Outcome of [`App::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a, H> {
    /// A route matched.
    Matched(RouteMatch<'a, H>),
    /// The path exists, but not for this method.
    MethodNotAllowed {
        /// Methods the path does answer.
        allowed: Vec<Method>,
    },
    /// No route matches the path.
    NotFound,
}

/// Builder for [`App`].
///
/// `H` is the route handler type and `M` the middleware type; both are
/// opaque to the router.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use waypath::{AppBuilder, Resolution};
///
/// let mut builder: AppBuilder<&str, &str> = AppBuilder::new();
/// builder
///     .middleware("/users/**", "auth")
///     .route(Method::GET, "/users/:id", "getUser")?
///     .route(Method::DELETE, "/users/:id", "deleteUser")?
///     .static_mount("/assets", "assets")?;
/// let app = builder.build();
///
/// match app.resolve(&Method::GET, "/users/42?expand=true") {
///     Resolution::Matched(m) => {
///         assert_eq!(*m.handler(), "getUser");
///         assert_eq!(m.param("id"), Some("42"));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
///
/// assert!(matches!(
///     app.resolve(&Method::PUT, "/users/42"),
///     Resolution::MethodNotAllowed { .. }
/// ));
/// assert_eq!(app.middleware_for("/users/42").count(), 1);
/// # Ok::<(), waypath::AppError>(())
/// ```
#[derive(Debug)]
pub struct AppBuilder<H, M = ()> {
    trie: PathTrie<RouteMeta<H>>,
    middleware: MiddlewareStack<M>,
    config: RouterConfig,
}

impl<H, M> Default for AppBuilder<H, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, M> AppBuilder<H, M> {
    /// Creates a builder with the default router configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(RouterConfig::default())
    }

    /// Creates a builder from a router configuration section.
    ///
    /// `strict_params` selects [`ParamPolicy::Strict`].
    #[must_use]
    pub fn from_config(config: RouterConfig) -> Self {
        let policy = if config.strict_params {
            ParamPolicy::Strict
        } else {
            ParamPolicy::Permissive
        };
        Self {
            trie: PathTrie::with_policy(policy),
            middleware: MiddlewareStack::default(),
            config,
        }
    }

    /// The router configuration in use.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Route`] if the trie rejects the pattern.
    pub fn route(&mut self, method: Method, pattern: &str, handler: H) -> AppResult<&mut Self> {
        self.insert(method.as_str(), pattern, handler, RouteKind::Handler)?;
        Ok(self)
    }

    /// Registers `handler` for every method on `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Route`] if the trie rejects the pattern.
    pub fn any(&mut self, pattern: &str, handler: H) -> AppResult<&mut Self> {
        self.insert(ANY_METHOD, pattern, handler, RouteKind::Handler)?;
        Ok(self)
    }

    /// Registers the handlers a route file provides.
    ///
    /// Nothing is registered unless every method is one of
    /// [`STANDARD_METHODS`] and at least one handler is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoMethods`], [`AppError::UnsupportedMethod`] or
    /// [`AppError::Route`].
    pub fn route_file<I>(&mut self, file: &RouteFile, handlers: I) -> AppResult<&mut Self>
    where
        I: IntoIterator<Item = (Method, H)>,
    {
        let handlers: Vec<(Method, H)> = handlers.into_iter().collect();
        if handlers.is_empty() {
            return Err(AppError::NoMethods {
                route_path: file.route_path.clone(),
            });
        }
        if let Some((method, _)) = handlers
            .iter()
            .find(|(method, _)| !STANDARD_METHODS.contains(method))
        {
            return Err(AppError::UnsupportedMethod {
                route_path: file.route_path.clone(),
                method: method.clone(),
            });
        }

        for (method, handler) in handlers {
            self.insert(method.as_str(), &file.pattern, handler, RouteKind::Handler)?;
        }
        Ok(self)
    }

    /// Scans the configured routes directory and registers each file with
    /// the handlers `load` returns for it.
    ///
    /// Returns the number of route files registered.
    ///
    /// # Errors
    ///
    /// Fails on the first directory that cannot be listed or the first file
    /// [`route_file`](Self::route_file) rejects.
    pub fn discover<F, I>(&mut self, mut load: F) -> AppResult<usize>
    where
        F: FnMut(&RouteFile) -> I,
        I: IntoIterator<Item = (Method, H)>,
    {
        let files = scan_route_files(&self.config.routes_dir, self.config.extensions.as_slice())?;
        for file in &files {
            let handlers = load(file);
            self.route_file(file, handlers)?;
        }
        tracing::info!(
            dir = %self.config.routes_dir.display(),
            files = files.len(),
            "route files registered"
        );
        Ok(files.len())
    }

    /// Mounts `handler` to serve everything below `url_path` for every
    /// standard method.
    ///
    /// `/` mounts at `/**`; any other path `p` mounts at `p/**`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Route`] if the trie rejects the pattern.
    pub fn static_mount(&mut self, url_path: &str, handler: H) -> AppResult<&mut Self>
    where
        H: Clone,
    {
        let url_path = normalize_pattern(url_path);
        let pattern = if url_path == "/" {
            "/**".to_string()
        } else {
            format!("{url_path}/**")
        };
        for method in &STANDARD_METHODS {
            let kind = RouteKind::StaticMount {
                url_path: url_path.clone(),
            };
            self.insert(method.as_str(), &pattern, handler.clone(), kind)?;
        }
        Ok(self)
    }

    /// Registers `middleware` for requests whose path falls in `path`'s
    /// scope.
    ///
    /// `""` and `*` apply to every request, `<base>/**` to every path
    /// starting with `<base>`, anything else to that exact path. Middleware
    /// is reported in registration order.
    pub fn middleware(&mut self, path: &str, middleware: M) -> &mut Self {
        self.middleware.push(path, middleware);
        self
    }

    /// Freezes the routes and middleware into an [`App`].
    #[must_use]
    pub fn build(self) -> App<H, M> {
        tracing::info!(
            routes = self.trie.len(),
            middleware = self.middleware.len(),
            "router built"
        );
        App {
            trie: self.trie,
            middleware: self.middleware,
        }
    }

    fn insert(&mut self, method: &str, pattern: &str, handler: H, kind: RouteKind) -> AppResult<()> {
        let meta = RouteMeta {
            handler,
            pattern: normalize_pattern(pattern),
            kind,
        };
        self.trie.add(method, pattern, meta)?;
        Ok(())
    }
}

/// An immutable routing table.
///
/// `App` is `Send + Sync` whenever the handler type is, so one instance can
/// serve every request thread.
#[derive(Debug)]
pub struct App<H, M = ()> {
    trie: PathTrie<RouteMeta<H>>,
    middleware: MiddlewareStack<M>,
}

impl<H, M> App<H, M> {
    /// Resolves a request.
    ///
    /// `path` may carry a query string or fragment; only the part before
    /// the first `?` or `#` is matched.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_, H> {
        let path = strip_query(path);
        if let Some(m) = self.trie.find(method.as_str(), path) {
            return Resolution::Matched(RouteMatch {
                route: m.data,
                params: m.params,
            });
        }

        let allowed: Vec<Method> = self
            .trie
            .allowed_methods(path)
            .into_iter()
            .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
            .collect();
        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed { allowed }
        }
    }

    /// Middleware applying to a request for `path`, in registration order.
    ///
    /// Like [`resolve`](Self::resolve), any query string or fragment is
    /// ignored.
    pub fn middleware_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a M> + 'a {
        self.middleware.matching(strip_query(path))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// The underlying trie.
    pub fn router(&self) -> &PathTrie<RouteMeta<H>> {
        &self.trie
    }
}

fn strip_query(path: &str) -> &str {
    path.find(|c: char| c == '?' || c == '#').map_or(path, |end| &path[..end])
}
