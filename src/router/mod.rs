//! Trie-based path router
//!
//! Route patterns compile into a shared prefix tree whose edges are path
//! segments. Matching is deterministic: an exact literal child always wins,
//! otherwise the node's parameter edges are consulted in ascending
//! specificity order and the first validator that accepts the segment
//! binds it. Registration is append-only and infallible; "no route" is an
//! absent optional, not an error.

mod params;
mod trie;

pub use params::ParamType;

use std::collections::HashMap;

use params::{parse_segment, split_path, Segment};
use trie::{NodeId, TrieNode, TypedParam};

/// HTTP method, with `Any` as the wildcard fallback slot.
///
/// The numeric values are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
    Options = 5,
    Head = 6,
    /// Matches requests of any method when no specific entry exists
    Any = 255,
}

impl HttpMethod {
    /// Parse an uppercase method string. The mapping is case-sensitive and
    /// exact; anything unknown falls back to `GET`.
    pub fn from_method_str(method: &str) -> Self {
        match method {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            _ => HttpMethod::Get,
        }
    }

    /// Canonical uppercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Any => "ANY",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request state the router writes captures into.
///
/// `match_route` clears the parameters up front; captures written during a
/// traversal that ultimately fails are not rolled back.
pub trait RequestContext {
    /// Record a captured parameter.
    fn set_param(&mut self, name: &str, value: &str);

    /// Drop all captured parameters.
    fn clear_params(&mut self);
}

impl RequestContext for HashMap<String, String> {
    fn set_param(&mut self, name: &str, value: &str) {
        self.insert(name.to_owned(), value.to_owned());
    }

    fn clear_params(&mut self) {
        self.clear();
    }
}

/// Final request handler.
pub type Handler = Box<dyn Fn(&mut dyn RequestContext) + Send + Sync>;

/// A middleware observes the context and either short-circuits or advances
/// the chain by running its [`Next`].
pub type Middleware = Box<dyn Fn(&mut dyn RequestContext, Next<'_>) + Send + Sync>;

/// A registered endpoint.
pub struct RouteInfo {
    pattern: String,
    method: HttpMethod,
    handler: Handler,
    middlewares: Vec<Middleware>,
}

impl RouteInfo {
    /// The pattern text exactly as registered, for diagnostics.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The method this route was registered under.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Route-specific middlewares in attachment order.
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }
}

/// Stable handle to a registered route, usable to attach middlewares after
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteId {
    node: NodeId,
    method: HttpMethod,
}

/// The remaining middleware chain. Running it consumes it, so a middleware
/// can advance the chain at most once; not running it short-circuits the
/// rest of the chain including the final handler.
pub struct Next<'a> {
    global: &'a [Middleware],
    local: &'a [Middleware],
    handler: &'a Handler,
}

impl Next<'_> {
    /// Advance to the next middleware, or the handler once both sequences
    /// are exhausted.
    pub fn run(mut self, ctx: &mut dyn RequestContext) {
        if let Some((middleware, rest)) = self.global.split_first() {
            self.global = rest;
            return middleware(ctx, self);
        }
        if let Some((middleware, rest)) = self.local.split_first() {
            self.local = rest;
            return middleware(ctx, self);
        }
        (self.handler)(ctx)
    }
}

/// Route registry and matcher.
///
/// Mutation happens only through [`Router::add`] and the middleware
/// attachers; matching is read-only, so a quiescent router can serve
/// concurrent `match_route` calls.
pub struct Router {
    nodes: Vec<TrieNode>,
    middlewares: Vec<Middleware>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            middlewares: Vec::new(),
        }
    }

    /// Register a route, replacing any prior entry for the same pattern and
    /// method. Never fails; returns a handle for later middleware
    /// attachment.
    pub fn add<H>(&mut self, method: HttpMethod, pattern: &str, handler: H) -> RouteId
    where
        H: Fn(&mut dyn RequestContext) + Send + Sync + 'static,
    {
        let mut current: NodeId = 0;
        for segment in split_path(pattern) {
            current = self.get_or_create(current, segment);
        }

        let info = RouteInfo {
            pattern: pattern.to_owned(),
            method,
            handler: Box::new(handler),
            middlewares: Vec::new(),
        };
        self.nodes[current].handlers.insert(method, info);

        RouteId {
            node: current,
            method,
        }
    }

    fn get_or_create(&mut self, node: NodeId, segment: &str) -> NodeId {
        match parse_segment(segment) {
            Segment::Literal(text) => {
                if let Some(&child) = self.nodes[node].literals.get(text) {
                    return child;
                }
                let child = self.alloc_node();
                self.nodes[node].literals.insert(text.to_owned(), child);
                child
            }
            Segment::Param { name, ty } => {
                // Edges stay sorted by rank; a later registration with the
                // same type reuses the edge and keeps the original capture
                // name.
                let position = self.nodes[node]
                    .typed_params
                    .partition_point(|param| param.ty.rank() < ty.rank());
                if let Some(existing) = self.nodes[node].typed_params.get(position) {
                    if existing.ty == ty {
                        return existing.next;
                    }
                }

                let child = self.alloc_node();
                self.nodes[node].typed_params.insert(
                    position,
                    TypedParam {
                        name: name.to_owned(),
                        ty,
                        next: child,
                    },
                );
                child
            }
        }
    }

    fn alloc_node(&mut self) -> NodeId {
        self.nodes.push(TrieNode::default());
        self.nodes.len() - 1
    }

    /// Append a middleware that runs for every executed route, in
    /// registration order before any route-specific middleware.
    pub fn add_middleware<M>(&mut self, middleware: M)
    where
        M: Fn(&mut dyn RequestContext, Next<'_>) + Send + Sync + 'static,
    {
        self.middlewares.push(Box::new(middleware));
    }

    /// Append a middleware to the route behind `route`. Returns `false`
    /// when the handle no longer points at a registered route.
    pub fn add_route_middleware<M>(&mut self, route: RouteId, middleware: M) -> bool
    where
        M: Fn(&mut dyn RequestContext, Next<'_>) + Send + Sync + 'static,
    {
        match self
            .nodes
            .get_mut(route.node)
            .and_then(|node| node.handlers.get_mut(&route.method))
        {
            Some(info) => {
                info.middlewares.push(Box::new(middleware));
                true
            }
            None => false,
        }
    }

    /// Read a registered route back through its handle.
    pub fn route(&self, route: RouteId) -> Option<&RouteInfo> {
        self.nodes
            .get(route.node)
            .and_then(|node| node.handlers.get(&route.method))
    }

    /// Match a request path, writing captures into `ctx`.
    ///
    /// The context's parameters are cleared first. Returns the route for
    /// `method`, falling back to an `ANY` registration on the terminal
    /// node.
    pub fn match_route(
        &self,
        method: HttpMethod,
        path: &str,
        ctx: &mut dyn RequestContext,
    ) -> Option<&RouteInfo> {
        ctx.clear_params();

        let mut current: NodeId = 0;
        'segments: for segment in split_path(path) {
            // 1. Exact literal wins outright
            if let Some(&child) = self.nodes[current].literals.get(segment) {
                current = child;
                continue;
            }

            // 2. Parameter edges in rank order; first accepting validator
            //    binds the segment
            for param in &self.nodes[current].typed_params {
                if param.ty.matches(segment) {
                    ctx.set_param(&param.name, segment);
                    current = param.next;
                    continue 'segments;
                }
            }

            return None;
        }

        self.nodes[current].handler_for(method)
    }

    /// Run the full chain for a matched route: every global middleware in
    /// registration order, then the route's own middlewares, then the
    /// handler. The chain advances only while each middleware invokes its
    /// [`Next`].
    pub fn execute(&self, route: &RouteInfo, ctx: &mut dyn RequestContext) {
        Next {
            global: &self.middlewares,
            local: &route.middlewares,
            handler: &route.handler,
        }
        .run(ctx);
    }
}
