//! Trie storage
//!
//! Nodes live in an arena owned by the router; edges are arena indices.
//! Each node keys literal children by segment text and keeps its parameter
//! edges in a vector sorted by ascending type rank, which is exactly the
//! order matching consults them in.

use std::collections::HashMap;

use super::params::ParamType;
use super::{HttpMethod, RouteInfo};

/// Index of a node in the router's arena.
pub(crate) type NodeId = usize;

/// A position after consuming zero or more path segments.
#[derive(Default)]
pub(crate) struct TrieNode {
    /// Literal segment → child node
    pub(crate) literals: HashMap<String, NodeId>,
    /// Parameter edges, sorted by ascending rank; at most one per type
    pub(crate) typed_params: Vec<TypedParam>,
    /// At most one route per method
    pub(crate) handlers: HashMap<HttpMethod, RouteInfo>,
}

impl TrieNode {
    /// Route registered for `method`, falling back to `ANY`.
    pub(crate) fn handler_for(&self, method: HttpMethod) -> Option<&RouteInfo> {
        self.handlers
            .get(&method)
            .or_else(|| self.handlers.get(&HttpMethod::Any))
    }
}

/// A parameterised edge out of a node.
pub(crate) struct TypedParam {
    /// Capture name from the registration that introduced this edge
    pub(crate) name: String,
    pub(crate) ty: ParamType,
    pub(crate) next: NodeId,
}
