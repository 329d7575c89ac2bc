//! In-memory BEL multigraph.
//!
//! Uses `petgraph` for the graph structure and a `HashMap` so that equal
//! entities always resolve to the same node.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::entity::Entity;
use crate::error::GraphError;

use super::{EdgeData, EdgeKey};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Directed multigraph of BEL entities.
///
/// Parallel edges between the same pair of nodes are kept as separate
/// petgraph edges, each addressed by its own [`EdgeKey`].
#[derive(Clone, Default)]
pub struct BelGraph {
    /// Source name, e.g. `hippie`.
    name: Option<String>,
    graph: DiGraph<Entity, EdgeData>,
    /// Entity → NodeIndex mapping for interning.
    node_index: HashMap<Entity, NodeIndex>,
}

impl BelGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Ensure a node exists for the given entity, returning its index.
    pub fn add_node(&mut self, entity: Entity) -> NodeIndex {
        if let Some(idx) = self.node_index.get(&entity) {
            return *idx;
        }
        let idx = self.graph.add_node(entity.clone());
        self.node_index.insert(entity, idx);
        idx
    }

    /// Add an edge `u → v`. Parallel edges are allowed.
    pub fn add_edge(&mut self, u: NodeIndex, v: NodeIndex, data: EdgeData) -> EdgeKey {
        EdgeKey(self.graph.add_edge(u, v, data))
    }

    /// Add a statement `subject → object`, creating nodes as needed.
    pub fn add_statement(&mut self, subject: Entity, object: Entity, data: EdgeData) -> EdgeKey {
        let u = self.add_node(subject);
        let v = self.add_node(object);
        self.add_edge(u, v, data)
    }

    /// Look up the node index of an entity.
    pub fn find_node(&self, entity: &Entity) -> Option<NodeIndex> {
        self.node_index.get(entity).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&Entity> {
        self.graph.node_weight(idx)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Entity)> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(|e| (idx, e)))
    }

    /// Iterate every edge exactly once as `(u, v, key)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeKey)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), EdgeKey(e.id())))
    }

    /// Data of the edge `(u, v, key)`.
    ///
    /// Fails if `key` does not exist or does not connect `u` to `v`.
    pub fn edge_data(&self, u: NodeIndex, v: NodeIndex, key: EdgeKey) -> GraphResult<&EdgeData> {
        match self.graph.edge_endpoints(key.0) {
            Some((src, dst)) if src == u && dst == v => Ok(&self.graph[key.0]),
            _ => Err(GraphError::EdgeNotFound {
                source_node: u.index(),
                target_node: v.index(),
                key: key.index(),
            }),
        }
    }

    /// Both endpoint entities and the data of `(u, v, key)`.
    pub fn edge(
        &self,
        u: NodeIndex,
        v: NodeIndex,
        key: EdgeKey,
    ) -> GraphResult<(&Entity, &Entity, &EdgeData)> {
        let data = self.edge_data(u, v, key)?;
        // Endpoints of an existing edge always exist.
        match (self.graph.node_weight(u), self.graph.node_weight(v)) {
            (Some(subject), Some(object)) => Ok((subject, object, data)),
            _ => Err(GraphError::EdgeNotFound {
                source_node: u.index(),
                target_node: v.index(),
                key: key.index(),
            }),
        }
    }

    /// Human-readable BEL rendering of an edge, for diagnostics.
    ///
    /// e.g. `p(HGNC:1) increases act(p(HGNC:2))`.
    pub fn edge_to_bel(&self, u: NodeIndex, v: NodeIndex, key: EdgeKey) -> String {
        match self.edge(u, v, key) {
            Ok((subject, object, data)) => render_statement(subject, object, data),
            Err(_) => format!("<missing edge {key}>"),
        }
    }
}

/// Render a BEL statement for a subject, object, and edge data.
pub fn render_statement(subject: &Entity, object: &Entity, data: &EdgeData) -> String {
    let relation = data
        .relation
        .as_ref()
        .map(|r| r.as_str())
        .unwrap_or("?");
    let object = match data.object_modifier() {
        Some(m) => format!("{}({object})", m.bel_function()),
        None => object.to_string(),
    };
    match &data.association_type {
        Some(t) => format!("{subject} {relation}[{t}] {object}"),
        None => format!("{subject} {relation} {object}"),
    }
}

impl std::fmt::Debug for BelGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BelGraph")
            .field("name", &self.name)
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
