//! Node-link JSON snapshots of a [`BelGraph`].
//!
//! ```json
//! {
//!   "name": "hippie",
//!   "nodes": [{"function": "Protein", "namespace": "HGNC", "identifier": "1"}],
//!   "links": [{"source": 0, "target": 0, "relation": "increases"}]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::GraphError;

use super::{BelGraph, EdgeData, GraphResult};

#[derive(Debug, Serialize, Deserialize)]
struct NodeLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    nodes: Vec<Entity>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Link {
    source: usize,
    target: usize,
    #[serde(flatten)]
    data: EdgeData,
}

impl BelGraph {
    /// Parse a node-link document.
    pub fn from_json_str(content: &str) -> GraphResult<Self> {
        Self::parse_node_link(content, "<string>")
    }

    /// Load a node-link snapshot from disk.
    pub fn from_json_path(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse_node_link(&content, &path.display().to_string())
    }

    fn parse_node_link(content: &str, origin: &str) -> GraphResult<Self> {
        let doc: NodeLink = serde_json::from_str(content).map_err(|e| GraphError::Json {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut graph = BelGraph::new();
        if let Some(name) = doc.name {
            graph = graph.with_name(name);
        }
        let indices: Vec<_> = doc.nodes.into_iter().map(|n| graph.add_node(n)).collect();

        for (i, link) in doc.links.into_iter().enumerate() {
            let u = *indices
                .get(link.source)
                .ok_or(GraphError::DanglingLink { link: i, node: link.source })?;
            let v = *indices
                .get(link.target)
                .ok_or(GraphError::DanglingLink { link: i, node: link.target })?;
            graph.add_edge(u, v, link.data);
        }
        Ok(graph)
    }

    /// Serialize as a pretty-printed node-link document.
    pub fn to_json_string(&self) -> GraphResult<String> {
        let positions: std::collections::HashMap<_, _> = self
            .nodes()
            .enumerate()
            .map(|(pos, (idx, _))| (idx, pos))
            .collect();

        let doc = NodeLink {
            name: self.name().map(str::to_string),
            nodes: self.nodes().map(|(_, e)| e.clone()).collect(),
            links: self
                .edges()
                .filter_map(|(u, v, key)| {
                    let data = self.edge_data(u, v, key).ok()?.clone();
                    Some(Link {
                        source: positions[&u],
                        target: positions[&v],
                        data,
                    })
                })
                .collect(),
        };
        serde_json::to_string_pretty(&doc).map_err(|e| GraphError::Json {
            path: "<string>".into(),
            message: e.to_string(),
        })
    }

    /// Write a node-link snapshot to disk.
    pub fn to_json_path(&self, path: &Path) -> GraphResult<()> {
        let content = self.to_json_string()?;
        std::fs::write(path, content).map_err(|e| GraphError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
