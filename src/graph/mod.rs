//! BEL graph: a directed multigraph of typed entities and annotated edges.
//!
//! The graph is produced by an external provider (see [`crate::source`]) and
//! is only read by the converter.
//!
//! - **In-memory layer** ([`BelGraph`]): `petgraph` multigraph with entity interning
//! - **Snapshot layer** ([`json`]): node-link JSON for caching graphs on disk

pub mod index;
pub mod json;

use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::relation::{Modifier, ObjectModifier, Relation};

pub use index::{BelGraph, GraphResult};

/// Disambiguates parallel edges between the same ordered node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub(crate) EdgeIndex);

impl EdgeKey {
    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0.index())
    }
}

/// Attributes stored on a BEL edge.
///
/// `relation` is mandatory by contract, but is modelled as optional so that a
/// malformed provider graph can be loaded and rejected with a proper
/// diagnostic during conversion instead of during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    /// Object annotation; a modifier here means the edge targets the
    /// object's activity (or other aspect) rather than its amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectModifier>,
    /// Refinement of a generic association, e.g. `similarity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association_type: Option<String>,
    /// Provider-side edge key (statement hash in most BEL tooling).
    ///
    /// Integer keys, as written by generic multigraph exporters, are kept in
    /// their decimal form.
    #[serde(
        default,
        deserialize_with = "deserialize_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

fn deserialize_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawKey>::deserialize(deserializer)?.map(|key| match key {
        RawKey::Text(s) => s,
        RawKey::Unsigned(n) => n.to_string(),
        RawKey::Signed(n) => n.to_string(),
    }))
}

impl EdgeData {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation: Some(relation),
            ..Default::default()
        }
    }

    /// Mark the edge as targeting the given aspect of the object.
    pub fn with_object_modifier(mut self, modifier: Modifier) -> Self {
        self.object = Some(ObjectModifier {
            modifier: Some(modifier),
        });
        self
    }

    pub fn with_association_type(mut self, association_type: impl Into<String>) -> Self {
        self.association_type = Some(association_type.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The object modifier, if the edge has one.
    pub fn object_modifier(&self) -> Option<Modifier> {
        self.object.and_then(|o| o.modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_modifier_accessor() {
        assert_eq!(EdgeData::new(Relation::Increases).object_modifier(), None);
        let data = EdgeData::new(Relation::Increases).with_object_modifier(Modifier::Activity);
        assert_eq!(data.object_modifier(), Some(Modifier::Activity));

        // An empty object annotation is the same as none.
        let empty = EdgeData {
            relation: Some(Relation::Decreases),
            object: Some(ObjectModifier::default()),
            ..Default::default()
        };
        assert_eq!(empty.object_modifier(), None);
    }

    #[test]
    fn edge_data_json_shape() {
        let data = EdgeData::new(Relation::Regulates).with_object_modifier(Modifier::Activity);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"relation":"regulates","object":{"modifier":"Activity"}}"#);
    }
}
