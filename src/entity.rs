//! Biological entities: the nodes of a BEL graph.
//!
//! An [`Entity`] is identified by a namespace plus either an identifier or a
//! human-readable name. Its [`EntityKind`] is the BEL function the node was
//! written with (`p()`, `r()`, `complex()`, ...) and is what the conversion
//! rules test against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::triple::clean_cell;

/// The BEL function of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// A chemical or other generic abundance, `a()`.
    Abundance,
    Gene,
    Rna,
    /// Micro-RNA, `m()`. Also an [`EntityKind::Rna`].
    MicroRna,
    Protein,
    /// A complex with a name of its own, `complex(NS:ID)`.
    NamedComplex,
    /// A complex given by its member list, `complex(p(..), p(..))`.
    ListComplex,
    BiologicalProcess,
    Pathology,
}

impl EntityKind {
    /// Subtype test: does a node of kind `self` count as a `kind`?
    ///
    /// Only micro-RNAs have a parent type (RNA); every other kind matches
    /// only itself.
    pub fn is_a(self, kind: EntityKind) -> bool {
        self == kind || matches!((self, kind), (EntityKind::MicroRna, EntityKind::Rna))
    }

    /// The BEL short function name used when rendering statements.
    pub fn bel_function(self) -> &'static str {
        match self {
            EntityKind::Abundance => "a",
            EntityKind::Gene => "g",
            EntityKind::Rna => "r",
            EntityKind::MicroRna => "m",
            EntityKind::Protein => "p",
            EntityKind::NamedComplex | EntityKind::ListComplex => "complex",
            EntityKind::BiologicalProcess => "bp",
            EntityKind::Pathology => "path",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Abundance => "Abundance",
            EntityKind::Gene => "Gene",
            EntityKind::Rna => "Rna",
            EntityKind::MicroRna => "MicroRna",
            EntityKind::Protein => "Protein",
            EntityKind::NamedComplex => "NamedComplex",
            EntityKind::ListComplex => "ListComplex",
            EntityKind::BiologicalProcess => "BiologicalProcess",
            EntityKind::Pathology => "Pathology",
        };
        f.write_str(name)
    }
}

/// A node of the BEL graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// The BEL function of this node.
    #[serde(rename = "function")]
    pub kind: EntityKind,
    /// Controlled vocabulary the identifier belongs to, e.g. `HGNC`.
    pub namespace: String,
    /// Identifier within the namespace, preferred over `name` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Human-readable name within the namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity {
    /// Create an entity addressed by identifier.
    pub fn new(kind: EntityKind, namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            identifier: Some(identifier.into()),
            name: None,
        }
    }

    /// Create an entity addressed by name only.
    pub fn named(kind: EntityKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            identifier: None,
            name: Some(name.into()),
        }
    }

    /// Attach a human-readable name to an identified entity.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn protein(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::Protein, namespace, identifier)
    }

    pub fn named_complex(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::NamedComplex, namespace, identifier)
    }

    pub fn abundance(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::Abundance, namespace, identifier)
    }

    pub fn rna(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::Rna, namespace, identifier)
    }

    pub fn micro_rna(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::MicroRna, namespace, identifier)
    }

    pub fn pathology(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(EntityKind::Pathology, namespace, identifier)
    }

    /// The local part of the CURIE: identifier if present, otherwise name.
    ///
    /// Empty identifiers count as absent.
    pub fn local_name(&self) -> &str {
        self.identifier
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// Canonical `namespace:identifier_or_name` rendering used in triples.
    ///
    /// Tabs and line breaks are folded to a single space so the result is
    /// always a valid TSV cell.
    pub fn curie(&self) -> String {
        format!("{}:{}", clean_cell(&self.namespace), clean_cell(self.local_name()))
    }
}

/// BEL rendering, e.g. `p(HGNC:1)`. Used in diagnostics only.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.bel_function(), self.curie())
    }
}
