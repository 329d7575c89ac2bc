// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # bel-keen
//!
//! Converts BEL knowledge graphs (typed biological entities joined by
//! annotated, possibly parallel, relationships) into the flat
//! (subject, predicate, object) tables used to train knowledge-graph
//! embeddings.
//!
//! ## Architecture
//!
//! - **Graph** (`graph`): petgraph multigraph of [`entity::Entity`] nodes with node-link JSON snapshots
//! - **Rules** (`rules`): ordered, data-driven conversion rules; first match wins
//! - **Classifier** (`classify`): one edge → one triple, or an unhandled-edge diagnostic
//! - **Table** (`table`): whole-graph conversion into a sorted, duplicate-free table
//! - **Summary / export** (`summary`, `export`): statistics, TSV and JSON output
//! - **Sources** (`source`): provider trait and the on-disk cache
//!
//! ## Library usage
//!
//! ```no_run
//! use bel_keen::entity::Entity;
//! use bel_keen::graph::{BelGraph, EdgeData};
//! use bel_keen::relation::Relation;
//! use bel_keen::table::build_table;
//!
//! let mut graph = BelGraph::new();
//! graph.add_statement(
//!     Entity::named_complex("FPLX", "1"),
//!     Entity::protein("HGNC", "1"),
//!     EdgeData::new(Relation::HasComponent),
//! );
//! let table = build_table(&graph).unwrap();
//! bel_keen::export::write_table(&table, std::path::Path::new("graph.keen.tsv")).unwrap();
//! ```

pub mod classify;
pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod graph;
pub mod paths;
pub mod relation;
pub mod rules;
pub mod source;
pub mod summary;
pub mod table;
pub mod triple;
