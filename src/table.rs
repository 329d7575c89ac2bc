//! Graph → KEEN table conversion.
//!
//! Every edge is classified once. Results are collected into a `BTreeSet`,
//! which both removes duplicates produced by parallel edges and yields the
//! rows in (subject, predicate, object) order. The output therefore does not
//! depend on edge iteration order or on whether classification ran in
//! parallel.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::classify::{ConvertResult, DEFAULT_SAMPLE_LIMIT, EdgeClassifier, UnhandledEdges};
use crate::graph::BelGraph;
use crate::rules::RuleSet;
use crate::triple::Triple;

/// Column names of the KEEN table.
pub const COLUMNS: [&str; 3] = ["subject", "predicate", "object"];

/// Edges between progress reports.
const PROGRESS_INTERVAL: usize = 100_000;

/// Sorted, duplicate-free triples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeenTable {
    rows: Vec<Triple>,
}

impl KeenTable {
    /// Build a table from any triples, sorting and removing duplicates.
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let set: BTreeSet<Triple> = triples.into_iter().collect();
        Self::from(set)
    }

    pub fn rows(&self) -> &[Triple] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Subject and object values in row order.
    pub fn entity_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .flat_map(|t| [t.subject.as_str(), t.object.as_str()])
    }
}

impl From<BTreeSet<Triple>> for KeenTable {
    fn from(set: BTreeSet<Triple>) -> Self {
        Self {
            rows: set.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a KeenTable {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Output of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub table: KeenTable,
    pub unhandled: UnhandledEdges,
}

/// Converts whole graphs with a given rule set.
pub struct Converter<'r> {
    rules: &'r RuleSet,
    parallel: bool,
    sample_limit: usize,
}

impl<'r> Converter<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            parallel: false,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    /// Classify edges on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Convert every edge of `graph`.
    ///
    /// Fails on the first edge that violates the provider contract; unhandled
    /// edges are skipped and tallied.
    pub fn convert(&self, graph: &BelGraph) -> ConvertResult<Conversion> {
        let classifier = EdgeClassifier::new(self.rules).with_sample_limit(self.sample_limit);
        let total = graph.edge_count();
        tracing::info!(
            graph = graph.name().unwrap_or("<unnamed>"),
            edges = total,
            parallel = self.parallel,
            "preparing KEEN table"
        );

        let triples: BTreeSet<Triple> = if self.parallel {
            let edges: Vec<_> = graph.edges().collect();
            edges
                .par_iter()
                .map(|&(u, v, key)| classifier.classify(graph, u, v, key))
                .filter_map(|r| r.transpose())
                .collect::<ConvertResult<Vec<Triple>>>()?
                .into_iter()
                .collect()
        } else {
            let mut set = BTreeSet::new();
            for (i, (u, v, key)) in graph.edges().enumerate() {
                if let Some(triple) = classifier.classify(graph, u, v, key)? {
                    set.insert(triple);
                }
                if (i + 1) % PROGRESS_INTERVAL == 0 {
                    tracing::debug!(done = i + 1, total, "classifying edges");
                }
            }
            set
        };

        let table = KeenTable::from(triples);
        let unhandled = classifier.into_unhandled();
        tracing::info!(
            rows = table.len(),
            unhandled = unhandled.count,
            "KEEN table ready"
        );
        Ok(Conversion { table, unhandled })
    }
}

/// Convert `graph` with the standard rule chain.
pub fn build_table(graph: &BelGraph) -> ConvertResult<KeenTable> {
    let rules = RuleSet::standard();
    Converter::new(&rules).convert(graph).map(|c| c.table)
}
