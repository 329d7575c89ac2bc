//! Edge classifier: runs one graph edge through a rule chain.
//!
//! An edge that no rule converts is *unhandled*. That is an expected outcome,
//! reported with a warning and counted, never an error. An edge without a
//! relation violates the provider contract and fails the conversion.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::error::ConvertError;
use crate::graph::{BelGraph, EdgeKey};
use crate::rules::{EdgeContext, RuleSet};
use crate::triple::Triple;

/// Result type for conversion operations.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Default number of unhandled edges kept as samples.
pub const DEFAULT_SAMPLE_LIMIT: usize = 20;

/// Count and sample of edges no rule converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnhandledEdges {
    pub count: usize,
    /// BEL renderings of the unhandled edges with the lowest edge indices,
    /// in edge order. The same for sequential and parallel runs.
    pub samples: Vec<String>,
}

/// Classifies edges against an explicit rule set.
///
/// Safe to share across threads: the unhandled-edge tally is the only
/// mutable state and is updated atomically.
pub struct EdgeClassifier<'r> {
    rules: &'r RuleSet,
    sample_limit: usize,
    unhandled: AtomicUsize,
    samples: Mutex<Vec<(usize, String)>>,
}

impl<'r> EdgeClassifier<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            unhandled: AtomicUsize::new(0),
            samples: Mutex::new(Vec::new()),
        }
    }

    /// Keep at most `limit` unhandled-edge samples.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        self.rules
    }

    /// Convert the edge `(u, v, key)` of `graph` to a triple.
    ///
    /// Returns `Ok(None)` when no rule applies.
    pub fn classify(
        &self,
        graph: &BelGraph,
        u: NodeIndex,
        v: NodeIndex,
        key: EdgeKey,
    ) -> ConvertResult<Option<Triple>> {
        let (subject, object, data) = graph.edge(u, v, key)?;
        let relation = data
            .relation
            .as_ref()
            .ok_or_else(|| ConvertError::MissingRelation {
                edge: graph.edge_to_bel(u, v, key),
            })?;

        let edge = EdgeContext {
            subject,
            object,
            relation,
            data,
        };

        if let Some((rule, triple)) = self.rules.apply(&edge) {
            tracing::trace!(rule = %rule.name, %triple, "edge converted");
            return Ok(Some(triple));
        }

        let rendered = graph.edge_to_bel(u, v, key);
        tracing::warn!(edge = %rendered, "unhandled");
        self.unhandled.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut samples) = self.samples.lock() {
            keep_lowest(&mut samples, self.sample_limit, (key.index(), rendered));
        }
        Ok(None)
    }

    /// Number of unhandled edges seen so far.
    pub fn unhandled_count(&self) -> usize {
        self.unhandled.load(Ordering::Relaxed)
    }

    /// Consume the classifier, returning the unhandled-edge tally.
    pub fn into_unhandled(self) -> UnhandledEdges {
        let mut samples = self.samples.into_inner().unwrap_or_default();
        samples.sort_unstable_by_key(|(index, _)| *index);
        UnhandledEdges {
            count: self.unhandled.into_inner(),
            samples: samples.into_iter().map(|(_, rendered)| rendered).collect(),
        }
    }
}

/// Insert `sample` into `samples`, keeping at most `limit` entries with the
/// lowest edge indices.
fn keep_lowest(samples: &mut Vec<(usize, String)>, limit: usize, sample: (usize, String)) {
    if samples.len() < limit {
        samples.push(sample);
        return;
    }
    if let Some(highest) = samples
        .iter_mut()
        .max_by_key(|(index, _)| *index)
        .filter(|(index, _)| *index > sample.0)
    {
        *highest = sample;
    }
}

/// Classify one edge with the standard rule chain.
pub fn classify(
    graph: &BelGraph,
    u: NodeIndex,
    v: NodeIndex,
    key: EdgeKey,
) -> ConvertResult<Option<Triple>> {
    let rules = RuleSet::standard();
    EdgeClassifier::new(&rules).classify(graph, u, v, key)
}
