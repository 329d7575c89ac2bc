//! Data-source orchestration: graph providers and the on-disk cache.
//!
//! For a source named `hippie`, the cache holds
//!
//! - `hippie.bel.json`: node-link snapshot of the provider's graph
//! - `hippie.keen.tsv`: the converted table
//! - `hippie.keen.summary.json`: its summary
//!
//! [`SourceCache::ensure`] reuses whatever is already there unless asked to
//! rebuild.

use std::path::{Path, PathBuf};

use crate::config::KeenConfig;
use crate::error::SourceError;
use crate::export::{STAGING_SUFFIX, read_triples, write_summary, write_table};
use crate::graph::BelGraph;
use crate::rules::RuleSet;
use crate::summary::summarize;
use crate::table::Converter;
use crate::triple::Triple;

/// Result type for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Anything that can produce a BEL graph for a named source.
pub trait GraphProvider {
    /// Source name; used as the stem of all cache files.
    fn name(&self) -> &str;

    /// Build the graph. May be expensive (network, database population).
    fn build_graph(&self) -> SourceResult<BelGraph>;
}

/// Provider backed by a node-link JSON file produced elsewhere.
#[derive(Debug, Clone)]
pub struct JsonGraphProvider {
    name: String,
    path: PathBuf,
}

impl JsonGraphProvider {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl GraphProvider for JsonGraphProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_graph(&self) -> SourceResult<BelGraph> {
        Ok(BelGraph::from_json_path(&self.path)?.with_name(self.name.clone()))
    }
}

/// On-disk cache of graph snapshots and KEEN tables.
pub struct SourceCache<'c> {
    config: &'c KeenConfig,
    rules: RuleSet,
}

impl<'c> SourceCache<'c> {
    pub fn new(config: &'c KeenConfig) -> Self {
        Self {
            config,
            rules: RuleSet::standard(),
        }
    }

    /// Convert with a different rule chain.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Make sure a KEEN table exists for `provider`, building what is missing.
    ///
    /// Returns the TSV path, or `None` when the source produced no triples.
    pub fn ensure(&self, provider: &dyn GraphProvider, rebuild: bool) -> SourceResult<Option<PathBuf>> {
        let name = provider.name();
        let tsv_path = self.config.keen_tsv_path(name);
        let graph_path = self.config.graph_path(name);

        if tsv_path.exists() && !rebuild {
            tracing::info!(source = name, path = %tsv_path.display(), "already retrieved");
            return Ok(Some(tsv_path));
        }

        std::fs::create_dir_all(&self.config.data_dir).map_err(|e| SourceError::DataDir {
            path: self.config.data_dir.display().to_string(),
            source: e,
        })?;

        let graph = if graph_path.exists() && !rebuild {
            tracing::info!(source = name, path = %graph_path.display(), "loaded cached graph");
            BelGraph::from_json_path(&graph_path)?
        } else {
            tracing::debug!(source = name, "building graph from provider");
            let graph = provider.build_graph()?;
            tracing::debug!(
                source = name,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "graph built"
            );
            graph.to_json_path(&graph_path)?;
            graph
        };

        let conversion = Converter::new(&self.rules)
            .parallel(self.config.parallel)
            .sample_limit(self.config.unhandled_sample_limit)
            .convert(&graph)?;

        write_summary(&summarize(&conversion.table), &self.config.summary_path(name))?;
        if write_table(&conversion.table, &tsv_path)? {
            tracing::debug!(source = name, path = %tsv_path.display(), "wrote KEEN TSV");
            Ok(Some(tsv_path))
        } else {
            tracing::warn!(
                source = name,
                unhandled = conversion.unhandled.count,
                "no statements generated"
            );
            Ok(None)
        }
    }

    /// All cached KEEN TSVs.
    pub fn source_paths(&self) -> SourceResult<Vec<PathBuf>> {
        iterate_source_paths(&self.config.data_dir)
    }
}

/// Every file in `data_dir` whose name contains `keen.tsv`, sorted by name.
///
/// A missing directory has no sources.
pub fn iterate_source_paths(data_dir: &Path) -> SourceResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(SourceError::DataDir {
                path: data_dir.display().to_string(),
                source: e,
            });
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.contains("keen.tsv") && !name.ends_with(STAGING_SUFFIX)
        })
        .map(|e| e.path())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Concatenate the rows of every cached TSV in `data_dir`.
pub fn load_full_matrix(data_dir: &Path) -> SourceResult<Vec<Triple>> {
    let mut rows = Vec::new();
    for path in iterate_source_paths(data_dir)? {
        rows.extend(read_triples(&path)?);
    }
    Ok(rows)
}
