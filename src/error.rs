//! Rich diagnostic error types for bel-keen.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Unhandled edges are *not* errors: they are logged and counted by the
//! classifier. Only contract violations by the graph provider and I/O failures
//! surface here.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for bel-keen.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum KeenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("edge not found: {source_node} -> {target_node} (key {key})")]
    #[diagnostic(
        code(keen::graph::edge_not_found),
        help(
            "The (u, v, key) triple does not address an edge of this graph. \
             Use keys obtained from `BelGraph::edges()`."
        )
    )]
    EdgeNotFound {
        source_node: usize,
        target_node: usize,
        key: usize,
    },

    #[error("link {link} references missing node {node}")]
    #[diagnostic(
        code(keen::graph::dangling_link),
        help("Every link's `source` and `target` must be an index into the `nodes` array.")
    )]
    DanglingLink { link: usize, node: usize },

    #[error("failed to read graph snapshot: {path}")]
    #[diagnostic(
        code(keen::graph::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write graph snapshot: {path}")]
    #[diagnostic(
        code(keen::graph::write),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph JSON in {path}: {message}")]
    #[diagnostic(
        code(keen::graph::json),
        help(
            "The snapshot must be a node-link document: \
             {{\"nodes\": [...], \"links\": [...]}}."
        )
    )]
    Json { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Conversion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("edge {edge} carries no relation")]
    #[diagnostic(
        code(keen::convert::missing_relation),
        help(
            "Every edge handed to the converter must carry a relation kind. \
             This is a bug in the graph provider, not in the input statements."
        )
    )]
    MissingRelation { edge: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("I/O error on {path}")]
    #[diagnostic(
        code(keen::export::io),
        help(
            "A filesystem operation failed. Check that the directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {message}")]
    #[diagnostic(code(keen::export::serde))]
    Serialization { message: String },

    #[error("{path}:{line}: expected 3 tab-separated columns, found {found}")]
    #[diagnostic(
        code(keen::export::malformed_row),
        help("KEEN TSV files have no header and exactly three columns: subject, predicate, object.")
    )]
    MalformedRow {
        path: String,
        line: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("graph provider \"{name}\" failed: {message}")]
    #[diagnostic(
        code(keen::source::provider),
        help("The upstream graph provider could not produce a graph. Check its own logs.")
    )]
    Provider { name: String, message: String },

    #[error("cannot create data directory: {path}")]
    #[diagnostic(
        code(keen::source::data_dir),
        help("Set KEEN_DATA to a writable directory or fix the permissions.")
    )]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(keen::config::no_home),
        help("Set the HOME environment variable, or set KEEN_DATA explicitly.")
    )]
    NoHome,

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(keen::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(keen::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(keen::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning bel-keen results.
pub type KeenResult<T> = std::result::Result<T, KeenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_converts_through_convert_error() {
        let err = GraphError::EdgeNotFound {
            source_node: 1,
            target_node: 2,
            key: 3,
        };
        let convert: ConvertError = err.into();
        let keen: KeenError = convert.into();
        assert!(matches!(
            keen,
            KeenError::Convert(ConvertError::Graph(GraphError::EdgeNotFound { .. }))
        ));
    }

    #[test]
    fn export_error_wraps_into_source_error() {
        let err = ExportError::MalformedRow {
            path: "x.tsv".into(),
            line: 4,
            found: 2,
        };
        let source: SourceError = err.into();
        assert!(matches!(source, SourceError::Export(_)));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = ConvertError::MissingRelation {
            edge: "p(HGNC:1) ? p(HGNC:2)".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("p(HGNC:1)"));
        assert!(msg.contains("no relation"));
    }
}
