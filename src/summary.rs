//! Aggregate statistics over a KEEN table.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::table::KeenTable;

/// Entity, namespace, and relation counts of a table.
///
/// Serialized as `{"namespaces": {..}, "entities": n, "relations": n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeenSummary {
    /// Occurrences of each namespace across the subject and object columns.
    pub namespaces: BTreeMap<String, usize>,
    /// Distinct subject and object values.
    pub entities: usize,
    /// Number of rows.
    pub relations: usize,
}

/// The namespace of a CURIE: everything before the first `:`.
pub fn namespace_of(value: &str) -> &str {
    value.split_once(':').map_or(value, |(ns, _)| ns)
}

/// Summarize a table.
pub fn summarize(table: &KeenTable) -> KeenSummary {
    let mut namespaces: BTreeMap<String, usize> = BTreeMap::new();
    let mut entities: HashSet<&str> = HashSet::new();

    for value in table.entity_values() {
        entities.insert(value);
        *namespaces.entry(namespace_of(value).to_string()).or_insert(0) += 1;
    }

    KeenSummary {
        namespaces,
        entities: entities.len(),
        relations: table.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triple::Triple;

    #[test]
    fn empty_table() {
        assert_eq!(summarize(&KeenTable::default()), KeenSummary::default());
    }

    #[test]
    fn counts() {
        let table = KeenTable::from_triples(vec![
            Triple::new("HGNC:1", "partOf", "FPLX:1"),
            Triple::new("HGNC:2", "partOf", "FPLX:1"),
            Triple::new("HGNC:1", "similarity", "HGNC:2"),
        ]);
        let summary = summarize(&table);
        assert_eq!(summary.relations, 3);
        assert_eq!(summary.entities, 3);
        assert_eq!(summary.namespaces["HGNC"], 4);
        assert_eq!(summary.namespaces["FPLX"], 2);
    }

    #[test]
    fn namespace_is_text_before_first_colon() {
        assert_eq!(namespace_of("GO:GO:0008150"), "GO");
        assert_eq!(namespace_of("bare"), "bare");
        assert_eq!(namespace_of(":x"), "");
    }

    #[test]
    fn json_shape() {
        let table = KeenTable::from_triples(vec![Triple::new("HGNC:1", "isA", "FPLX:1")]);
        let json = serde_json::to_value(summarize(&table)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "namespaces": {"FPLX": 1, "HGNC": 1},
                "entities": 2,
                "relations": 1
            })
        );
    }
}
