//! Output triples and the controlled predicate vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (subject, predicate, object) row of the KEEN table.
///
/// Ordering is lexicographic on (subject, predicate, object), which is the
/// order rows are written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Fold tabs and line breaks in `s` to single spaces so it is always a
/// valid TSV cell.
pub fn clean_cell(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// Predicates produced by the conversion rules.
///
/// Pass-through rules additionally emit the BEL keywords `increases`,
/// `decreases`, and the correlative relations verbatim, and association
/// edges may carry their own subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    PartOf,
    ActivityDirectlyRegulatesActivityOf,
    ActivityDirectlyPositivelyRegulatesActivityOf,
    ActivityDirectlyNegativelyRegulatesActivityOf,
    RegulatesExpressionOf,
    IncreasesExpressionOf,
    RepressesExpressionOf,
    IsA,
    EquivalentTo,
    Association,
    RegulatesAmountOf,
    IncreasesAmountOf,
    DecreasesAmountOf,
}

impl Predicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Predicate::PartOf => "partOf",
            Predicate::ActivityDirectlyRegulatesActivityOf => "activityDirectlyRegulatesActivityOf",
            Predicate::ActivityDirectlyPositivelyRegulatesActivityOf => {
                "activityDirectlyPositivelyRegulatesActivityOf"
            }
            Predicate::ActivityDirectlyNegativelyRegulatesActivityOf => {
                "activityDirectlyNegativelyRegulatesActivityOf"
            }
            Predicate::RegulatesExpressionOf => "regulatesExpressionOf",
            Predicate::IncreasesExpressionOf => "increasesExpressionOf",
            Predicate::RepressesExpressionOf => "repressesExpressionOf",
            Predicate::IsA => "isA",
            Predicate::EquivalentTo => "equivalentTo",
            Predicate::Association => "association",
            Predicate::RegulatesAmountOf => "regulatesAmountOf",
            Predicate::IncreasesAmountOf => "increasesAmountOf",
            Predicate::DecreasesAmountOf => "decreasesAmountOf",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic_by_column() {
        let a = Triple::new("A:1", "isA", "Z:9");
        let b = Triple::new("A:1", "partOf", "B:1");
        let c = Triple::new("B:0", "association", "A:0");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn predicate_strings() {
        assert_eq!(Predicate::PartOf.to_string(), "partOf");
        assert_eq!(
            Predicate::ActivityDirectlyNegativelyRegulatesActivityOf.as_str(),
            "activityDirectlyNegativelyRegulatesActivityOf"
        );
    }

    #[test]
    fn clean_cell_folds_separators() {
        assert_eq!(clean_cell("a\tb\r\nc"), "a b  c");
        assert_eq!(clean_cell("similarity"), "similarity");
    }
}
