//! Relation kinds and object modifiers carried on BEL edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The relationship a BEL edge asserts.
///
/// Known BEL relations get their own variant; anything else the provider
/// emits is kept verbatim in [`Relation::Other`] so it can still be rendered
/// in diagnostics. Serialized as the BEL camelCase keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    Increases,
    DirectlyIncreases,
    Decreases,
    DirectlyDecreases,
    Regulates,
    CausesNoChange,
    PartOf,
    HasComponent,
    HasMember,
    HasVariant,
    IsA,
    EquivalentTo,
    TranscribedTo,
    TranslatedTo,
    Orthologous,
    RateLimitingStepOf,
    BiomarkerFor,
    PositiveCorrelation,
    NegativeCorrelation,
    Correlation,
    NoCorrelation,
    Association,
    Other(String),
}

impl Relation {
    const KNOWN: &'static [(&'static str, Relation)] = &[
        ("increases", Relation::Increases),
        ("directlyIncreases", Relation::DirectlyIncreases),
        ("decreases", Relation::Decreases),
        ("directlyDecreases", Relation::DirectlyDecreases),
        ("regulates", Relation::Regulates),
        ("causesNoChange", Relation::CausesNoChange),
        ("partOf", Relation::PartOf),
        ("hasComponent", Relation::HasComponent),
        ("hasMember", Relation::HasMember),
        ("hasVariant", Relation::HasVariant),
        ("isA", Relation::IsA),
        ("equivalentTo", Relation::EquivalentTo),
        ("transcribedTo", Relation::TranscribedTo),
        ("translatedTo", Relation::TranslatedTo),
        ("orthologous", Relation::Orthologous),
        ("rateLimitingStepOf", Relation::RateLimitingStepOf),
        ("biomarkerFor", Relation::BiomarkerFor),
        ("positiveCorrelation", Relation::PositiveCorrelation),
        ("negativeCorrelation", Relation::NegativeCorrelation),
        ("correlation", Relation::Correlation),
        ("noCorrelation", Relation::NoCorrelation),
        ("association", Relation::Association),
    ];

    /// Parse a BEL relation keyword. Never fails: unknown keywords become
    /// [`Relation::Other`].
    pub fn parse(s: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|(kw, _)| *kw == s)
            .map(|(_, rel)| rel.clone())
            .unwrap_or_else(|| Relation::Other(s.to_string()))
    }

    /// The BEL keyword for this relation.
    pub fn as_str(&self) -> &str {
        match self {
            Relation::Other(s) => s.as_str(),
            known => Self::KNOWN
                .iter()
                .find(|(_, rel)| rel == known)
                .map(|(kw, _)| *kw)
                .unwrap_or(""),
        }
    }

    /// Statistical, symmetric relations.
    pub fn is_correlative(&self) -> bool {
        matches!(
            self,
            Relation::PositiveCorrelation
                | Relation::NegativeCorrelation
                | Relation::Correlation
                | Relation::NoCorrelation
        )
    }
}

impl From<String> for Relation {
    fn from(s: String) -> Self {
        Relation::parse(&s)
    }
}

impl From<Relation> for String {
    fn from(r: Relation) -> Self {
        match r {
            Relation::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What aspect of the object an edge talks about.
///
/// Absent means the edge concerns the object's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Activity,
    Degradation,
    Translocation,
}

impl Modifier {
    /// BEL wrapper function name, e.g. `act` in `act(p(HGNC:1))`.
    pub fn bel_function(self) -> &'static str {
        match self {
            Modifier::Activity => "act",
            Modifier::Degradation => "deg",
            Modifier::Translocation => "tloc",
        }
    }
}

/// The `object` annotation of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectModifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keywords_round_trip() {
        for (kw, rel) in Relation::KNOWN {
            assert_eq!(&Relation::parse(kw), rel);
            assert_eq!(rel.as_str(), *kw);
        }
    }

    #[test]
    fn unknown_keyword_is_kept() {
        let rel = Relation::parse("analogousTo");
        assert_eq!(rel, Relation::Other("analogousTo".into()));
        assert_eq!(rel.to_string(), "analogousTo");
    }

    #[test]
    fn correlative_set() {
        assert!(Relation::PositiveCorrelation.is_correlative());
        assert!(Relation::NegativeCorrelation.is_correlative());
        assert!(!Relation::Association.is_correlative());
        assert!(!Relation::Increases.is_correlative());
    }

    #[test]
    fn serializes_as_keyword() {
        let json = serde_json::to_string(&Relation::DirectlyDecreases).unwrap();
        assert_eq!(json, "\"directlyDecreases\"");
        let back: Relation = serde_json::from_str("\"hasComponent\"").unwrap();
        assert_eq!(back, Relation::HasComponent);
    }
}
