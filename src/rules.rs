//! Data-driven conversion rules.
//!
//! Rules are structs, not code: each one is a set of endpoint-type tests, an
//! object-modifier test, and one or more relation arms saying which predicate
//! to emit for which relation. A [`RuleSet`] is an ordered list of rules
//! where the first match wins, so more specific rules must come first.
//!
//! [`RuleSet::standard()`] is the catalog used for KEEN export.

use serde::Serialize;

use crate::entity::{Entity, EntityKind};
use crate::graph::EdgeData;
use crate::relation::{Modifier, Relation};
use crate::triple::{Predicate, Triple, clean_cell};

// ---------------------------------------------------------------------------
// Edge context
// ---------------------------------------------------------------------------

/// One directed edge as seen by a rule: both endpoints, the resolved
/// relation, and the remaining edge data.
#[derive(Debug, Clone, Copy)]
pub struct EdgeContext<'a> {
    pub subject: &'a Entity,
    pub object: &'a Entity,
    pub relation: &'a Relation,
    pub data: &'a EdgeData,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Test on the type of an edge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityPattern {
    Any,
    /// The endpoint is of this kind or one of its subtypes.
    Is(EntityKind),
}

impl EntityPattern {
    pub fn matches(self, entity: &Entity) -> bool {
        match self {
            EntityPattern::Any => true,
            EntityPattern::Is(kind) => entity.kind.is_a(kind),
        }
    }
}

/// Test on the object modifier of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModifierPattern {
    Any,
    /// The edge targets the object's activity.
    Activity,
    /// The edge carries no object modifier (it concerns the amount).
    Absent,
}

impl ModifierPattern {
    pub fn matches(self, modifier: Option<Modifier>) -> bool {
        match self {
            ModifierPattern::Any => true,
            ModifierPattern::Activity => modifier == Some(Modifier::Activity),
            ModifierPattern::Absent => modifier.is_none(),
        }
    }
}

/// Which relations a rule arm accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RelationSelector {
    Is(Relation),
    /// Any correlative relation.
    Correlative,
}

impl RelationSelector {
    pub fn matches(&self, relation: &Relation) -> bool {
        match self {
            RelationSelector::Is(r) => r == relation,
            RelationSelector::Correlative => relation.is_correlative(),
        }
    }
}

/// How a matched edge's predicate is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Emit {
    Predicate(Predicate),
    /// Reuse the BEL relation keyword verbatim.
    PassThrough,
    /// Use the edge's association subtype, defaulting to `association`.
    AssociationType,
}

/// One relation selector and the predicate it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationArm {
    pub selector: RelationSelector,
    pub emit: Emit,
}

impl RelationArm {
    pub fn new(relation: Relation, predicate: Predicate) -> Self {
        Self {
            selector: RelationSelector::Is(relation),
            emit: Emit::Predicate(predicate),
        }
    }

    pub fn pass_through(relation: Relation) -> Self {
        Self {
            selector: RelationSelector::Is(relation),
            emit: Emit::PassThrough,
        }
    }
}

/// Whether the triple keeps the edge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Forward,
    /// Emit `(object, predicate, subject)`.
    Inverted,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A single conversion rule.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub name: String,
    pub subject: EntityPattern,
    pub object: EntityPattern,
    pub modifier: ModifierPattern,
    pub arms: Vec<RelationArm>,
    pub orientation: Orientation,
}

impl Rule {
    /// Create a rule that accepts any endpoints and modifier, with no arms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: EntityPattern::Any,
            object: EntityPattern::Any,
            modifier: ModifierPattern::Any,
            arms: Vec::new(),
            orientation: Orientation::Forward,
        }
    }

    pub fn subject(mut self, kind: EntityKind) -> Self {
        self.subject = EntityPattern::Is(kind);
        self
    }

    pub fn object(mut self, kind: EntityKind) -> Self {
        self.object = EntityPattern::Is(kind);
        self
    }

    pub fn modifier(mut self, modifier: ModifierPattern) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn arm(mut self, arm: RelationArm) -> Self {
        self.arms.push(arm);
        self
    }

    pub fn inverted(mut self) -> Self {
        self.orientation = Orientation::Inverted;
        self
    }

    /// The arm that applies to `edge`, if the rule matches at all.
    fn arm_for(&self, edge: &EdgeContext<'_>) -> Option<&RelationArm> {
        if !self.subject.matches(edge.subject)
            || !self.object.matches(edge.object)
            || !self.modifier.matches(edge.data.object_modifier())
        {
            return None;
        }
        self.arms.iter().find(|arm| arm.selector.matches(edge.relation))
    }

    /// Pure test: does this rule apply to `edge`?
    pub fn matches(&self, edge: &EdgeContext<'_>) -> bool {
        self.arm_for(edge).is_some()
    }

    /// Convert `edge`, or `None` if the rule does not apply.
    pub fn convert(&self, edge: &EdgeContext<'_>) -> Option<Triple> {
        let arm = self.arm_for(edge)?;
        let predicate = match &arm.emit {
            Emit::Predicate(p) => p.as_str().to_string(),
            Emit::PassThrough => clean_cell(edge.relation.as_str()),
            Emit::AssociationType => edge
                .data
                .association_type
                .as_deref()
                .map(clean_cell)
                .unwrap_or_else(|| Predicate::Association.as_str().to_string()),
        };
        let (subject, object) = match self.orientation {
            Orientation::Forward => (edge.subject, edge.object),
            Orientation::Inverted => (edge.object, edge.subject),
        };
        Some(Triple {
            subject: subject.curie(),
            predicate,
            object: object.curie(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rule set
// ---------------------------------------------------------------------------

/// An ordered rule chain: first match wins.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// The standard BEL → KEEN catalog, most specific rule first.
    pub fn standard() -> Self {
        use EntityKind::*;
        use Predicate as P;
        use Relation as R;

        let rules = vec![
            // 1. complex(X) hasComponent p(Y)  =>  (Y, partOf, X)
            Rule::new("complex-has-component")
                .subject(NamedComplex)
                .object(Protein)
                .arm(RelationArm::new(R::HasComponent, P::PartOf))
                .inverted(),
            // 2. p(X) partOf complex(Y)
            Rule::new("part-of-complex")
                .subject(Protein)
                .object(NamedComplex)
                .arm(RelationArm::new(R::PartOf, P::PartOf)),
            // 3. X reg act(Y)
            Rule::new("regulates-activity")
                .modifier(ModifierPattern::Activity)
                .arm(RelationArm::new(R::Regulates, P::ActivityDirectlyRegulatesActivityOf))
                .arm(RelationArm::new(
                    R::Increases,
                    P::ActivityDirectlyPositivelyRegulatesActivityOf,
                ))
                .arm(RelationArm::new(
                    R::Decreases,
                    P::ActivityDirectlyNegativelyRegulatesActivityOf,
                )),
            // 4. m(X) reg r(Y)
            Rule::new("mirna-regulates-expression")
                .subject(MicroRna)
                .object(Rna)
                .arm(RelationArm::new(R::Regulates, P::RegulatesExpressionOf))
                .arm(RelationArm::new(R::Increases, P::IncreasesExpressionOf))
                .arm(RelationArm::new(R::DirectlyIncreases, P::IncreasesExpressionOf))
                .arm(RelationArm::new(R::Decreases, P::RepressesExpressionOf))
                .arm(RelationArm::new(R::DirectlyDecreases, P::RepressesExpressionOf)),
            // 5.
            Rule::new("is-a").arm(RelationArm::new(R::IsA, P::IsA)),
            // 6.
            Rule::new("equivalent-to").arm(RelationArm::new(R::EquivalentTo, P::EquivalentTo)),
            // 7.
            Rule::new("correlation").arm(RelationArm {
                selector: RelationSelector::Correlative,
                emit: Emit::PassThrough,
            }),
            // 8.
            Rule::new("association").arm(RelationArm {
                selector: RelationSelector::Is(R::Association),
                emit: Emit::AssociationType,
            }),
            // 9. a(X) -| path(Y)
            Rule::new("drug-indication")
                .subject(Abundance)
                .object(Pathology)
                .arm(RelationArm::pass_through(R::Decreases)),
            // 10. a(X) -> path(Y)
            Rule::new("drug-side-effect")
                .subject(Abundance)
                .object(Pathology)
                .arm(RelationArm::pass_through(R::Increases)),
            // 11.
            Rule::new("regulates-amount")
                .modifier(ModifierPattern::Absent)
                .arm(RelationArm::new(R::Regulates, P::RegulatesAmountOf))
                .arm(RelationArm::new(R::Increases, P::IncreasesAmountOf))
                .arm(RelationArm::new(R::Decreases, P::DecreasesAmountOf)),
            // 12.
            Rule::new("decreases").arm(RelationArm::pass_through(R::Decreases)),
        ];

        Self::new("standard", rules)
    }

    /// First rule that converts `edge`, with its output.
    pub fn apply(&self, edge: &EdgeContext<'_>) -> Option<(&Rule, Triple)> {
        self.rules
            .iter()
            .find_map(|rule| rule.convert(edge).map(|triple| (rule, triple)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(subject: &'a Entity, object: &'a Entity, data: &'a EdgeData) -> EdgeContext<'a> {
        EdgeContext {
            subject,
            object,
            relation: data.relation.as_ref().unwrap(),
            data,
        }
    }

    fn rule(name: &str) -> Rule {
        RuleSet::standard()
            .rules
            .into_iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn standard_order_is_fixed() {
        let names: Vec<_> = RuleSet::standard().iter().map(|r| r.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                "complex-has-component",
                "part-of-complex",
                "regulates-activity",
                "mirna-regulates-expression",
                "is-a",
                "equivalent-to",
                "correlation",
                "association",
                "drug-indication",
                "drug-side-effect",
                "regulates-amount",
                "decreases",
            ]
        );
    }

    #[test]
    fn has_component_inverts() {
        let complex = Entity::named_complex("FPLX", "1");
        let protein = Entity::protein("HGNC", "1");
        let data = EdgeData::new(Relation::HasComponent);
        let r = rule("complex-has-component");

        assert!(r.matches(&ctx(&complex, &protein, &data)));
        assert_eq!(
            r.convert(&ctx(&complex, &protein, &data)),
            Some(Triple::new("HGNC:1", "partOf", "FPLX:1"))
        );
        // Conversion is pure.
        assert_eq!(
            r.convert(&ctx(&complex, &protein, &data)),
            r.convert(&ctx(&complex, &protein, &data))
        );
    }

    #[test]
    fn has_component_rejects_part_of() {
        let complex = Entity::named_complex("FPLX", "1");
        let protein = Entity::protein("HGNC", "1");
        let data = EdgeData::new(Relation::PartOf);
        assert!(!rule("complex-has-component").matches(&ctx(&complex, &protein, &data)));
    }

    #[test]
    fn part_of_needs_protein_subject() {
        let complex = Entity::named_complex("FPLX", "1");
        let protein = Entity::protein("HGNC", "1");
        let part_of = EdgeData::new(Relation::PartOf);
        let r = rule("part-of-complex");

        assert!(r.matches(&ctx(&protein, &complex, &part_of)));
        assert!(!r.matches(&ctx(&complex, &protein, &part_of)));
        assert!(!r.matches(&ctx(&protein, &complex, &EdgeData::new(Relation::HasComponent))));
    }

    #[test]
    fn activity_arms_pick_predicate() {
        let a = Entity::protein("HGNC", "1");
        let b = Entity::protein("HGNC", "2");
        let r = rule("regulates-activity");
        for (rel, expected) in [
            (Relation::Regulates, "activityDirectlyRegulatesActivityOf"),
            (Relation::Increases, "activityDirectlyPositivelyRegulatesActivityOf"),
            (Relation::Decreases, "activityDirectlyNegativelyRegulatesActivityOf"),
        ] {
            let data = EdgeData::new(rel).with_object_modifier(Modifier::Activity);
            assert_eq!(r.convert(&ctx(&a, &b, &data)).unwrap().predicate, expected);
        }

        let plain = EdgeData::new(Relation::Increases);
        assert!(!r.matches(&ctx(&a, &b, &plain)));
        let direct = EdgeData::new(Relation::DirectlyIncreases).with_object_modifier(Modifier::Activity);
        assert!(!r.matches(&ctx(&a, &b, &direct)));
    }

    #[test]
    fn mirna_arms_pick_predicate() {
        let mir = Entity::micro_rna("MIRBASE", "hsa-mir-21");
        let rna = Entity::rna("HGNC", "11998");
        let r = rule("mirna-regulates-expression");
        for (rel, expected) in [
            (Relation::Regulates, "regulatesExpressionOf"),
            (Relation::Increases, "increasesExpressionOf"),
            (Relation::DirectlyIncreases, "increasesExpressionOf"),
            (Relation::Decreases, "repressesExpressionOf"),
            (Relation::DirectlyDecreases, "repressesExpressionOf"),
        ] {
            let data = EdgeData::new(rel);
            assert_eq!(r.convert(&ctx(&mir, &rna, &data)).unwrap().predicate, expected);
        }

        // A micro-RNA is itself an RNA-family object.
        let other_mir = Entity::micro_rna("MIRBASE", "hsa-mir-22");
        assert!(r.matches(&ctx(&mir, &other_mir, &EdgeData::new(Relation::Decreases))));
        // But a plain RNA subject is not a micro-RNA.
        assert!(!r.matches(&ctx(&rna, &mir, &EdgeData::new(Relation::Decreases))));
    }

    #[test]
    fn association_uses_subtype() {
        let a = Entity::protein("HGNC", "1");
        let b = Entity::protein("HGNC", "2");
        let r = rule("association");

        let typed = EdgeData::new(Relation::Association).with_association_type("similarity");
        assert_eq!(
            r.convert(&ctx(&a, &b, &typed)),
            Some(Triple::new("HGNC:1", "similarity", "HGNC:2"))
        );
        let plain = EdgeData::new(Relation::Association);
        assert_eq!(
            r.convert(&ctx(&a, &b, &plain)),
            Some(Triple::new("HGNC:1", "association", "HGNC:2"))
        );
    }

    #[test]
    fn correlation_passes_through() {
        let a = Entity::protein("HGNC", "1");
        let b = Entity::pathology("MESH", "D000544");
        let data = EdgeData::new(Relation::NegativeCorrelation);
        assert_eq!(
            rule("correlation").convert(&ctx(&a, &b, &data)).unwrap().predicate,
            "negativeCorrelation"
        );
    }

    #[test]
    fn drug_rules_need_abundance_and_pathology() {
        let drug = Entity::abundance("CHEBI", "15365");
        let disease = Entity::pathology("MESH", "D010146");
        let protein = Entity::protein("HGNC", "1");

        let dec = EdgeData::new(Relation::Decreases);
        let inc = EdgeData::new(Relation::Increases);
        assert!(rule("drug-indication").matches(&ctx(&drug, &disease, &dec)));
        assert!(!rule("drug-indication").matches(&ctx(&drug, &disease, &inc)));
        assert!(rule("drug-side-effect").matches(&ctx(&drug, &disease, &inc)));
        assert!(!rule("drug-indication").matches(&ctx(&protein, &disease, &dec)));
    }

    #[test]
    fn amount_rule_needs_no_modifier() {
        let a = Entity::protein("HGNC", "1");
        let b = Entity::protein("HGNC", "2");
        let r = rule("regulates-amount");

        let plain = EdgeData::new(Relation::Decreases);
        assert_eq!(r.convert(&ctx(&a, &b, &plain)).unwrap().predicate, "decreasesAmountOf");
        let deg = EdgeData::new(Relation::Decreases).with_object_modifier(Modifier::Degradation);
        assert!(!r.matches(&ctx(&a, &b, &deg)));
    }

    #[test]
    fn apply_returns_first_match() {
        let drug = Entity::abundance("CHEBI", "15365");
        let disease = Entity::pathology("MESH", "D010146");
        let data = EdgeData::new(Relation::Decreases);
        let rules = RuleSet::standard();

        // Drug indication, amount and generic decreases all match; the
        // earliest one wins.
        let (rule, triple) = rules.apply(&ctx(&drug, &disease, &data)).unwrap();
        assert_eq!(rule.name, "drug-indication");
        assert_eq!(triple, Triple::new("CHEBI:15365", "decreases", "MESH:D010146"));
    }

    #[test]
    fn substitute_rule_set() {
        let custom = RuleSet::new(
            "custom",
            vec![Rule::new("translated").arm(RelationArm::pass_through(Relation::TranslatedTo))],
        );
        let rna = Entity::rna("HGNC", "1");
        let protein = Entity::protein("HGNC", "1");
        let data = EdgeData::new(Relation::TranslatedTo);

        assert!(RuleSet::standard().apply(&ctx(&rna, &protein, &data)).is_none());
        let (_, triple) = custom.apply(&ctx(&rna, &protein, &data)).unwrap();
        assert_eq!(triple.predicate, "translatedTo");
    }
}
