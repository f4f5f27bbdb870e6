//! Recommendation engine: ranks candidate values of one property

use crate::evaluator::malformed_properties;
use crate::EngineConfig;
use proprel_domain::{
    CompatibilityType, Confidence, PropertyAssignment, PropertyValue, Recommendation,
    RelationshipLookup,
};
use std::collections::HashSet;
use tracing::debug;

/// Aggregate support of one candidate value
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// Weighted sum of rule confidences (may be negative or above 1)
    pub score: f64,
    /// Reasons of the COMPATIBLE rules that contributed, deduplicated
    pub reasons: Vec<String>,
    /// `property=value` context entries that support the candidate
    pub supporters: Vec<String>,
}

/// Scores candidate values for a target property from the rest of the assignment
///
/// Each rule linking an assigned `(property, value)` to `(target, candidate)`
/// adds `weight(kind) * confidence`: COMPATIBLE rules add their confidence,
/// conflicts subtract their confidence scaled by the configured penalty.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aggregate support for `target_property = candidate`
    ///
    /// The target itself is never part of its own context.
    pub fn score<L>(
        &self,
        lookup: &L,
        assignment: &PropertyAssignment,
        target_property: &str,
        candidate: &PropertyValue,
    ) -> CandidateScore
    where
        L: RelationshipLookup + ?Sized,
    {
        let malformed = malformed_properties(assignment);
        self.score_with(lookup, assignment, &malformed, target_property, candidate)
    }

    fn score_with<L>(
        &self,
        lookup: &L,
        assignment: &PropertyAssignment,
        malformed: &HashSet<&str>,
        target_property: &str,
        candidate: &PropertyValue,
    ) -> CandidateScore
    where
        L: RelationshipLookup + ?Sized,
    {
        let mut result = CandidateScore {
            score: 0.0,
            reasons: Vec::new(),
            supporters: Vec::new(),
        };

        for (property, value) in assignment.context_for(target_property) {
            if malformed.contains(property) {
                continue;
            }

            for rule in lookup.between(property, value, target_property, candidate) {
                let confidence = rule.effective_confidence(self.config.default_confidence);
                result.score += self.config.weight(rule.compatibility) * confidence;

                if rule.compatibility == CompatibilityType::Compatible {
                    let supporter = format!("{}={}", property, value);
                    if !result.supporters.contains(&supporter) {
                        result.supporters.push(supporter);
                    }
                    if !rule.reason.is_empty() && !result.reasons.contains(&rule.reason) {
                        result.reasons.push(rule.reason.clone());
                    }
                }
            }
        }

        result
    }

    /// Ranked recommendations for `target_property`
    ///
    /// Only candidates with a strictly positive score are returned, ordered by
    /// score (descending) and then canonical value (ascending). An unknown
    /// target property yields an empty list.
    pub fn recommend<L>(
        &self,
        lookup: &L,
        assignment: &PropertyAssignment,
        target_property: &str,
    ) -> Vec<Recommendation>
    where
        L: RelationshipLookup + ?Sized,
    {
        let candidates = lookup.candidate_values(target_property);
        let malformed = malformed_properties(assignment);

        let mut ranked: Vec<Recommendation> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let scored =
                    self.score_with(lookup, assignment, &malformed, target_property, &candidate);
                if scored.score <= 0.0 || scored.score.is_nan() {
                    return None;
                }
                let reason = if scored.reasons.is_empty() {
                    format!("Compatible with {}", scored.supporters.join(", "))
                } else {
                    scored.reasons.join("; ")
                };
                Some(Recommendation {
                    property: target_property.to_string(),
                    confidence: Confidence::clamped(scored.score),
                    score: scored.score,
                    recommended_value: candidate,
                    reason,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.recommended_value.canonical().cmp(&b.recommended_value.canonical()))
        });

        debug!(
            "Ranked {} candidate(s) for '{}' on '{}'",
            ranked.len(),
            target_property,
            lookup.material_type()
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proprel_domain::Relationship;
    use proprel_store::RelationshipIndex;

    fn rule(
        source: (&str, &str),
        target: (&str, &str),
        kind: CompatibilityType,
        confidence: Option<f64>,
    ) -> Relationship {
        let rel = Relationship::new("tile", source, target, kind, "").unwrap();
        match confidence {
            Some(c) => rel.with_confidence(Confidence::new(c).unwrap()),
            None => rel,
        }
    }

    fn ceramic_index() -> RelationshipIndex {
        RelationshipIndex::build(
            "tile",
            vec![
                rule(("material", "ceramic"), ("finish", "matte"), CompatibilityType::Compatible, Some(0.9)),
                rule(("material", "ceramic"), ("finish", "glossy"), CompatibilityType::NotRecommended, Some(0.6)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ceramic_finish_recommendation() {
        let engine = RecommendationEngine::default();
        let assignment = PropertyAssignment::new().with("material", "ceramic");

        let recs = engine.recommend(&ceramic_index(), &assignment, "finish");

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommended_value, PropertyValue::from("matte"));
        assert!((recs[0].confidence.value() - 0.9).abs() < 1e-9);
        assert_eq!(recs[0].reason, "Compatible with material=ceramic");
    }

    #[test]
    fn test_penalty_score() {
        let engine = RecommendationEngine::default();
        let assignment = PropertyAssignment::new().with("material", "ceramic");

        let scored = engine.score(&ceramic_index(), &assignment, "finish", &"glossy".into());
        assert!((scored.score + 0.3).abs() < 1e-9);
        assert!(scored.supporters.is_empty());
    }

    #[test]
    fn test_unknown_target_is_empty() {
        let engine = RecommendationEngine::default();
        let assignment = PropertyAssignment::new().with("material", "ceramic");
        assert!(engine.recommend(&ceramic_index(), &assignment, "color").is_empty());
    }

    #[test]
    fn test_default_confidence_and_clamping() {
        let index = RelationshipIndex::build(
            "tile",
            vec![
                rule(("material", "ceramic"), ("finish", "matte"), CompatibilityType::Compatible, None),
                rule(("use", "floor"), ("finish", "matte"), CompatibilityType::Compatible, None),
            ],
        )
        .unwrap();
        let assignment = PropertyAssignment::new()
            .with("material", "ceramic")
            .with("use", "floor");

        let recs = RecommendationEngine::default().recommend(&index, &assignment, "finish");

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].score, 2.0);
        assert_eq!(recs[0].confidence, Confidence::ONE);
    }

    #[test]
    fn test_ties_break_lexically() {
        let index = RelationshipIndex::build(
            "tile",
            vec![
                rule(("material", "ceramic"), ("finish", "satin"), CompatibilityType::Compatible, Some(0.5)),
                rule(("material", "ceramic"), ("finish", "matte"), CompatibilityType::Compatible, Some(0.5)),
                rule(("material", "ceramic"), ("finish", "honed"), CompatibilityType::Compatible, Some(0.8)),
            ],
        )
        .unwrap();
        let assignment = PropertyAssignment::new().with("material", "ceramic");

        let values: Vec<String> = RecommendationEngine::default()
            .recommend(&index, &assignment, "finish")
            .iter()
            .map(|r| r.recommended_value.canonical())
            .collect();

        assert_eq!(values, vec!["honed", "matte", "satin"]);
    }

    #[test]
    fn test_saturated_confidence_ranks_by_score() {
        let index = RelationshipIndex::build(
            "tile",
            vec![
                rule(("material", "ceramic"), ("finish", "glossy"), CompatibilityType::Compatible, None),
                rule(("use", "floor"), ("finish", "glossy"), CompatibilityType::Compatible, None),
                rule(("material", "ceramic"), ("finish", "satin"), CompatibilityType::Compatible, None),
                rule(("use", "floor"), ("finish", "satin"), CompatibilityType::Compatible, None),
                rule(("edge", "rectified"), ("finish", "satin"), CompatibilityType::Compatible, None),
            ],
        )
        .unwrap();
        let assignment = PropertyAssignment::new()
            .with("material", "ceramic")
            .with("use", "floor")
            .with("edge", "rectified");

        let recs = RecommendationEngine::default().recommend(&index, &assignment, "finish");

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].confidence, recs[1].confidence);
        assert_eq!(recs[0].recommended_value, PropertyValue::from("satin"));
        assert_eq!(recs[0].score, 3.0);
        assert_eq!(recs[1].recommended_value, PropertyValue::from("glossy"));
        assert_eq!(recs[1].score, 2.0);
    }

    #[test]
    fn test_strict_config_excludes_mixed_support() {
        let index = RelationshipIndex::build(
            "tile",
            vec![
                rule(("material", "ceramic"), ("finish", "glossy"), CompatibilityType::Compatible, Some(0.8)),
                rule(("use", "floor"), ("finish", "glossy"), CompatibilityType::NotRecommended, Some(0.6)),
            ],
        )
        .unwrap();
        let assignment = PropertyAssignment::new()
            .with("material", "ceramic")
            .with("use", "floor");

        // default: 0.8 - 0.5 * 0.6 = 0.5
        let recs = RecommendationEngine::default().recommend(&index, &assignment, "finish");
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 0.5).abs() < 1e-9);

        // strict: 0.8 - 1.0 * 0.6 = 0.2
        let recs = RecommendationEngine::new(EngineConfig::strict()).recommend(&index, &assignment, "finish");
        assert!((recs[0].score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_target_value_in_assignment_is_ignored_as_context() {
        let assignment = PropertyAssignment::new()
            .with("material", "ceramic")
            .with("finish", "glossy");

        let recs = RecommendationEngine::default().recommend(&ceramic_index(), &assignment, "finish");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommended_value, PropertyValue::from("matte"));
    }
}
