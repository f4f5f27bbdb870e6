//! Property tests for the evaluator, the recommendation engine and the orchestrator

use proprel_domain::{
    CompatibilityType, Confidence, PropertyAssignment, PropertyValue, Relationship,
};
use proprel_engine::{EngineConfig, ValidationOrchestrator};
use proprel_store::{Corpus, RelationshipStore};
use proptest::prelude::*;
use std::sync::Arc;

const PROPERTIES: [&str; 5] = ["color", "finish", "material", "size", "use"];
const VALUES: [&str; 3] = ["x", "y", "z"];

fn compatibility() -> impl Strategy<Value = CompatibilityType> {
    prop_oneof![
        Just(CompatibilityType::Compatible),
        Just(CompatibilityType::NotRecommended),
        Just(CompatibilityType::Incompatible),
    ]
}

fn rule(kind: impl Strategy<Value = CompatibilityType>) -> impl Strategy<Value = Relationship> {
    (
        0..PROPERTIES.len(),
        1..PROPERTIES.len(),
        0..VALUES.len(),
        0..VALUES.len(),
        kind,
        proptest::option::of(0.0f64..=1.0),
    )
        .prop_map(|(source, offset, source_value, target_value, kind, confidence)| {
            let target = (source + offset) % PROPERTIES.len();
            let rel = Relationship::new(
                "tile",
                (PROPERTIES[source], VALUES[source_value]),
                (PROPERTIES[target], VALUES[target_value]),
                kind,
                format!("rule {}-{}", PROPERTIES[source], PROPERTIES[target]),
            )
            .unwrap();
            match confidence {
                Some(c) => rel.with_confidence(Confidence::new(c).unwrap()),
                None => rel,
            }
        })
}

fn entries() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    // One optional value per property
    proptest::collection::vec(proptest::option::of(0..VALUES.len()), PROPERTIES.len()).prop_map(
        |slots| {
            slots
                .into_iter()
                .enumerate()
                .filter_map(|(p, v)| v.map(|v| (PROPERTIES[p], VALUES[v])))
                .collect()
        },
    )
}

fn orchestrator(rules: Vec<Relationship>) -> ValidationOrchestrator {
    let store = Arc::new(RelationshipStore::from_corpus(Corpus::new(rules)).unwrap());
    ValidationOrchestrator::new(store, EngineConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn compatible_only_corpus_has_no_issues(
        rules in proptest::collection::vec(rule(Just(CompatibilityType::Compatible)), 0..20),
        entries in entries(),
    ) {
        let assignment: PropertyAssignment = entries.into_iter().collect();
        let result = orchestrator(rules).validate("tile", &assignment).unwrap();
        prop_assert!(result.issues.is_empty());
    }

    #[test]
    fn incompatible_pair_reported_exactly_once_in_any_order(
        rules in proptest::collection::vec(rule(compatibility()), 0..20),
        conflict in rule(Just(CompatibilityType::Incompatible)),
        entries in entries(),
    ) {
        let mut rules = rules;
        rules.push(conflict.clone());
        let orchestrator = orchestrator(rules);

        let mut entries: Vec<(String, PropertyValue)> = entries
            .into_iter()
            .filter(|(p, _)| *p != conflict.source_property && *p != conflict.target_property)
            .map(|(p, v)| (p.to_string(), PropertyValue::from(v)))
            .collect();
        entries.push((conflict.source_property.clone(), conflict.source_value.clone()));
        entries.push((conflict.target_property.clone(), conflict.target_value.clone()));

        let forward: PropertyAssignment = entries.iter().cloned().collect();
        let backward: PropertyAssignment = entries.iter().rev().cloned().collect();

        let result = orchestrator.validate("tile", &forward).unwrap();
        prop_assert_eq!(&result, &orchestrator.validate("tile", &backward).unwrap());

        let matching: Vec<_> = result
            .issues
            .iter()
            .filter(|issue| {
                let props = [issue.source_property.as_str(), issue.target_property.as_str()];
                props.contains(&conflict.source_property.as_str())
                    && props.contains(&conflict.target_property.as_str())
            })
            .collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].compatibility, CompatibilityType::Incompatible);
    }

    #[test]
    fn recommendations_are_clamped_positive_and_ordered(
        rules in proptest::collection::vec(rule(compatibility()), 0..30),
        entries in entries(),
        target in 0..PROPERTIES.len(),
    ) {
        let assignment: PropertyAssignment = entries.into_iter().collect();
        let orchestrator = orchestrator(rules);

        let recs = orchestrator.recommend("tile", &assignment, PROPERTIES[target]).unwrap();
        for rec in &recs {
            prop_assert!(rec.score > 0.0);
            prop_assert!((0.0..=1.0).contains(&rec.confidence.value()));
        }
        for pair in recs.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            prop_assert!(pair[0].confidence >= pair[1].confidence);
            if pair[0].score == pair[1].score {
                prop_assert!(
                    pair[0].recommended_value.canonical() < pair[1].recommended_value.canonical()
                );
            }
        }

        // Repeated calls are identical
        prop_assert_eq!(recs, orchestrator.recommend("tile", &assignment, PROPERTIES[target]).unwrap());
    }

    #[test]
    fn validate_is_idempotent_and_never_suggests_current_value(
        rules in proptest::collection::vec(rule(compatibility()), 0..30),
        entries in entries(),
    ) {
        let assignment: PropertyAssignment = entries.into_iter().collect();
        let orchestrator = orchestrator(rules);

        let first = orchestrator.validate("tile", &assignment).unwrap();
        let second = orchestrator.validate("tile", &assignment).unwrap();
        prop_assert_eq!(&first, &second);

        for rec in &first.recommendations {
            let current = assignment.get(&rec.property).unwrap();
            prop_assert!(!rec.recommended_value.matches(current));
        }
    }
}
