//! Validation orchestrator: one request/response cycle over the shared store

use crate::{CompatibilityEvaluator, EngineConfig, EngineError, RecommendationEngine};
use proprel_domain::{PropertyAssignment, Recommendation, RelationshipLookup, ValidationResult};
use proprel_store::{RelationshipIndex, RelationshipStore, StoreError};
use std::sync::Arc;
use tracing::debug;

/// Composes the evaluator and the recommendation engine over a shared store
///
/// Every call takes its own snapshot handle from the store, so concurrent
/// calls never interfere and a reload in the middle of a call does not
/// change what that call sees.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use proprel_domain::{CompatibilityType, PropertyAssignment, Relationship};
/// use proprel_engine::{EngineConfig, ValidationOrchestrator};
/// use proprel_store::{Corpus, RelationshipStore};
///
/// let rule = Relationship::new(
///     "tile",
///     ("finish", "glossy"),
///     ("material", "fabric"),
///     CompatibilityType::Incompatible,
///     "fabric cannot be glossy-finished",
/// ).unwrap();
/// let store = Arc::new(RelationshipStore::from_corpus(Corpus::new(vec![rule])).unwrap());
/// let orchestrator = ValidationOrchestrator::new(store, EngineConfig::default()).unwrap();
///
/// let assignment = PropertyAssignment::new()
///     .with("finish", "glossy")
///     .with("material", "fabric");
/// let result = orchestrator.validate("tile", &assignment).unwrap();
/// assert_eq!(result.issues.len(), 1);
/// ```
pub struct ValidationOrchestrator {
    store: Arc<RelationshipStore>,
    evaluator: CompatibilityEvaluator,
    engine: RecommendationEngine,
}

impl ValidationOrchestrator {
    /// Create an orchestrator over `store`
    ///
    /// # Errors
    /// Returns `Config` if the weights are unusable
    pub fn new(store: Arc<RelationshipStore>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            store,
            evaluator: CompatibilityEvaluator::new(),
            engine: RecommendationEngine::new(config),
        })
    }

    /// The shared store
    pub fn store(&self) -> &Arc<RelationshipStore> {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Validate a full assignment: issues plus improvements over current values
    ///
    /// An unknown material type yields an empty result, not an error.
    pub fn validate(
        &self,
        material_type: &str,
        assignment: &PropertyAssignment,
    ) -> Result<ValidationResult, EngineError> {
        match self.index(material_type)? {
            Some(index) => Ok(self.validate_with(&*index, assignment)),
            None => Ok(ValidationResult::empty()),
        }
    }

    /// Ranked recommendations for one target property
    ///
    /// Unknown material types and unknown target properties yield an empty list.
    pub fn recommend(
        &self,
        material_type: &str,
        assignment: &PropertyAssignment,
        target_property: &str,
    ) -> Result<Vec<Recommendation>, EngineError> {
        match self.index(material_type)? {
            Some(index) => Ok(self.engine.recommend(&*index, assignment, target_property)),
            None => Ok(Vec::new()),
        }
    }

    /// Validation against an explicit lookup (no store involved)
    pub fn validate_with<L>(&self, lookup: &L, assignment: &PropertyAssignment) -> ValidationResult
    where
        L: RelationshipLookup + ?Sized,
    {
        let issues = self.evaluator.evaluate(lookup, assignment);
        let recommendations = if self.config().suggest_improvements {
            self.improvements(lookup, assignment)
        } else {
            Vec::new()
        };

        ValidationResult {
            issues,
            recommendations,
        }
    }

    /// For every assigned property, the values that score strictly better than
    /// the one currently selected
    ///
    /// The selected value itself is never suggested. Properties are visited in
    /// assignment order and each contributes at most
    /// `max_suggestions_per_property` entries, best first.
    pub fn improvements<L>(&self, lookup: &L, assignment: &PropertyAssignment) -> Vec<Recommendation>
    where
        L: RelationshipLookup + ?Sized,
    {
        let limit = self.config().max_suggestions_per_property;
        let mut suggestions = Vec::new();

        for (property, current) in assignment.iter() {
            if !current.is_well_formed() {
                continue;
            }

            let ranked = self.engine.recommend(lookup, assignment, property);
            let Some(top) = ranked.first() else {
                continue;
            };

            let current_score = self.engine.score(lookup, assignment, property, current).score;
            if top.score <= current_score {
                continue;
            }

            suggestions.extend(
                ranked
                    .into_iter()
                    .filter(|rec| !rec.recommended_value.matches(current) && rec.score > current_score)
                    .take(limit),
            );
        }

        suggestions
    }

    fn index(&self, material_type: &str) -> Result<Option<Arc<RelationshipIndex>>, EngineError> {
        match self.store.load(material_type) {
            Ok(index) => Ok(Some(index)),
            Err(StoreError::NotFound(_)) => {
                debug!("No rules for material type '{}', nothing to check", material_type);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
