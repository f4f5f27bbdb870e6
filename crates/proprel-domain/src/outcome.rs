//! Per-request results: issues, recommendations, and their aggregate

use crate::{CompatibilityType, Confidence, PropertyValue, Relationship};

/// A NOT_RECOMMENDED or INCOMPATIBLE pair detected in an assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Source property of the violated rule
    pub source_property: String,
    /// Source value of the violated rule
    pub source_value: PropertyValue,
    /// Target property of the violated rule
    pub target_property: String,
    /// Target value of the violated rule
    pub target_value: PropertyValue,
    /// Severity of the violation (never `Compatible`)
    pub compatibility: CompatibilityType,
    /// Explanation carried over from the rule
    pub reason: String,
}

impl Issue {
    /// Build an issue from the rule that produced it
    pub fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            source_property: relationship.source_property.clone(),
            source_value: relationship.source_value.clone(),
            target_property: relationship.target_property.clone(),
            target_value: relationship.target_value.clone(),
            compatibility: relationship.compatibility,
            reason: relationship.reason.clone(),
        }
    }

    /// Order-independent key of the pair this issue is about
    pub fn pair_key(&self) -> (String, String) {
        let a = format!("{}={}", self.source_property, self.source_value.canonical());
        let b = format!("{}={}", self.target_property, self.target_value.canonical());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// A suggested value for one property
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Property the suggestion is for
    pub property: String,
    /// Suggested value
    pub recommended_value: PropertyValue,
    /// Aggregate support clamped to [0, 1]
    pub confidence: Confidence,
    /// Raw aggregate support before clamping (used for ranking)
    pub score: f64,
    /// Why the value is suggested
    pub reason: String,
}

/// Aggregate result of one validation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Detected issues, INCOMPATIBLE first
    pub issues: Vec<Issue>,
    /// Improvements over the current selection
    pub recommendations: Vec<Recommendation>,
}

impl ValidationResult {
    /// A result with nothing to report
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there are neither issues nor recommendations
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.recommendations.is_empty()
    }

    /// Number of INCOMPATIBLE issues
    pub fn incompatible_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.compatibility == CompatibilityType::Incompatible)
            .count()
    }
}
