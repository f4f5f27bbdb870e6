//! Engine configuration

use crate::EngineError;
use proprel_domain::CompatibilityType;
use serde::{Deserialize, Serialize};

/// Weights and policy for scoring and suggestions
///
/// # Examples
///
/// ```
/// use proprel_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.incompatible_penalty, 1.0);
/// assert_eq!(config.not_recommended_penalty, 0.5);
///
/// let strict = EngineConfig::strict();
/// assert_eq!(strict.incompatible_penalty, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Penalty multiplier for INCOMPATIBLE rules
    pub incompatible_penalty: f64,

    /// Penalty multiplier for NOT_RECOMMENDED rules
    pub not_recommended_penalty: f64,

    /// Confidence assumed for rules that do not state one
    pub default_confidence: f64,

    /// Run the per-property improvement pass during validation
    pub suggest_improvements: bool,

    /// Maximum improvements surfaced per property (at least 1; use
    /// `suggest_improvements = false` to turn the pass off)
    pub max_suggestions_per_property: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            incompatible_penalty: 1.0,
            not_recommended_penalty: 0.5,
            default_confidence: 1.0,
            suggest_improvements: true,
            max_suggestions_per_property: 3,
        }
    }
}

impl EngineConfig {
    /// Softer penalties: discouraged values are suggested more readily
    pub fn lenient() -> Self {
        Self {
            incompatible_penalty: 0.5,
            not_recommended_penalty: 0.25,
            ..Self::default()
        }
    }

    /// Harsher penalties: any conflict weighs twice as much
    pub fn strict() -> Self {
        Self {
            incompatible_penalty: 2.0,
            not_recommended_penalty: 1.0,
            ..Self::default()
        }
    }

    /// Signed weight of one rule kind (positive for support, negative for conflicts)
    pub fn weight(&self, compatibility: CompatibilityType) -> f64 {
        match compatibility {
            CompatibilityType::Compatible => 1.0,
            CompatibilityType::NotRecommended => -self.not_recommended_penalty,
            CompatibilityType::Incompatible => -self.incompatible_penalty,
        }
    }

    /// Check that weights are usable
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, penalty) in [
            ("incompatible_penalty", self.incompatible_penalty),
            ("not_recommended_penalty", self.not_recommended_penalty),
        ] {
            if !penalty.is_finite() || penalty < 0.0 {
                return Err(EngineError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, penalty
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(EngineError::Config(format!(
                "default_confidence must be in [0, 1], got {}",
                self.default_confidence
            )));
        }
        if self.max_suggestions_per_property == 0 {
            return Err(EngineError::Config(
                "max_suggestions_per_property must be at least 1 (set suggest_improvements = false to disable)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
