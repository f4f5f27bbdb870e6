//! Relationship module (pairwise compatibility rules only)

use crate::{Confidence, PropertyValue};
use std::fmt;

/// How two property values relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatibilityType {
    /// The values work well together (supports recommendations)
    Compatible,

    /// The combination works but is discouraged
    NotRecommended,

    /// The combination cannot be produced
    Incompatible,
}

impl CompatibilityType {
    /// Wire name (`COMPATIBLE`, `NOT_RECOMMENDED`, `INCOMPATIBLE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityType::Compatible => "COMPATIBLE",
            CompatibilityType::NotRecommended => "NOT_RECOMMENDED",
            CompatibilityType::Incompatible => "INCOMPATIBLE",
        }
    }

    /// Parse a compatibility type, accepting any case and `-` or space for `_`
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "COMPATIBLE" => Some(CompatibilityType::Compatible),
            "NOT_RECOMMENDED" => Some(CompatibilityType::NotRecommended),
            "INCOMPATIBLE" => Some(CompatibilityType::Incompatible),
            _ => None,
        }
    }

    /// Severity rank; higher is worse
    pub fn severity(&self) -> u8 {
        match self {
            CompatibilityType::Compatible => 0,
            CompatibilityType::NotRecommended => 1,
            CompatibilityType::Incompatible => 2,
        }
    }

    /// Whether a pair resolved to this type is reported as an issue
    pub fn is_issue(&self) -> bool {
        !matches!(self, CompatibilityType::Compatible)
    }
}

impl fmt::Display for CompatibilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed compatibility rule between two property values of one material type
///
/// Loaded once with the corpus and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Material type the rule applies to (e.g. `tile`)
    pub material_type: String,

    /// Source property name
    pub source_property: String,

    /// Source property value
    pub source_value: PropertyValue,

    /// Target property name
    pub target_property: String,

    /// Target property value
    pub target_value: PropertyValue,

    /// Kind of relationship
    pub compatibility: CompatibilityType,

    /// Human-readable explanation shown to the user
    pub reason: String,

    /// Rule strength; `None` means the engine's default applies
    pub confidence: Option<Confidence>,
}

impl Relationship {
    /// Create a new relationship
    ///
    /// # Errors
    /// Returns error if a name is empty, a value is blank or not a finite
    /// number, or the rule links a property to itself
    pub fn new(
        material_type: impl Into<String>,
        (source_property, source_value): (impl Into<String>, impl Into<PropertyValue>),
        (target_property, target_value): (impl Into<String>, impl Into<PropertyValue>),
        compatibility: CompatibilityType,
        reason: impl Into<String>,
    ) -> Result<Self, String> {
        let relationship = Self {
            material_type: material_type.into(),
            source_property: source_property.into(),
            source_value: source_value.into(),
            target_property: target_property.into(),
            target_value: target_value.into(),
            compatibility,
            reason: reason.into(),
            confidence: None,
        };
        relationship.check()?;
        Ok(relationship)
    }

    /// Attach an explicit confidence
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Structural checks shared by constructors and corpus loading
    pub fn check(&self) -> Result<(), String> {
        if self.material_type.trim().is_empty() {
            return Err("Material type cannot be empty".to_string());
        }
        if self.source_property.trim().is_empty() || self.target_property.trim().is_empty() {
            return Err("Property names cannot be empty".to_string());
        }
        for (property, value) in [
            (&self.source_property, &self.source_value),
            (&self.target_property, &self.target_value),
        ] {
            if value.is_blank() {
                return Err(format!("Value for property '{}' cannot be blank", property));
            }
            if !value.is_well_formed() {
                return Err(format!(
                    "Value for property '{}' must be a finite number, got {}",
                    property, value
                ));
            }
        }
        if self.source_property == self.target_property {
            return Err(format!(
                "Relationship links property '{}' to itself",
                self.source_property
            ));
        }
        Ok(())
    }

    /// Confidence to use when weighting this rule
    pub fn effective_confidence(&self, default: f64) -> f64 {
        self.confidence.map(|c| c.value()).unwrap_or(default)
    }

    /// Whether `(property, value)` is this rule's source
    pub fn has_source(&self, property: &str, value: &PropertyValue) -> bool {
        self.source_property == property && self.source_value.matches(value)
    }

    /// Whether `(property, value)` is this rule's target
    pub fn has_target(&self, property: &str, value: &PropertyValue) -> bool {
        self.target_property == property && self.target_value.matches(value)
    }

    /// Whether `(property, value)` appears at either end of the rule
    pub fn touches(&self, property: &str, value: &PropertyValue) -> bool {
        self.has_source(property, value) || self.has_target(property, value)
    }

    /// Whether the rule links the two endpoints, in either direction
    pub fn links(
        &self,
        a_property: &str,
        a_value: &PropertyValue,
        b_property: &str,
        b_value: &PropertyValue,
    ) -> bool {
        (self.has_source(a_property, a_value) && self.has_target(b_property, b_value))
            || (self.has_source(b_property, b_value) && self.has_target(a_property, a_value))
    }

    /// The endpoint opposite to `(property, value)`, if the rule touches it
    pub fn other_end(&self, property: &str, value: &PropertyValue) -> Option<(&str, &PropertyValue)> {
        if self.has_source(property, value) {
            Some((self.target_property.as_str(), &self.target_value))
        } else if self.has_target(property, value) {
            Some((self.source_property.as_str(), &self.source_value))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossy_fabric() -> Relationship {
        Relationship::new(
            "tile",
            ("finish", "glossy"),
            ("material", "fabric"),
            CompatibilityType::Incompatible,
            "fabric cannot be glossy-finished",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_compatibility_type() {
        assert_eq!(CompatibilityType::parse("INCOMPATIBLE"), Some(CompatibilityType::Incompatible));
        assert_eq!(CompatibilityType::parse("not-recommended"), Some(CompatibilityType::NotRecommended));
        assert_eq!(CompatibilityType::parse("Compatible"), Some(CompatibilityType::Compatible));
        assert_eq!(CompatibilityType::parse("maybe"), None);
    }

    #[test]
    fn test_severity_order() {
        assert!(CompatibilityType::Incompatible.severity() > CompatibilityType::NotRecommended.severity());
        assert!(CompatibilityType::NotRecommended.severity() > CompatibilityType::Compatible.severity());
        assert!(!CompatibilityType::Compatible.is_issue());
    }

    #[test]
    fn test_links_is_symmetric() {
        let rel = glossy_fabric();
        let glossy = PropertyValue::from("glossy");
        let fabric = PropertyValue::from("fabric");

        assert!(rel.links("finish", &glossy, "material", &fabric));
        assert!(rel.links("material", &fabric, "finish", &glossy));
        assert!(!rel.links("finish", &fabric, "material", &glossy));
    }

    #[test]
    fn test_other_end() {
        let rel = glossy_fabric();
        let fabric = PropertyValue::from("fabric");
        let (property, value) = rel.other_end("material", &fabric).unwrap();
        assert_eq!(property, "finish");
        assert_eq!(value, &PropertyValue::from("glossy"));
        assert!(rel.other_end("material", &PropertyValue::from("wood")).is_none());
    }

    #[test]
    fn test_self_reference_rejected() {
        let result = Relationship::new(
            "tile",
            ("finish", "glossy"),
            ("finish", "matte"),
            CompatibilityType::Incompatible,
            "",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unusable_values_rejected() {
        let blank = Relationship::new(
            "tile",
            ("finish", "  "),
            ("material", "fabric"),
            CompatibilityType::Incompatible,
            "",
        );
        assert!(blank.unwrap_err().contains("blank"));

        let infinite = Relationship::new(
            "tile",
            ("material", "ceramic"),
            ("thickness", f64::INFINITY),
            CompatibilityType::Compatible,
            "",
        );
        assert!(infinite.unwrap_err().contains("finite"));
    }

    #[test]
    fn test_effective_confidence_default() {
        let rel = glossy_fabric();
        assert_eq!(rel.effective_confidence(1.0), 1.0);

        let rel = rel.with_confidence(Confidence::new(0.6).unwrap());
        assert_eq!(rel.effective_confidence(1.0), 0.6);
    }
}
