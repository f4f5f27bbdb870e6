//! Trait definitions for rule lookup
//!
//! The evaluator and recommendation engine only see rules through this trait,
//! so they can be exercised against an in-memory fixture as well as the
//! indexed store.

use crate::{PropertyValue, Relationship};

/// Read-only access to the rules of a single material type
///
/// Implemented by the infrastructure layer (proprel-store)
pub trait RelationshipLookup {
    /// Material type this lookup answers for
    fn material_type(&self) -> &str;

    /// Every relationship where `(property, value)` is the source or the target
    fn touching(&self, property: &str, value: &PropertyValue) -> Vec<&Relationship>;

    /// Every value of `property` mentioned by any rule, in canonical order
    fn candidate_values(&self, property: &str) -> Vec<PropertyValue>;

    /// Relationships linking two endpoints, in either direction
    fn between(
        &self,
        a_property: &str,
        a_value: &PropertyValue,
        b_property: &str,
        b_value: &PropertyValue,
    ) -> Vec<&Relationship> {
        self.touching(a_property, a_value)
            .into_iter()
            .filter(|rel| rel.links(a_property, a_value, b_property, b_value))
            .collect()
    }
}
