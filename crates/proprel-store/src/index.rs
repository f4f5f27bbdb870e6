//! Per-material relationship index

use crate::StoreError;
use proprel_domain::{PropertyValue, Relationship, RelationshipLookup};
use std::collections::{BTreeMap, HashMap};

/// Index key: a property name plus the canonical form of one of its values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EndpointKey {
    property: String,
    value: String,
}

impl EndpointKey {
    fn new(property: &str, value: &PropertyValue) -> Self {
        Self {
            property: property.to_string(),
            value: value.canonical(),
        }
    }
}

/// All rules of one material type, indexed by `(property, value)` endpoint
///
/// Built once from a full rule set and never mutated; a corpus refresh builds
/// a fresh index instead.
#[derive(Debug)]
pub struct RelationshipIndex {
    material_type: String,
    relationships: Vec<Relationship>,
    by_endpoint: HashMap<EndpointKey, Vec<usize>>,
    values_by_property: HashMap<String, BTreeMap<String, PropertyValue>>,
}

impl RelationshipIndex {
    /// Build the index for `material_type`
    ///
    /// # Errors
    /// Returns `InvalidData` if a rule belongs to another material type or
    /// fails its structural checks
    pub fn build(
        material_type: impl Into<String>,
        relationships: Vec<Relationship>,
    ) -> Result<Self, StoreError> {
        let material_type = material_type.into();
        let mut by_endpoint: HashMap<EndpointKey, Vec<usize>> = HashMap::new();
        let mut values_by_property: HashMap<String, BTreeMap<String, PropertyValue>> =
            HashMap::new();

        for (position, rel) in relationships.iter().enumerate() {
            if rel.material_type != material_type {
                return Err(StoreError::InvalidData(format!(
                    "Rule for material '{}' cannot be indexed under '{}'",
                    rel.material_type, material_type
                )));
            }
            rel.check().map_err(StoreError::InvalidData)?;

            for (property, value) in [
                (&rel.source_property, &rel.source_value),
                (&rel.target_property, &rel.target_value),
            ] {
                by_endpoint
                    .entry(EndpointKey::new(property, value))
                    .or_default()
                    .push(position);
                values_by_property
                    .entry(property.clone())
                    .or_default()
                    .entry(value.canonical())
                    .or_insert_with(|| value.clone());
            }
        }

        Ok(Self {
            material_type,
            relationships,
            by_endpoint,
            values_by_property,
        })
    }

    /// Number of rules in the index
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// True when the index holds no rules
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Number of distinct property names mentioned by the rules
    pub fn property_count(&self) -> usize {
        self.values_by_property.len()
    }

    /// Iterate all rules in corpus order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }
}

impl RelationshipLookup for RelationshipIndex {
    fn material_type(&self) -> &str {
        &self.material_type
    }

    fn touching(&self, property: &str, value: &PropertyValue) -> Vec<&Relationship> {
        self.by_endpoint
            .get(&EndpointKey::new(property, value))
            .map(|positions| positions.iter().map(|&i| &self.relationships[i]).collect())
            .unwrap_or_default()
    }

    fn candidate_values(&self, property: &str) -> Vec<PropertyValue> {
        self.values_by_property
            .get(property)
            .map(|values| values.values().cloned().collect())
            .unwrap_or_default()
    }
}
