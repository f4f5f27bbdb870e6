//! Property values and assignments

use std::collections::BTreeMap;
use std::fmt;

/// A single property value as selected in the admin UI.
///
/// Values arrive as strings, numbers, or booleans. They are kept as a closed
/// variant so the evaluator can match exhaustively. Two values are considered
/// the same rule endpoint when their [canonical keys](Self::canonical) match,
/// so `Text("10")` and `Number(10.0)` address the same rules.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Free-form or enumerated text (e.g. `glossy`)
    Text(String),

    /// Numeric value (e.g. a thickness in millimetres)
    Number(f64),

    /// Boolean flag (e.g. `waterproof = true`)
    Flag(bool),
}

impl PropertyValue {
    /// Canonical string form used for indexing and lexical ordering
    ///
    /// # Examples
    ///
    /// ```
    /// use proprel_domain::PropertyValue;
    ///
    /// assert_eq!(PropertyValue::Number(1.0).canonical(), "1");
    /// assert_eq!(PropertyValue::Number(0.25).canonical(), "0.25");
    /// assert_eq!(PropertyValue::Flag(true).canonical(), "true");
    /// assert_eq!(PropertyValue::from("matte").canonical(), "matte");
    /// ```
    pub fn canonical(&self) -> String {
        match self {
            PropertyValue::Text(text) => text.clone(),
            // -0.0 and 0.0 must share a key
            PropertyValue::Number(n) if *n == 0.0 => "0".to_string(),
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Flag(flag) => flag.to_string(),
        }
    }

    /// Whether two values address the same rule endpoint
    pub fn matches(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (PropertyValue::Text(a), PropertyValue::Text(b)) => a == b,
            (PropertyValue::Flag(a), PropertyValue::Flag(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }

    /// Blank text counts as "not assigned"
    pub fn is_blank(&self) -> bool {
        matches!(self, PropertyValue::Text(text) if text.trim().is_empty())
    }

    /// Non-finite numbers cannot take part in rule matching
    pub fn is_well_formed(&self) -> bool {
        match self {
            PropertyValue::Number(n) => n.is_finite(),
            PropertyValue::Text(_) | PropertyValue::Flag(_) => true,
        }
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Number(_) => "number",
            PropertyValue::Flag(_) => "flag",
        }
    }

    /// Parse a loosely typed token (command line, query strings).
    ///
    /// Tries boolean, then finite number, and falls back to text.
    pub fn parse_loose(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return PropertyValue::Flag(true),
            "false" => return PropertyValue::Flag(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => PropertyValue::Number(n),
            _ => PropertyValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Flag(value)
    }
}

/// The property values currently selected for one material.
///
/// Keys are unique and kept sorted by property name, so iteration order (and
/// therefore evaluation output) does not depend on the order in which the
/// caller supplied the properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyAssignment {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyAssignment {
    /// Create an empty assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value, returning the previous one.
    ///
    /// Assigning a blank text value clears the property.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let property = property.into();
        let value = value.into();
        if value.is_blank() {
            return self.values.remove(&property);
        }
        self.values.insert(property, value)
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, property: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Get the value assigned to a property
    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.values.get(property)
    }

    /// Check whether a property is assigned
    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Number of assigned properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is assigned
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate assigned `(property, value)` entries in property-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate every entry except `property` (the recommendation context)
    pub fn context_for<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PropertyValue)> + 'a {
        self.iter().filter(move |(name, _)| *name != property)
    }

    /// Iterate every unordered pair of distinct assigned properties.
    ///
    /// Pairs are produced in property-name order, first member first.
    pub fn pairs(&self) -> impl Iterator<Item = ((&str, &PropertyValue), (&str, &PropertyValue))> {
        let entries: Vec<(&str, &PropertyValue)> = self.iter().collect();
        let mut pairs = Vec::with_capacity(entries.len() * entries.len().saturating_sub(1) / 2);
        for (i, first) in entries.iter().enumerate() {
            for second in &entries[i + 1..] {
                pairs.push((*first, *second));
            }
        }
        pairs.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyAssignment
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut assignment = PropertyAssignment::new();
        for (property, value) in iter {
            assignment.insert(property, value);
        }
        assignment
    }
}
