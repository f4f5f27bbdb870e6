//! JSON wire format for the validate/recommend contracts
//!
//! Field names are camelCase. Property values travel as plain JSON strings,
//! numbers, or booleans; anything else is dropped on the way in.

use proprel_domain::{
    Issue, PropertyAssignment, PropertyValue, Recommendation, ValidationResult,
};
use proprel_store::CorpusStats;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Body of `POST /validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Material type whose rules apply
    pub material_type: String,
    /// Currently selected values
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Material type whose rules apply
    pub material_type: String,
    /// Currently selected values
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Property to rank values for
    pub target_property: String,
}

/// Response envelope shared by every route that can fail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call completed
    pub success: bool,
    /// Payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Human-readable fault on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Failed envelope
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// An issue as sent to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDto {
    /// Source property of the violated rule
    pub source_property: String,
    /// Source value of the violated rule
    pub source_value: Value,
    /// Target property of the violated rule
    pub target_property: String,
    /// Target value of the violated rule
    pub target_value: Value,
    /// `INCOMPATIBLE` or `NOT_RECOMMENDED`
    pub compatibility_type: String,
    /// Why the rule or suggestion applies
    pub reason: String,
}

/// A recommendation as sent to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    /// Property the suggestion is for
    pub property: String,
    /// Suggested value
    pub recommended_value: Value,
    /// Support clamped to [0, 1]
    ///
    /// Several entries can share 1.0; their order comes from `score`.
    pub confidence: f64,
    /// Raw support; lists are ranked by this, descending, then by value
    pub score: f64,
    /// Why the rule or suggestion applies
    pub reason: String,
}

/// `result` of `POST /validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResultDto {
    /// Detected issues, INCOMPATIBLE first
    pub issues: Vec<IssueDto>,
    /// Improvements over the current selection
    pub recommendations: Vec<RecommendationDto>,
}

/// `result` of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResultDto {
    /// Ranked values, best first
    pub recommendations: Vec<RecommendationDto>,
}

/// Corpus summary returned by `GET /corpus` and `POST /corpus/reload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStatsDto {
    /// Snapshot version
    pub version: u64,
    /// Rules across all material types
    pub relationship_count: usize,
    /// Figures per material type
    pub materials: BTreeMap<String, MaterialStatsDto>,
}

/// Per-material figures in [`CorpusStatsDto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialStatsDto {
    /// Number of rules
    pub relationships: usize,
    /// Number of distinct properties
    pub properties: usize,
}

/// Convert one JSON value; `None` for null, arrays and objects
pub fn property_value(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::String(text) => Some(PropertyValue::Text(text.clone())),
        Value::Number(number) => number.as_f64().map(PropertyValue::Number),
        Value::Bool(flag) => Some(PropertyValue::Flag(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render a value the way the caller sent it: whole numbers without a fraction
pub fn json_value(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Text(text) => Value::String(text.clone()),
        PropertyValue::Flag(flag) => Value::Bool(*flag),
        PropertyValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
            Value::Number(Number::from(*n as i64))
        }
        PropertyValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
    }
}

/// Build an assignment from the request's `properties` map
///
/// Entries of unsupported JSON type are skipped with a warning; the rest of
/// the request proceeds.
pub fn assignment_from_json(properties: &Map<String, Value>) -> PropertyAssignment {
    let mut assignment = PropertyAssignment::new();
    for (property, raw) in properties {
        match property_value(raw) {
            Some(value) => {
                assignment.insert(property.clone(), value);
            }
            None => warn!(
                "Skipping property '{}': unsupported value {}",
                property,
                kind_of(raw)
            ),
        }
    }
    assignment
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
    }
}

impl From<&Issue> for IssueDto {
    fn from(issue: &Issue) -> Self {
        Self {
            source_property: issue.source_property.clone(),
            source_value: json_value(&issue.source_value),
            target_property: issue.target_property.clone(),
            target_value: json_value(&issue.target_value),
            compatibility_type: issue.compatibility.as_str().to_string(),
            reason: issue.reason.clone(),
        }
    }
}

impl From<&Recommendation> for RecommendationDto {
    fn from(rec: &Recommendation) -> Self {
        Self {
            property: rec.property.clone(),
            recommended_value: json_value(&rec.recommended_value),
            confidence: rec.confidence.value(),
            score: rec.score,
            reason: rec.reason.clone(),
        }
    }
}

impl From<&ValidationResult> for ValidationResultDto {
    fn from(result: &ValidationResult) -> Self {
        Self {
            issues: result.issues.iter().map(IssueDto::from).collect(),
            recommendations: result.recommendations.iter().map(RecommendationDto::from).collect(),
        }
    }
}

impl From<&[Recommendation]> for RecommendResultDto {
    fn from(recommendations: &[Recommendation]) -> Self {
        Self {
            recommendations: recommendations.iter().map(RecommendationDto::from).collect(),
        }
    }
}

impl From<&CorpusStats> for CorpusStatsDto {
    fn from(stats: &CorpusStats) -> Self {
        Self {
            version: stats.version,
            relationship_count: stats.relationship_count,
            materials: stats
                .materials
                .iter()
                .map(|(material, figures)| {
                    (
                        material.clone(),
                        MaterialStatsDto {
                            relationships: figures.relationships,
                            properties: figures.properties,
                        },
                    )
                })
                .collect(),
        }
    }
}
