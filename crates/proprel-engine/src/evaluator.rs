//! Pairwise compatibility evaluation

use proprel_domain::{Issue, PropertyAssignment, PropertyValue, Relationship, RelationshipLookup};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Finds NOT_RECOMMENDED and INCOMPATIBLE pairs in an assignment
///
/// Stateless: the outcome depends only on the rules behind the lookup and
/// the assignment passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityEvaluator;

impl CompatibilityEvaluator {
    /// Create an evaluator
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every issue in `assignment`
    ///
    /// Each unordered pair of assigned properties yields at most one issue.
    /// INCOMPATIBLE issues come before NOT_RECOMMENDED ones; within a severity
    /// the pair order of [`PropertyAssignment::pairs`] is kept.
    pub fn evaluate<L>(&self, lookup: &L, assignment: &PropertyAssignment) -> Vec<Issue>
    where
        L: RelationshipLookup + ?Sized,
    {
        let malformed = malformed_properties(assignment);
        for property in &malformed {
            warn!("Skipping malformed value for property '{}'", property);
        }
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for ((a_property, a_value), (b_property, b_value)) in assignment.pairs() {
            if malformed.contains(a_property) || malformed.contains(b_property) {
                continue;
            }

            let Some(rule) = resolve_pair(lookup, a_property, a_value, b_property, b_value) else {
                continue;
            };
            if !rule.compatibility.is_issue() {
                continue;
            }

            let issue = Issue::from_relationship(rule);
            if seen.insert(issue.pair_key()) {
                issues.push(issue);
            }
        }

        issues.sort_by_key(|issue| Reverse(issue.compatibility.severity()));

        debug!(
            "Evaluated {} properties for '{}': {} issue(s)",
            assignment.len(),
            lookup.material_type(),
            issues.len()
        );
        issues
    }
}

/// The rule that decides a pair: the most severe one, first in corpus order on ties
pub fn resolve_pair<'a, L>(
    lookup: &'a L,
    a_property: &str,
    a_value: &PropertyValue,
    b_property: &str,
    b_value: &PropertyValue,
) -> Option<&'a Relationship>
where
    L: RelationshipLookup + ?Sized,
{
    lookup
        .between(a_property, a_value, b_property, b_value)
        .into_iter()
        .fold(None, |best: Option<&Relationship>, rule| match best {
            Some(current) if current.compatibility.severity() >= rule.compatibility.severity() => {
                Some(current)
            }
            _ => Some(rule),
        })
}

/// Properties whose values cannot take part in matching
pub(crate) fn malformed_properties(assignment: &PropertyAssignment) -> HashSet<&str> {
    assignment
        .iter()
        .filter(|(_, value)| !value.is_well_formed())
        .map(|(property, _)| property)
        .collect()
}
