//! Command implementations.

pub mod check;
pub mod recommend;
pub mod validate;

pub use self::check::execute_check;
pub use self::recommend::execute_recommend;
pub use self::validate::execute_validate;

use crate::config::Config;
use crate::error::{CliError, Result};
use proprel_domain::{PropertyAssignment, PropertyValue};
use proprel_engine::ValidationOrchestrator;
use proprel_store::RelationshipStore;
use std::path::Path;
use std::sync::Arc;

/// Parse `property=value` arguments into an assignment.
///
/// Values are read as boolean, then number, then text. A later entry for the
/// same property replaces an earlier one.
pub fn parse_assignment(entries: &[String]) -> Result<PropertyAssignment> {
    let mut assignment = PropertyAssignment::new();
    for entry in entries {
        let (property, value) = entry.split_once('=').ok_or_else(|| {
            CliError::InvalidInput(format!("Expected property=value, got '{}'", entry))
        })?;
        let property = property.trim();
        if property.is_empty() {
            return Err(CliError::InvalidInput(format!(
                "Missing property name in '{}'",
                entry
            )));
        }
        assignment.insert(property, PropertyValue::parse_loose(value));
    }
    Ok(assignment)
}

/// Load `corpus` and build an orchestrator with the configured weights.
pub fn load_orchestrator(corpus: &Path, config: &Config) -> Result<ValidationOrchestrator> {
    let store = Arc::new(RelationshipStore::from_path(corpus)?);
    Ok(ValidationOrchestrator::new(store, config.engine.clone())?)
}
