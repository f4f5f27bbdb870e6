//! Proprel Domain Layer
//!
//! This crate contains the core value types of the property relationship
//! engine. It has ZERO external dependencies and defines the concepts, value
//! objects, and trait interfaces that the store, engine, and server depend upon.
//!
//! ## Key Concepts
//!
//! - **Property value**: a closed tagged variant (text, number, flag)
//! - **Assignment**: the property values currently selected for a material
//! - **Relationship**: a directed pairwise compatibility rule with a reason
//! - **Issue**: a NOT_RECOMMENDED or INCOMPATIBLE pair found in an assignment
//! - **Recommendation**: a ranked suggestion for one property's value
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Rule storage and evaluation live in other crates
//! - Lookup boundary expressed as a trait ([`traits::RelationshipLookup`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod outcome;
pub mod relationship;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use confidence::Confidence;
pub use outcome::{Issue, Recommendation, ValidationResult};
pub use relationship::{CompatibilityType, Relationship};
pub use traits::RelationshipLookup;
pub use value::{PropertyAssignment, PropertyValue};
