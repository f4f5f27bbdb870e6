//! Proprel Engine
//!
//! Evaluates property assignments against the relationship corpus.
//!
//! The engine provides:
//! - Pairwise compatibility evaluation ([`CompatibilityEvaluator`])
//! - Ranked value recommendations ([`RecommendationEngine`])
//! - The validate/recommend request cycle over the shared store
//!   ([`ValidationOrchestrator`])
//!
//! The evaluator and the recommendation engine are pure functions of a
//! [`RelationshipLookup`](proprel_domain::RelationshipLookup) and an
//! assignment. The "only suggest what beats the current value" policy lives
//! in the orchestrator.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use proprel_domain::PropertyAssignment;
//! use proprel_engine::{EngineConfig, ValidationOrchestrator};
//! use proprel_store::RelationshipStore;
//!
//! let store = Arc::new(RelationshipStore::from_path("corpus/").unwrap());
//! let orchestrator = ValidationOrchestrator::new(store, EngineConfig::default()).unwrap();
//!
//! let assignment = PropertyAssignment::new().with("material", "ceramic");
//! let recommendations = orchestrator.recommend("tile", &assignment, "finish").unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod evaluator;
mod orchestrator;
mod recommender;

pub use config::EngineConfig;
pub use error::EngineError;
pub use evaluator::{resolve_pair, CompatibilityEvaluator};
pub use orchestrator::ValidationOrchestrator;
pub use recommender::{CandidateScore, RecommendationEngine};
