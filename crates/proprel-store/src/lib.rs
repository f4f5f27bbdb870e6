//! Proprel Relationship Store
//!
//! Holds the compatibility rule corpus and answers rule lookups per
//! `(materialType, property, value)`.
//!
//! # Architecture
//!
//! - Corpus files (JSON or TOML) are parsed into domain [`Relationship`]s
//! - Rules are grouped by material type into immutable [`RelationshipIndex`]es
//! - The full set of indexes is published as a versioned [`CorpusSnapshot`]
//!   behind a single swap point in [`RelationshipStore`]
//!
//! # Examples
//!
//! ```no_run
//! use proprel_store::RelationshipStore;
//!
//! let store = RelationshipStore::from_path("corpus/").unwrap();
//! let index = store.load("tile").unwrap();
//! ```
//!
//! [`Relationship`]: proprel_domain::Relationship

#![warn(missing_docs)]

mod corpus;
mod error;
mod index;
mod store;

pub use corpus::{Corpus, CorpusFormat};
pub use error::StoreError;
pub use index::RelationshipIndex;
pub use store::{CorpusSnapshot, CorpusStats, MaterialStats, RelationshipStore};
