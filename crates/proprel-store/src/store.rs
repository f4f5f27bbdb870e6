//! Versioned, atomically swapped relationship store

use crate::{Corpus, RelationshipIndex, StoreError};
use proprel_domain::{PropertyValue, Relationship, RelationshipLookup};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{info, warn};

/// Summary of a published corpus snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    /// Snapshot version (starts at 1, bumped on every successful reload)
    pub version: u64,
    /// Total number of rules across all material types
    pub relationship_count: usize,
    /// Per material type: (rule count, distinct property count)
    pub materials: BTreeMap<String, MaterialStats>,
}

/// Per-material figures in [`CorpusStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialStats {
    /// Number of rules
    pub relationships: usize,
    /// Number of distinct property names
    pub properties: usize,
}

/// An immutable, fully built set of per-material indexes
///
/// Readers hold an `Arc` to the snapshot they started with; a reload never
/// touches it, and it is dropped once the last reader releases it.
#[derive(Debug)]
pub struct CorpusSnapshot {
    version: u64,
    indexes: HashMap<String, Arc<RelationshipIndex>>,
}

impl CorpusSnapshot {
    fn build(version: u64, corpus: Corpus) -> Result<Self, StoreError> {
        let mut grouped: HashMap<String, Vec<Relationship>> = HashMap::new();
        for rel in corpus.into_relationships() {
            grouped.entry(rel.material_type.clone()).or_default().push(rel);
        }

        let mut indexes = HashMap::with_capacity(grouped.len());
        for (material_type, relationships) in grouped {
            let index = RelationshipIndex::build(material_type.clone(), relationships)?;
            indexes.insert(material_type, Arc::new(index));
        }

        Ok(Self { version, indexes })
    }

    /// Snapshot version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Index for a material type
    ///
    /// # Errors
    /// Returns `NotFound` when the material type has no rules
    pub fn index(&self, material_type: &str) -> Result<Arc<RelationshipIndex>, StoreError> {
        self.indexes
            .get(material_type)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(material_type.to_string()))
    }

    /// Material types with at least one rule, sorted
    pub fn material_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.indexes.keys().cloned().collect();
        types.sort();
        types
    }

    /// Summary figures for this snapshot
    pub fn stats(&self) -> CorpusStats {
        let materials: BTreeMap<String, MaterialStats> = self
            .indexes
            .iter()
            .map(|(material, index)| {
                (
                    material.clone(),
                    MaterialStats {
                        relationships: index.len(),
                        properties: index.property_count(),
                    },
                )
            })
            .collect();

        CorpusStats {
            version: self.version,
            relationship_count: materials.values().map(|m| m.relationships).sum(),
            materials,
        }
    }
}

/// The shared, read-mostly rule store
///
/// Request handlers take a cheap snapshot handle and work on it without
/// holding any lock. [`reload`](Self::reload) builds the next snapshot off to
/// the side and publishes it with a single pointer swap, so readers never see
/// a partially built index. Reloads are serialized.
///
/// # Examples
///
/// ```
/// use proprel_domain::{CompatibilityType, Relationship};
/// use proprel_store::{Corpus, RelationshipStore};
///
/// let store = RelationshipStore::new();
/// assert!(!store.is_loaded());
///
/// let rule = Relationship::new(
///     "tile",
///     ("finish", "glossy"),
///     ("material", "fabric"),
///     CompatibilityType::Incompatible,
///     "fabric cannot be glossy-finished",
/// ).unwrap();
/// let stats = store.reload(Corpus::new(vec![rule])).unwrap();
/// assert_eq!(stats.version, 1);
/// assert_eq!(store.load("tile").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RelationshipStore {
    current: RwLock<Option<Arc<CorpusSnapshot>>>,
    reload_lock: Mutex<()>,
}

impl RelationshipStore {
    /// Create a store with no corpus published yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and publish `corpus` as version 1
    pub fn from_corpus(corpus: Corpus) -> Result<Self, StoreError> {
        let store = Self::new();
        store.reload(corpus)?;
        Ok(store)
    }

    /// Create a store from a corpus file or directory
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::from_corpus(Corpus::from_path(path)?)
    }

    /// Current snapshot handle
    ///
    /// # Errors
    /// Returns `CorpusUnavailable` if no corpus has been published
    pub fn snapshot(&self) -> Result<Arc<CorpusSnapshot>, StoreError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(StoreError::CorpusUnavailable)
    }

    /// Whether a corpus has been published
    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_ok()
    }

    /// Stats of the current snapshot, if any
    pub fn stats(&self) -> Option<CorpusStats> {
        self.snapshot().ok().map(|snapshot| snapshot.stats())
    }

    /// Index for a material type in the current snapshot
    ///
    /// # Errors
    /// `CorpusUnavailable` if nothing is loaded, `NotFound` for an unknown
    /// material type (callers treat the latter as "no constraints")
    pub fn load(&self, material_type: &str) -> Result<Arc<RelationshipIndex>, StoreError> {
        self.snapshot()?.index(material_type)
    }

    /// Rules where `(property, value)` is the source or the target
    pub fn lookup(
        &self,
        material_type: &str,
        property: &str,
        value: &PropertyValue,
    ) -> Result<Vec<Relationship>, StoreError> {
        let index = self.load(material_type)?;
        Ok(index.touching(property, value).into_iter().cloned().collect())
    }

    /// Build a new snapshot from `corpus` and publish it
    ///
    /// On error the previous snapshot (if any) keeps serving.
    pub fn reload(&self, corpus: Corpus) -> Result<CorpusStats, StoreError> {
        let _exclusive = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let next_version = self.snapshot().map(|s| s.version() + 1).unwrap_or(1);
        let snapshot = match CorpusSnapshot::build(next_version, corpus) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!("Corpus reload aborted, keeping previous snapshot: {}", e);
                return Err(e);
            }
        };
        let stats = snapshot.stats();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

        info!(
            "Published corpus version {} ({} relationships, {} material types)",
            stats.version,
            stats.relationship_count,
            stats.materials.len()
        );
        Ok(stats)
    }

    /// Read a corpus from disk and publish it
    pub fn reload_from_path<P: AsRef<Path>>(&self, path: P) -> Result<CorpusStats, StoreError> {
        let corpus = Corpus::from_path(path.as_ref()).inspect_err(|e| {
            warn!("Corpus reload from {} failed: {}", path.as_ref().display(), e);
        })?;
        self.reload(corpus)
    }
}
