//! Corpus files: parsing JSON/TOML rule files into domain relationships

use crate::StoreError;
use proprel_domain::{CompatibilityType, Confidence, PropertyValue, Relationship};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rule as written in a corpus file
///
/// Field names are camelCase to match the UI payloads; snake_case aliases are
/// accepted for hand-written TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipRecord {
    #[serde(alias = "material_type")]
    material_type: String,
    #[serde(alias = "source_property")]
    source_property: String,
    #[serde(alias = "source_value")]
    source_value: RecordValue,
    #[serde(alias = "target_property")]
    target_property: String,
    #[serde(alias = "target_value")]
    target_value: RecordValue,
    #[serde(alias = "compatibility_type")]
    compatibility_type: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RecordValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<RecordValue> for PropertyValue {
    fn from(value: RecordValue) -> Self {
        match value {
            RecordValue::Flag(flag) => PropertyValue::Flag(flag),
            RecordValue::Number(n) => PropertyValue::Number(n),
            RecordValue::Text(text) => PropertyValue::Text(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    relationships: Vec<RelationshipRecord>,
}

impl RelationshipRecord {
    fn into_relationship(self, origin: &str, position: usize) -> Result<Relationship, StoreError> {
        let invalid = |msg: String| StoreError::InvalidData(format!("{} rule #{}: {}", origin, position + 1, msg));

        let compatibility = CompatibilityType::parse(&self.compatibility_type)
            .ok_or_else(|| invalid(format!("unknown compatibility type '{}'", self.compatibility_type)))?;

        let confidence = self
            .confidence
            .map(Confidence::new)
            .transpose()
            .map_err(invalid)?;

        let relationship = Relationship {
            material_type: self.material_type,
            source_property: self.source_property,
            source_value: self.source_value.into(),
            target_property: self.target_property,
            target_value: self.target_value.into(),
            compatibility,
            reason: self.reason,
            confidence,
        };
        relationship.check().map_err(invalid)?;

        Ok(relationship)
    }
}

/// Supported corpus file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// `{ "relationships": [ ... ] }`
    Json,
    /// `[[relationships]]` tables
    Toml,
}

impl CorpusFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(CorpusFormat::Json),
            "toml" => Some(CorpusFormat::Toml),
            _ => None,
        }
    }
}

/// The full rule corpus, across all material types
///
/// A corpus is plain data; it becomes queryable once handed to
/// [`RelationshipStore::reload`](crate::RelationshipStore::reload).
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    relationships: Vec<Relationship>,
}

impl Corpus {
    /// Create a corpus from already-built relationships
    pub fn new(relationships: Vec<Relationship>) -> Self {
        Self { relationships }
    }

    /// Parse corpus text in the given format
    ///
    /// `origin` names the source in error messages.
    pub fn parse(text: &str, format: CorpusFormat, origin: &str) -> Result<Self, StoreError> {
        let file: CorpusFile = match format {
            CorpusFormat::Json => serde_json::from_str(text).map_err(|e| StoreError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?,
            CorpusFormat::Toml => toml::from_str(text).map_err(|e| StoreError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?,
        };

        let relationships = file
            .relationships
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_relationship(origin, position))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} relationships from {}", relationships.len(), origin);
        Ok(Self { relationships })
    }

    /// Load a corpus from a file, or from every `.json`/`.toml` file in a directory
    ///
    /// Directory entries are read in file-name order; other files are ignored.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let io_error = |source| StoreError::Io {
            path: path.display().to_string(),
            source,
        };

        let files: Vec<PathBuf> = if path.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(path).map_err(io_error)? {
                let entry_path = entry.map_err(io_error)?.path();
                if entry_path.is_file() && CorpusFormat::from_path(&entry_path).is_some() {
                    files.push(entry_path);
                }
            }
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut corpus = Corpus::default();
        for file in &files {
            let origin = file.display().to_string();
            let format = CorpusFormat::from_path(file).ok_or_else(|| StoreError::Parse {
                path: origin.clone(),
                message: "unsupported extension (expected .json or .toml)".to_string(),
            })?;
            let text = std::fs::read_to_string(file).map_err(|source| StoreError::Io {
                path: origin.clone(),
                source,
            })?;
            corpus.extend(Corpus::parse(&text, format, &origin)?);
        }

        info!(
            "Loaded {} relationships from {} corpus file(s) at {}",
            corpus.len(),
            files.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Append another corpus
    pub fn extend(&mut self, other: Corpus) {
        self.relationships.extend(other.relationships);
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// True when the corpus has no rules
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Iterate the relationships in corpus order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    pub(crate) fn into_relationships(self) -> Vec<Relationship> {
        self.relationships
    }
}

impl FromIterator<Relationship> for Corpus {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
