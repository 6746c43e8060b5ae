//! Analysis Storage
//!
//! Persists completed analyses behind the [`AnalysisStore`] trait so the HTTP
//! layer and the CLI do not care where results live.
//!
//! - [`InMemoryStore`]: process-local, lost on restart
//! - [`JsonFileStore`]: one `<id>.json` document per analysis under a directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, SecondsFormat, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{AnalysisResult, CrispWeights, FuzzyWeights, ScoredRecord, Thresholds};

/// Analysis metadata without the scored items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisHeader {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub thresholds: Thresholds,
    pub total_items: usize,
    pub crisp_weights: CrispWeights,
    pub fuzzy_weights: FuzzyWeights,
}

/// A saved analysis: header plus every scored item in crisp rank order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    #[serde(flatten)]
    pub header: AnalysisHeader,
    pub items: Vec<ScoredRecord>,
}

impl StoredAnalysis {
    /// Stamp a fresh id, timestamp and name onto a pipeline result
    pub fn new(thresholds: Thresholds, result: &AnalysisResult) -> Self {
        let created_at = Utc::now();
        Self {
            header: AnalysisHeader {
                id: new_analysis_id(),
                name: format!(
                    "Analysis {}",
                    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
                ),
                created_at,
                thresholds,
                total_items: result.len(),
                crisp_weights: result.crisp_weights,
                fuzzy_weights: result.fuzzy_weights,
            },
            items: result.scored.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.header.id
    }
}

/// Storage backend for analyses
pub trait AnalysisStore: Send + Sync {
    fn save(&self, thresholds: Thresholds, result: &AnalysisResult) -> Result<StoredAnalysis, StoreError>;
    fn get(&self, id: &str) -> Result<StoredAnalysis, StoreError>;
    /// Headers of all saved analyses, newest first
    fn list(&self) -> Result<Vec<AnalysisHeader>, StoreError>;
}

// ============================================================================
// Identifiers
// ============================================================================

/// Random v4 UUID, hyphenated lowercase
pub fn new_analysis_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `id` parses as a UUID
pub fn is_valid_id(id: &str) -> bool {
    Uuid::try_parse(id).is_ok()
}

/// Canonical storage key for a caller-supplied id
fn check_id(id: &str) -> Result<String, StoreError> {
    Uuid::try_parse(id)
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn newest_first(headers: &mut [AnalysisHeader]) {
    headers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryStore {
    analyses: RwLock<FxHashMap<String, StoredAnalysis>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisStore for InMemoryStore {
    fn save(&self, thresholds: Thresholds, result: &AnalysisResult) -> Result<StoredAnalysis, StoreError> {
        let analysis = StoredAnalysis::new(thresholds, result);
        self.analyses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(analysis.header.id.clone(), analysis.clone());
        Ok(analysis)
    }

    fn get(&self, id: &str) -> Result<StoredAnalysis, StoreError> {
        let key = check_id(id)?;
        self.analyses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<AnalysisHeader>, StoreError> {
        let mut headers: Vec<AnalysisHeader> = self
            .analyses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|a| a.header.clone())
            .collect();
        newest_first(&mut headers);
        Ok(headers)
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Durable store: `<dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read(path: &Path) -> Result<StoredAnalysis, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl AnalysisStore for JsonFileStore {
    fn save(&self, thresholds: Thresholds, result: &AnalysisResult) -> Result<StoredAnalysis, StoreError> {
        let analysis = StoredAnalysis::new(thresholds, result);
        let path = self.path_for(analysis.id());
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(&analysis)?;
        fs::write(&tmp, bytes).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path: path.clone(), source })?;

        tracing::debug!("Saved analysis {} to {}", analysis.id(), path.display());
        Ok(analysis)
    }

    fn get(&self, id: &str) -> Result<StoredAnalysis, StoreError> {
        let key = check_id(id)?;
        let path = self.path_for(&key);
        match Self::read(&path) {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    fn list(&self) -> Result<Vec<AnalysisHeader>, StoreError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let mut headers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
            let path = entry.path();
            let is_analysis = path.extension().is_some_and(|ext| ext == "json")
                && path.file_stem().and_then(|s| s.to_str()).is_some_and(is_valid_id);
            if !is_analysis {
                continue;
            }
            match Self::read(&path) {
                Ok(analysis) => headers.push(analysis.header),
                Err(e) => tracing::warn!("Skipping unreadable analysis {}: {}", path.display(), e),
            }
        }

        newest_first(&mut headers);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_random_uuids() {
        for _ in 0..200 {
            let id = new_analysis_id();
            let uuid = Uuid::parse_str(&id).unwrap();
            assert_eq!(uuid.get_version(), Some(uuid::Version::Random), "{}", id);
            assert_eq!(uuid.get_variant(), uuid::Variant::RFC4122, "{}", id);
            assert_eq!(id, uuid.hyphenated().to_string());
        }
        assert_ne!(new_analysis_id(), new_analysis_id());
    }

    #[test]
    fn test_id_validation() {
        assert!(is_valid_id("0123abcd-4567-89ef-0123-456789abcdef"));
        assert!(!is_valid_id("../../etc/passwd"));
        assert!(!is_valid_id("0123abcd-4567-89ef-0123-456789abcdeg"));
        assert!(!is_valid_id(""));
    }

    #[test]
    fn test_lookup_uses_canonical_form() {
        let store = InMemoryStore::new();
        let saved = store.save(Thresholds::default(), &AnalysisResult::empty()).unwrap();
        let upper = saved.id().to_uppercase();
        assert_eq!(store.get(&upper).unwrap(), saved);
    }

    #[test]
    fn test_new_analysis_header() {
        let analysis = StoredAnalysis::new(Thresholds::default(), &AnalysisResult::empty());
        assert!(analysis.header.name.starts_with("Analysis "));
        assert_eq!(analysis.header.total_items, 0);
        assert!(analysis.items.is_empty());
    }

    #[test]
    fn test_in_memory_invalid_and_missing_ids() {
        let store = InMemoryStore::new();
        assert!(matches!(store.get("nope"), Err(StoreError::InvalidId(_))));
        assert!(matches!(
            store.get(&new_analysis_id()),
            Err(StoreError::NotFound(_))
        ));
    }
}
