//! Write-through, disk-persisted cache of ticker metadata.
//!
//! The whole mapping lives in memory behind one mutex and is rewritten to a
//! JSON file after every insert. Lookup, insert, and persist all happen under
//! the same lock, so concurrent misses on one symbol insert and write once.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::PipelineError;
use crate::metadata::{MetadataSource, NullSource, TickerMetadata};

/// Name and industry of the record returned for empty input.
pub const UNKNOWN: &str = "Unknown";
/// Industry given to symbols no source could describe.
pub const FALLBACK_INDUSTRY: &str = "General";

/// A cached ticker as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerRecord {
    pub symbol: String,
    pub name: String,
    pub industry: String,
}

impl TickerRecord {
    fn from_entry(symbol: &str, meta: &TickerMetadata) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: meta.name.clone(),
            industry: meta.industry.clone(),
        }
    }

    /// Sentinel for missing or empty symbols. Never stored.
    pub fn unknown() -> Self {
        Self {
            symbol: String::new(),
            name: UNKNOWN.to_string(),
            industry: UNKNOWN.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.symbol.is_empty()
    }
}

struct CacheState {
    entries: BTreeMap<String, TickerMetadata>,
    persists: u64,
}

/// Persistent symbol -> metadata store.
pub struct TickerMetadataCache {
    path: PathBuf,
    source: Box<dyn MetadataSource>,
    state: Mutex<CacheState>,
}

impl TickerMetadataCache {
    /// Creates an empty cache bound to `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>, source: Box<dyn MetadataSource>) -> Self {
        Self {
            path: path.into(),
            source,
            state: Mutex::new(CacheState {
                entries: BTreeMap::new(),
                persists: 0,
            }),
        }
    }

    /// Creates a cache and loads whatever is on disk.
    pub fn open(path: impl Into<PathBuf>, source: Box<dyn MetadataSource>) -> Self {
        let cache = Self::new(path, source);
        cache.load();
        cache
    }

    /// Cache with the fallback-only source.
    pub fn with_null_source(path: impl Into<PathBuf>) -> Self {
        Self::open(path, Box::new(NullSource))
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces the in-memory mapping with the on-disk one.
    ///
    /// A missing file is an empty cache. An unreadable or malformed file is
    /// logged and also yields an empty cache. Returns the entry count.
    pub fn load(&self) -> usize {
        let entries = match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Failed to load ticker cache {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        let count = entries.len();
        self.lock().entries = entries;
        tracing::info!(
            "Ticker cache loaded with {} entries from {} (source: {})",
            count,
            self.path.display(),
            self.source.label()
        );
        count
    }

    /// Returns the metadata for `ticker`, creating and persisting it on a miss.
    pub fn lookup(&self, ticker: &str) -> TickerRecord {
        let symbol = normalize_symbol(ticker);
        if symbol.is_empty() {
            return TickerRecord::unknown();
        }

        let mut state = self.lock();
        if let Some(meta) = state.entries.get(&symbol) {
            return TickerRecord::from_entry(&symbol, meta);
        }

        let meta = self.source.describe(&symbol).unwrap_or_else(|| TickerMetadata {
            name: symbol.clone(),
            industry: FALLBACK_INDUSTRY.to_string(),
        });
        let record = TickerRecord::from_entry(&symbol, &meta);
        state.entries.insert(symbol, meta);

        state.persists += 1;
        if let Err(e) = write_entries(&self.path, &state.entries) {
            tracing::error!(
                "Failed to persist ticker cache {}: {}",
                self.path.display(),
                e
            );
        }
        record
    }

    /// Cached record for `ticker` without inserting on a miss.
    pub fn get(&self, ticker: &str) -> Option<TickerRecord> {
        let symbol = normalize_symbol(ticker);
        self.lock()
            .entries
            .get(&symbol)
            .map(|meta| TickerRecord::from_entry(&symbol, meta))
    }

    /// Writes the full mapping to disk, replacing the previous file.
    pub fn save(&self) -> Result<(), PipelineError> {
        let mut state = self.lock();
        state.persists += 1;
        write_entries(&self.path, &state.entries)?;
        tracing::info!(
            "Saved {} ticker cache entries to {}",
            state.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Copy of the current mapping.
    pub fn entries(&self) -> BTreeMap<String, TickerMetadata> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of full-file writes attempted since construction.
    pub fn persist_count(&self) -> u64 {
        self.lock().persists
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn normalize_symbol(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Reads a cache file. A missing file is an empty mapping.
pub fn read_entries(path: &Path) -> Result<BTreeMap<String, TickerMetadata>, PipelineError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    let raw: BTreeMap<String, TickerMetadata> = serde_json::from_str(&content)?;
    Ok(raw
        .into_iter()
        .map(|(symbol, meta)| (normalize_symbol(&symbol), meta))
        .filter(|(symbol, _)| !symbol.is_empty())
        .collect())
}

/// Writes the mapping to a sibling temp file and renames it over `path`.
pub fn write_entries(
    path: &Path,
    entries: &BTreeMap<String, TickerMetadata>,
) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(entries)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
