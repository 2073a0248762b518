//! Sources of descriptive ticker metadata consulted on a cache miss.
//!
//! `NullSource` never knows anything, so every miss falls back to the
//! symbol itself. `SeedSource` answers from a YAML file of known tickers,
//! loaded once at construction.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name and industry stored per ticker, and the on-disk value shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMetadata {
    pub name: String,
    pub industry: String,
}

/// Capability consulted by the ticker cache before synthesizing a fallback.
pub trait MetadataSource: Send + Sync {
    /// Metadata for an uppercase symbol, or `None` when the source has nothing.
    fn describe(&self, symbol: &str) -> Option<TickerMetadata>;

    /// Short label for logs.
    fn label(&self) -> &'static str;
}

/// Source with no upstream: every miss uses the fallback record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSource;

impl MetadataSource for NullSource {
    fn describe(&self, _symbol: &str) -> Option<TickerMetadata> {
        None
    }

    fn label(&self) -> &'static str {
        "null"
    }
}

/// Error types for seed file loading.
#[derive(Error, Debug)]
pub enum SeedSourceError {
    #[error("Failed to read ticker seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse ticker seed YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate symbol in ticker seed file: {0}")]
    DuplicateSymbol(String),
    #[error("Empty symbol in ticker seed file")]
    EmptySymbol,
}

/// Top-level structure for the ticker seed YAML file.
#[derive(Deserialize, Debug)]
struct SeedFile {
    tickers: Vec<SeedEntry>,
}

#[derive(Deserialize, Debug)]
struct SeedEntry {
    symbol: String,
    name: String,
    industry: String,
}

/// Source backed by a fixed table of known tickers.
#[derive(Debug, Default, Clone)]
pub struct SeedSource {
    entries: HashMap<String, TickerMetadata>,
}

impl SeedSource {
    /// Parse seed entries from YAML content. Symbols are uppercased.
    ///
    /// ```yaml
    /// tickers:
    ///   - symbol: AAPL
    ///     name: Apple Inc.
    ///     industry: Information Technology
    /// ```
    pub fn parse(yaml_content: &str) -> Result<Self, SeedSourceError> {
        let file: SeedFile = serde_yml::from_str(yaml_content)?;

        let mut entries = HashMap::new();
        for entry in file.tickers {
            let symbol = entry.symbol.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(SeedSourceError::EmptySymbol);
            }
            if entries.contains_key(&symbol) {
                return Err(SeedSourceError::DuplicateSymbol(symbol));
            }
            entries.insert(
                symbol,
                TickerMetadata {
                    name: entry.name,
                    industry: entry.industry,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, SeedSourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for SeedSource {
    fn describe(&self, symbol: &str) -> Option<TickerMetadata> {
        self.entries.get(symbol).cloned()
    }

    fn label(&self) -> &'static str {
        "seed"
    }
}

/// Picks the source for a configured seed path.
///
/// An unreadable or invalid seed file is logged and replaced by `NullSource`
/// so startup continues.
pub fn source_for(seed_path: Option<&Path>) -> Box<dyn MetadataSource> {
    let Some(path) = seed_path else {
        return Box::new(NullSource);
    };
    match SeedSource::load(path) {
        Ok(source) => {
            tracing::info!(
                "Loaded {} seed tickers from {}",
                source.len(),
                path.display()
            );
            Box::new(source)
        }
        Err(e) => {
            tracing::warn!(
                "Ignoring ticker seed file {}: {}; using fallback metadata only",
                path.display(),
                e
            );
            Box::new(NullSource)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_source_knows_nothing() {
        assert!(NullSource.describe("AAPL").is_none());
        assert_eq!(NullSource.label(), "null");
    }

    #[test]
    fn test_parse_seed_entries() {
        let yaml = r#"
tickers:
  - symbol: aapl
    name: Apple Inc.
    industry: Information Technology
  - symbol: JPM
    name: JPMorgan Chase & Co.
    industry: Financials
"#;
        let source = SeedSource::parse(yaml).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(
            source.describe("AAPL"),
            Some(TickerMetadata {
                name: "Apple Inc.".to_string(),
                industry: "Information Technology".to_string(),
            })
        );
        assert!(source.describe("aapl").is_none());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let yaml = r#"
tickers:
  - symbol: AAPL
    name: Apple
    industry: Tech
  - symbol: aapl
    name: Apple again
    industry: Tech
"#;
        let result = SeedSource::parse(yaml);
        assert!(matches!(result.unwrap_err(), SeedSourceError::DuplicateSymbol(s) if s == "AAPL"));
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let yaml = r#"
tickers:
  - symbol: "  "
    name: Nothing
    industry: None
"#;
        assert!(matches!(
            SeedSource::parse(yaml).unwrap_err(),
            SeedSourceError::EmptySymbol
        ));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let result = SeedSource::parse("tickers: [symbol: ");
        assert!(matches!(result.unwrap_err(), SeedSourceError::YamlParse(_)));
    }

    #[test]
    fn source_for_missing_file_falls_back_to_null() {
        let source = source_for(Some(Path::new("/nonexistent/seed.yaml")));
        assert_eq!(source.label(), "null");
    }

    #[test]
    fn source_for_none_is_null() {
        assert_eq!(source_for(None).label(), "null");
    }
}
