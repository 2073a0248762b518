use congress_tracker_lib::metadata::SeedSource;
use congress_tracker_lib::{TickerMetadataCache, TickerRecord};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn read_cache_file(path: &Path) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read cache {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("cache file is valid JSON")
}

fn assert_conforms(data: &Value) {
    let schema = load_schema("ticker_cache.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("ticker cache schema compiles");
    if let Err(e) = validator.validate(data) {
        panic!("cache file failed validation: {e}");
    }
}

fn assert_rejected(data: &Value, reason: &str) {
    let schema = load_schema("ticker_cache.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(data).is_err(), "schema should reject {reason}");
}

// ---------------------------------------------------------------------------
// Positive validation: files written by the cache conform
// ---------------------------------------------------------------------------

#[test]
fn test_written_cache_conforms_to_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ticker_cache.json");

    let cache = TickerMetadataCache::with_null_source(&path);
    for ticker in ["aapl", "Msft", "brk.b", "  nvda "] {
        cache.lookup(ticker);
    }
    // the sentinel is never written
    assert_eq!(cache.lookup(""), TickerRecord::unknown());
    cache.save().unwrap();

    let data = read_cache_file(&path);
    assert_eq!(data.as_object().unwrap().len(), 4);
    assert_conforms(&data);
}

#[test]
fn test_seeded_cache_conforms_to_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ticker_cache.json");
    let seed = SeedSource::parse(
        "tickers:\n  - symbol: aapl\n    name: Apple Inc.\n    industry: Information Technology\n",
    )
    .unwrap();

    let cache = TickerMetadataCache::open(&path, Box::new(seed));
    cache.lookup("AAPL");
    cache.lookup("XOM");

    let data = read_cache_file(&path);
    assert_eq!(data["AAPL"]["name"], "Apple Inc.");
    assert_eq!(data["XOM"]["industry"], "General");
    assert_conforms(&data);
}

#[test]
fn test_empty_cache_conforms_to_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ticker_cache.json");
    TickerMetadataCache::with_null_source(&path).save().unwrap();

    let data = read_cache_file(&path);
    assert_eq!(data, json!({}));
    assert_conforms(&data);
}

// ---------------------------------------------------------------------------
// Negative validation: schema rejects malformed caches
// ---------------------------------------------------------------------------

#[test]
fn test_schema_rejects_lowercase_symbol() {
    assert_rejected(
        &json!({"aapl": {"name": "Apple", "industry": "General"}}),
        "lowercase ticker keys",
    );
}

#[test]
fn test_schema_rejects_missing_industry() {
    assert_rejected(&json!({"AAPL": {"name": "Apple"}}), "entry missing industry");
}

#[test]
fn test_schema_rejects_additional_properties() {
    assert_rejected(
        &json!({"AAPL": {"name": "Apple", "industry": "General", "price": 1.0}}),
        "additional entry properties",
    );
}

#[test]
fn test_schema_rejects_array_root() {
    assert_rejected(&json!([{"name": "Apple", "industry": "General"}]), "array root");
}
