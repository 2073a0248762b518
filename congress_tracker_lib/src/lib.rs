//! Library layer for Congress Tracker: ticker metadata cache, legislator and
//! committee directories, recency-filtered trade ingestion, and the data
//! store that holds them for the lifetime of the process.
//!
//! Wraps the `congress_feed_api` crate, which only knows how to fetch the
//! bulk trading feed.

pub mod committees;
pub mod config;
pub mod error;
pub mod ingest;
pub mod legislators;
pub mod metadata;
pub mod store;
pub mod ticker_cache;

pub use congress_feed_api;
pub use congress_feed_api::types;

pub use committees::CommitteeDirectory;
pub use config::{ConfigError, PipelineConfig};
pub use error::PipelineError;
pub use ingest::TradeFeedIngestor;
pub use legislators::LegislatorDirectory;
pub use metadata::{MetadataSource, NullSource, SeedSource, TickerMetadata};
pub use store::{DataStore, StoreError, StoreState, StoreSummary};
pub use ticker_cache::{TickerMetadataCache, TickerRecord};
