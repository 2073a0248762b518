//! Process-wide holder of the loaded collections.
//!
//! A `DataStore` is constructed once, initialized once, then shared with
//! request handlers (typically behind an `Arc`). After `Ready` only the ticker
//! cache mutates.

use std::sync::{RwLock, RwLockReadGuard};
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use congress_feed_api::types::TradeRecord;
use serde::Serialize;
use thiserror::Error;

use crate::committees::CommitteeDirectory;
use crate::config::PipelineConfig;
use crate::ingest::TradeFeedIngestor;
use crate::legislators::LegislatorDirectory;
use crate::metadata::{self, MetadataSource};
use crate::ticker_cache::{TickerMetadataCache, TickerRecord};

/// Number of trades and legislators included in a summary.
const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreState {
    Uninitialized,
    Initializing,
    Ready,
    ShuttingDown,
    Stopped,
}

impl std::fmt::Display for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Ready => write!(f, "ready"),
            Self::ShuttingDown => write!(f, "shutting_down"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Errors from data store lifecycle and access.
#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Data store is not ready (state: {0})")]
    NotReady(StoreState),
    #[error("Data store cannot be initialized from state {0}")]
    AlreadyInitialized(StoreState),
}

/// One trade in the status read-out.
#[derive(Debug, Clone, Serialize)]
pub struct TradeSample {
    pub traded: Option<String>,
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub state: Option<String>,
    pub trade_size: String,
}

/// Counts and small samples of what the pipeline loaded.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    pub state: StoreState,
    pub legislators: usize,
    pub committee_members: usize,
    pub trades: usize,
    pub cached_tickers: usize,
    pub window_days: u32,
    pub sample_legislators: Vec<(String, String)>,
    pub sample_trades: Vec<TradeSample>,
}

pub struct DataStore {
    state: RwLock<StoreState>,
    tickers: TickerMetadataCache,
    ingestor: TradeFeedIngestor,
    config: PipelineConfig,
    legislators: LegislatorDirectory,
    committees: CommitteeDirectory,
    trades: Vec<TradeRecord>,
}

impl DataStore {
    /// Store with the metadata source named by the config.
    pub fn new(config: PipelineConfig) -> Self {
        let source = metadata::source_for(config.ticker_seed_path.as_deref());
        Self::with_source(config, source)
    }

    pub fn with_source(config: PipelineConfig, source: Box<dyn MetadataSource>) -> Self {
        Self {
            state: RwLock::new(StoreState::Uninitialized),
            tickers: TickerMetadataCache::new(config.cache_path.clone(), source),
            ingestor: TradeFeedIngestor::from_config(&config),
            config,
            legislators: LegislatorDirectory::default(),
            committees: CommitteeDirectory::default(),
            trades: Vec::new(),
        }
    }

    pub fn state(&self) -> StoreState {
        *self.read_state()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, next: StoreState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = next;
        tracing::debug!("Data store is now {}", next);
    }

    /// Runs every startup step against today's date.
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        self.initialize_at(Utc::now().date_naive()).await
    }

    /// Runs the startup steps in order: ticker cache, legislators,
    /// committees, trade feed. Each step degrades to an empty collection on
    /// failure, so the store always reaches `Ready`.
    pub async fn initialize_at(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        let current = self.state();
        if current != StoreState::Uninitialized {
            return Err(StoreError::AlreadyInitialized(current));
        }
        self.set_state(StoreState::Initializing);
        let started = Instant::now();

        let step = Instant::now();
        let cached = self.tickers.load();
        tracing::info!("Step 1/4: {} cached tickers ({:?})", cached, step.elapsed());

        let step = Instant::now();
        self.legislators = LegislatorDirectory::build_with_budget(
            &self.config.legislator_paths,
            self.config.max_legislators,
        );
        tracing::info!(
            "Step 2/4: {} legislators ({:?})",
            self.legislators.len(),
            step.elapsed()
        );

        let step = Instant::now();
        self.committees = CommitteeDirectory::build(&self.config.committee_path);
        tracing::info!(
            "Step 3/4: {} legislators with committees ({:?})",
            self.committees.len(),
            step.elapsed()
        );

        let step = Instant::now();
        self.trades = self.ingestor.fetch_and_filter_at(today).await;
        tracing::info!(
            "Step 4/4: {} trades within {} days ({:?})",
            self.trades.len(),
            self.ingestor.window_days(),
            step.elapsed()
        );

        self.set_state(StoreState::Ready);
        tracing::info!("Data store ready in {:?}", started.elapsed());
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        match self.state() {
            StoreState::Ready => Ok(()),
            other => Err(StoreError::NotReady(other)),
        }
    }

    pub fn legislators(&self) -> Result<&LegislatorDirectory, StoreError> {
        self.ensure_ready()?;
        Ok(&self.legislators)
    }

    pub fn committees(&self) -> Result<&CommitteeDirectory, StoreError> {
        self.ensure_ready()?;
        Ok(&self.committees)
    }

    pub fn trades(&self) -> Result<&[TradeRecord], StoreError> {
        self.ensure_ready()?;
        Ok(&self.trades)
    }

    pub fn state_of(&self, bioguide: &str) -> Result<Option<&str>, StoreError> {
        Ok(self.legislators()?.state_of(bioguide))
    }

    pub fn committees_of(&self, bioguide: &str) -> Result<&[String], StoreError> {
        Ok(self.committees()?.committees_of(bioguide))
    }

    /// State of the legislator who made `trade`, by its bioguide id.
    pub fn state_for_trade(&self, trade: &TradeRecord) -> Result<Option<&str>, StoreError> {
        let legislators = self.legislators()?;
        Ok(trade.bioguide_id().and_then(|id| legislators.state_of(id)))
    }

    /// Ticker metadata, inserting and persisting on a miss.
    pub fn lookup_ticker(&self, ticker: &str) -> Result<TickerRecord, StoreError> {
        self.ensure_ready()?;
        Ok(self.tickers.lookup(ticker))
    }

    /// Ticker metadata for a trade; a trade without a ticker gets the sentinel.
    pub fn ticker_for_trade(&self, trade: &TradeRecord) -> Result<TickerRecord, StoreError> {
        self.ensure_ready()?;
        Ok(match trade.ticker() {
            Some(ticker) => self.tickers.lookup(ticker),
            None => TickerRecord::unknown(),
        })
    }

    pub fn ticker_cache(&self) -> Result<&TickerMetadataCache, StoreError> {
        self.ensure_ready()?;
        Ok(&self.tickers)
    }

    /// Counts and samples for smoke-testing. Does not touch the ticker cache.
    pub fn summary(&self) -> Result<StoreSummary, StoreError> {
        self.ensure_ready()?;
        let sample_trades = self
            .trades
            .iter()
            .take(SAMPLE_SIZE)
            .map(|trade| TradeSample {
                traded: trade.traded().map(str::to_string),
                name: trade.name().map(str::to_string),
                ticker: trade.ticker().map(str::to_string),
                state: trade
                    .bioguide_id()
                    .and_then(|id| self.legislators.state_of(id))
                    .map(str::to_string),
                trade_size: trade.trade_size().to_string(),
            })
            .collect();
        let sample_legislators = self
            .legislators
            .sample(SAMPLE_SIZE)
            .into_iter()
            .map(|(id, state)| (id.to_string(), state.to_string()))
            .collect();

        Ok(StoreSummary {
            state: self.state(),
            legislators: self.legislators.len(),
            committee_members: self.committees.len(),
            trades: self.trades.len(),
            cached_tickers: self.tickers.len(),
            window_days: self.ingestor.window_days(),
            sample_legislators,
            sample_trades,
        })
    }

    /// Saves the ticker cache and refuses further access.
    ///
    /// A failed save is logged; the store still stops.
    pub fn shutdown(&self) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if *state != StoreState::Ready {
                return Err(StoreError::NotReady(*state));
            }
            *state = StoreState::ShuttingDown;
        }
        tracing::info!("Data store shutting down");

        if let Err(e) = self.tickers.save() {
            tracing::error!("Failed to save ticker cache on shutdown: {}", e);
        }

        self.set_state(StoreState::Stopped);
        Ok(())
    }
}
