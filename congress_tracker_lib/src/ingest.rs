//! Bulk feed ingestion filtered to a recency window.
//!
//! The raw feed can be an order of magnitude larger than the retained window,
//! so the decoded array is consumed while filtering and never kept alongside
//! the filtered result.

use chrono::{Days, NaiveDate, Utc};
use congress_feed_api::types::TradeRecord;
use congress_feed_api::Client;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::PipelineError;

pub const DEFAULT_WINDOW_DAYS: u32 = 730;
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Fetches the bulk feed once and keeps the trades inside the window.
pub struct TradeFeedIngestor {
    client: Client,
    window_days: u32,
}

impl TradeFeedIngestor {
    pub fn new(client: Client, window_days: u32) -> Self {
        Self {
            client,
            window_days,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        let client = Client::with_url(&config.feed_url, config.api_token.clone())
            .with_timeout(config.timeout());
        Self::new(client, config.window_days)
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Fetches and filters against today's date. Never fails: any error is
    /// logged and yields an empty list.
    pub async fn fetch_and_filter(&self) -> Vec<TradeRecord> {
        self.fetch_and_filter_at(Utc::now().date_naive()).await
    }

    /// `fetch_and_filter` with an explicit notion of today.
    pub async fn fetch_and_filter_at(&self, today: NaiveDate) -> Vec<TradeRecord> {
        match self.try_fetch_and_filter(today).await {
            Ok(trades) => trades,
            Err(e) => {
                tracing::warn!("Trade feed ingestion failed: {}; continuing with no trades", e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_and_filter(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<TradeRecord>, PipelineError> {
        let raw = self.client.get_bulk_trades().await?;
        let fetched = raw.len();
        let trades = filter_recent(raw, self.window_days, today);
        tracing::info!(
            "Retained {} of {} feed records traded within {} days of {}",
            trades.len(),
            fetched,
            self.window_days,
            today
        );
        Ok(trades)
    }
}

/// First date still inside a window of `window_days` ending on `today`.
pub fn cutoff_date(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Interprets one feed element, yielding the record and its trade date.
pub fn parse_record(value: Value) -> Result<(TradeRecord, NaiveDate), PipelineError> {
    let record = TradeRecord::from_value(value)
        .ok_or_else(|| PipelineError::MalformedRecord("feed element is not an object".to_string()))?;
    let traded = record.traded_date().ok_or_else(|| {
        PipelineError::MalformedRecord(format!("unparsable Traded value {:?}", record.get("Traded")))
    })?;
    Ok((record, traded))
}

/// Keeps records traded on or after the cutoff, in feed order.
///
/// Consumes `raw`; malformed records are dropped.
pub fn filter_recent(raw: Vec<Value>, window_days: u32, today: NaiveDate) -> Vec<TradeRecord> {
    let cutoff = cutoff_date(today, window_days);
    let mut malformed = 0usize;

    let mut kept: Vec<TradeRecord> = raw
        .into_iter()
        .filter_map(|value| match parse_record(value) {
            Ok((record, traded)) => (traded >= cutoff).then_some(record),
            Err(_) => {
                malformed += 1;
                None
            }
        })
        .collect();
    // in-place collection can reuse the raw allocation
    kept.shrink_to_fit();

    if malformed > 0 {
        tracing::debug!("Dropped {} feed records with malformed trade dates", malformed);
    }
    kept
}
