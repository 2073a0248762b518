use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::TradeSizeBucket;

/// Date format of the `Traded` field.
pub const TRADED_DATE_FORMAT: &str = "%Y-%m-%d";

/// One disclosure from the bulk feed.
///
/// The feed's schema is owned upstream and drifts, so the record keeps every
/// field verbatim and exposes typed accessors for the handful the pipeline
/// reads. Serializes back to the exact object it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(Map<String, Value>);

impl TradeRecord {
    /// Wraps a decoded feed element. Anything other than a JSON object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Raw `Traded` value.
    pub fn traded(&self) -> Option<&str> {
        self.str_field("Traded")
    }

    /// `Traded` parsed as a calendar date, `None` when absent or malformed.
    pub fn traded_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.traded()?, TRADED_DATE_FORMAT).ok()
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("Name")
    }

    pub fn ticker(&self) -> Option<&str> {
        self.str_field("Ticker")
    }

    pub fn bioguide_id(&self) -> Option<&str> {
        self.str_field("BioGuideID")
    }

    pub fn transaction(&self) -> Option<&str> {
        self.str_field("Transaction")
    }

    /// `Trade_Size_USD`, which the feed sends either as a number or a numeric string.
    pub fn trade_size_usd(&self) -> Option<f64> {
        match self.0.get("Trade_Size_USD")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn trade_size(&self) -> TradeSizeBucket {
        TradeSizeBucket::from_amount(self.trade_size_usd())
    }
}
