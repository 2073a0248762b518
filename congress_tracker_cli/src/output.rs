use congress_tracker_lib::store::{StoreSummary, TradeSample};
use congress_tracker_lib::TickerRecord;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

/// A legislator as shown by the `legislator` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct LegislatorView {
    pub bioguide: String,
    pub state: Option<String>,
    pub committees: Vec<String>,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    #[serde(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct TradeRow {
    #[tabled(rename = "Traded")]
    #[serde(rename = "Traded")]
    traded: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: String,
}

#[derive(Tabled, Serialize)]
struct TickerRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Industry")]
    #[serde(rename = "Industry")]
    industry: String,
}

#[derive(Tabled, Serialize)]
struct LegislatorRow {
    #[tabled(rename = "Bioguide ID")]
    #[serde(rename = "Bioguide ID")]
    bioguide: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Committees")]
    #[serde(rename = "Committees")]
    committees: String,
}

// -- Row builders --

fn build_summary_rows(summary: &StoreSummary) -> Vec<SummaryRow> {
    let row = |metric: &str, value: String| SummaryRow {
        metric: metric.to_string(),
        value,
    };
    let mut rows = vec![
        row("State", summary.state.to_string()),
        row("Legislators", summary.legislators.to_string()),
        row("Legislators with committees", summary.committee_members.to_string()),
        row(
            "Trades",
            format!("{} (last {} days)", summary.trades, summary.window_days),
        ),
        row("Cached tickers", summary.cached_tickers.to_string()),
    ];
    if !summary.sample_legislators.is_empty() {
        let sample = summary
            .sample_legislators
            .iter()
            .map(|(id, state)| format!("{}={}", id, state))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(row("Sample legislators", sample));
    }
    rows
}

fn build_trade_rows(trades: &[TradeSample]) -> Vec<TradeRow> {
    trades
        .iter()
        .map(|t| TradeRow {
            traded: t.traded.clone().unwrap_or_default(),
            name: t.name.clone().unwrap_or_default(),
            ticker: t.ticker.clone().unwrap_or_else(|| "-".to_string()),
            state: t.state.clone().unwrap_or_else(|| "-".to_string()),
            size: t.trade_size.clone(),
        })
        .collect()
}

fn build_ticker_rows(records: &[TickerRecord]) -> Vec<TickerRow> {
    records
        .iter()
        .map(|r| TickerRow {
            symbol: if r.is_unknown() {
                "-".to_string()
            } else {
                r.symbol.clone()
            },
            name: r.name.clone(),
            industry: r.industry.clone(),
        })
        .collect()
}

fn build_legislator_rows(legislators: &[LegislatorView]) -> Vec<LegislatorRow> {
    legislators
        .iter()
        .map(|l| LegislatorRow {
            bioguide: l.bioguide.clone(),
            state: l.state.clone().unwrap_or_else(|| "unknown".to_string()),
            committees: if l.committees.is_empty() {
                "-".to_string()
            } else {
                l.committees.join(", ")
            },
        })
        .collect()
}

// -- Table output --

pub fn print_summary_table(summary: &StoreSummary) {
    println!("{}", Table::new(build_summary_rows(summary)));
    if !summary.sample_trades.is_empty() {
        println!("{}", Table::new(build_trade_rows(&summary.sample_trades)));
    }
}

pub fn print_tickers_table(records: &[TickerRecord]) {
    println!("{}", Table::new(build_ticker_rows(records)));
}

pub fn print_legislators_table(legislators: &[LegislatorView]) {
    println!("{}", Table::new(build_legislator_rows(legislators)));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congress_tracker_lib::StoreState;

    fn summary() -> StoreSummary {
        StoreSummary {
            state: StoreState::Ready,
            legislators: 2,
            committee_members: 1,
            trades: 1,
            cached_tickers: 3,
            window_days: 730,
            sample_legislators: vec![
                ("A000001".to_string(), "GA".to_string()),
                ("B000002".to_string(), "CA".to_string()),
            ],
            sample_trades: vec![TradeSample {
                traded: Some("2024-06-01".to_string()),
                name: Some("Alice Example".to_string()),
                ticker: None,
                state: None,
                trade_size: "15K–50K".to_string(),
            }],
        }
    }

    #[test]
    fn test_summary_rows() {
        let rows = build_summary_rows(&summary());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, "ready");
        assert_eq!(rows[3].value, "1 (last 730 days)");
        assert_eq!(rows[5].value, "A000001=GA, B000002=CA");
    }

    #[test]
    fn test_summary_rows_without_legislators() {
        let mut s = summary();
        s.sample_legislators.clear();
        assert_eq!(build_summary_rows(&s).len(), 5);
    }

    #[test]
    fn test_trade_rows_fill_missing_fields() {
        let rows = build_trade_rows(&summary().sample_trades);
        assert_eq!(rows[0].ticker, "-");
        assert_eq!(rows[0].state, "-");
        assert_eq!(rows[0].size, "15K–50K");
    }

    #[test]
    fn test_ticker_rows_sentinel() {
        let rows = build_ticker_rows(&[
            TickerRecord::unknown(),
            TickerRecord {
                symbol: "AAPL".to_string(),
                name: "AAPL".to_string(),
                industry: "General".to_string(),
            },
        ]);
        assert_eq!(rows[0].symbol, "-");
        assert_eq!(rows[0].industry, "Unknown");
        assert_eq!(rows[1].symbol, "AAPL");
    }

    #[test]
    fn test_legislator_rows() {
        let rows = build_legislator_rows(&[
            LegislatorView {
                bioguide: "A000001".to_string(),
                state: Some("GA".to_string()),
                committees: vec!["SSAF".to_string(), "SSAF01".to_string()],
            },
            LegislatorView {
                bioguide: "Z999999".to_string(),
                state: None,
                committees: vec![],
            },
        ]);
        assert_eq!(rows[0].committees, "SSAF, SSAF01");
        assert_eq!(rows[1].state, "unknown");
        assert_eq!(rows[1].committees, "-");
    }

    #[test]
    fn test_table_headers_renamed() {
        let table = Table::new(build_ticker_rows(&[TickerRecord::unknown()])).to_string();
        assert!(table.contains("Symbol"));
        assert!(table.contains("Industry"));
    }

    #[test]
    fn test_row_json_uses_header_names() {
        let rows = build_legislator_rows(&[LegislatorView {
            bioguide: "A000001".to_string(),
            state: Some("GA".to_string()),
            committees: vec![],
        }]);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["Bioguide ID"], "A000001");
    }
}
