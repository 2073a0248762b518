//! Client and record types for the bulk congressional trading disclosure feed.

mod client;
mod errors;
pub mod types;
pub use self::client::{Client, BULK_CONGRESS_TRADING_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
