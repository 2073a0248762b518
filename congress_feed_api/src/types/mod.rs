mod trade;
pub use self::trade::{TradeRecord, TRADED_DATE_FORMAT};

mod size;
pub use self::size::TradeSizeBucket;
