use crate::enums::{OptionType, TradeSide};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single executed options trade: one row of the input spreadsheet.
///
/// Records are immutable once loaded. Filtering and grouping elsewhere in the
/// system produce read-only views over slices of these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// The session date the trade printed on.
    pub trade_date: NaiveDate,
    /// The intraday time of the print.
    pub trade_time: NaiveTime,
    /// The ticker of the stock the option is written on.
    pub underlying: String,
    /// The date the option contract expires.
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub side: TradeSide,
    /// Trade size in contracts.
    pub size: u64,
}

impl TradeRecord {
    /// True when the record belongs to the given product and expiration pair.
    pub fn matches_position(&self, underlying: &str, expiration: NaiveDate) -> bool {
        self.underlying == underlying && self.expiration == expiration
    }
}
