use chrono::{NaiveDate, NaiveTime};
use core_types::{OptionType, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline metrics for one trading day.
///
/// This is the row of figures shown above the daily charts: session bounds,
/// central tendency of trade size and total contract volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Time of the first print of the session.
    pub first_trade: NaiveTime,
    /// Time of the last print of the session.
    pub last_trade: NaiveTime,
    /// Mean trade size in contracts, rounded to 2dp.
    pub mean_trade_size: Decimal,
    /// Median trade size in contracts (mean of the middle pair for even counts).
    pub median_trade_size: Decimal,
    /// Total contracts traded on the day.
    pub total_volume: u64,
    pub trade_count: usize,
}

/// One trade on the intraday timeline, with the running volume through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub time: NaiveTime,
    pub size: u64,
    /// Cumulative contract volume up to and including this trade.
    pub cumulative_volume: u64,
}

/// Reference levels drawn over the cumulative-volume chart: the mean and
/// median of per-day total volume across every date in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeGuides {
    pub daily_mean: Decimal,
    pub daily_median: Decimal,
}

/// One of the day's largest trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTrade {
    pub time: NaiveTime,
    pub underlying: String,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub side: TradeSide,
    pub size: u64,
    /// This trade's share of the day's total volume, in percent (4dp).
    pub pct_of_total: Decimal,
}

/// Total volume for one grouping key (an underlying symbol or an expiration
/// date), with its share of the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeBucket {
    pub key: String,
    pub total_volume: u64,
    /// Share of the filtered total, in percent (4dp).
    pub pct_of_total: Decimal,
}

/// Contract volume split into the four position buckets.
///
/// The four buckets partition the filtered rows, so their sum always equals
/// the filtered total volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionBreakdown {
    pub bought_calls: u64,
    pub sold_calls: u64,
    pub bought_puts: u64,
    pub sold_puts: u64,
}

impl PositionBreakdown {
    pub fn total(&self) -> u64 {
        self.bought_calls + self.sold_calls + self.bought_puts + self.sold_puts
    }
}

/// The position breakdown of a single underlying product, used for the
/// per-product stacked bars of one expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPosition {
    pub product: String,
    pub breakdown: PositionBreakdown,
}
