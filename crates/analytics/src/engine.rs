use crate::error::AnalyticsError;
use crate::report::{
    DailySummary, PositionBreakdown, ProductPosition, TimelinePoint, TopTrade, VolumeBucket,
    VolumeGuides,
};
use chrono::NaiveDate;
use core_types::{OptionType, TradeRecord, TradeSide};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// A stateless calculator that derives the dashboard views from trade records.
///
/// Day views expect the rows pre-sorted by trade time, as handed out by the
/// store's `day` view.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the headline metrics for one day of trades.
    pub fn daily_summary(
        &self,
        date: NaiveDate,
        day: &[&TradeRecord],
    ) -> Result<DailySummary, AnalyticsError> {
        if day.is_empty() {
            return Err(AnalyticsError::NotEnoughData(format!(
                "no trades for {date}"
            )));
        }

        let sizes: Vec<u64> = day.iter().map(|r| r.size).collect();
        let total_volume: u64 = sizes.iter().sum();
        let mean = (Decimal::from(total_volume) / Decimal::from(sizes.len())).round_dp(2);

        // The day view is already time-sorted, so the session bounds are the ends.
        let first_trade = day.first().map(|r| r.trade_time).unwrap_or_default();
        let last_trade = day.last().map(|r| r.trade_time).unwrap_or_default();

        Ok(DailySummary {
            date,
            first_trade,
            last_trade,
            mean_trade_size: mean,
            median_trade_size: median(sizes),
            total_volume,
            trade_count: day.len(),
        })
    }

    /// The intraday timeline with a running cumulative volume.
    ///
    /// The cumulative series is monotonically non-decreasing and its final
    /// value equals the day's total volume.
    pub fn timeline(&self, day: &[&TradeRecord]) -> Vec<TimelinePoint> {
        let mut cumulative = 0u64;
        day.iter()
            .map(|r| {
                cumulative += r.size;
                TimelinePoint {
                    time: r.trade_time,
                    size: r.size,
                    cumulative_volume: cumulative,
                }
            })
            .collect()
    }

    /// The mean and median of per-day total volume across the whole table.
    ///
    /// These are the dashed reference lines on the cumulative-volume chart.
    pub fn volume_guides(&self, all: &[TradeRecord]) -> Result<VolumeGuides, AnalyticsError> {
        if all.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "the table holds no trades".to_string(),
            ));
        }

        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for record in all {
            *per_day.entry(record.trade_date).or_default() += record.size;
        }

        let totals: Vec<u64> = per_day.values().copied().collect();
        let sum: u64 = totals.iter().sum();
        let daily_mean = Decimal::from(sum) / Decimal::from(totals.len());

        Ok(VolumeGuides {
            daily_mean,
            daily_median: median(totals),
        })
    }

    /// The `n` largest trades of the day by size, descending, each with its
    /// share of the day's total volume.
    pub fn top_trades(&self, day: &[&TradeRecord], n: usize) -> Vec<TopTrade> {
        let total: u64 = day.iter().map(|r| r.size).sum();

        let mut ranked: Vec<&TradeRecord> = day.to_vec();
        // Stable sort keeps earlier prints first among equal sizes.
        ranked.sort_by(|a, b| b.size.cmp(&a.size));
        ranked.truncate(n);

        ranked
            .into_iter()
            .map(|r| TopTrade {
                time: r.trade_time,
                underlying: r.underlying.clone(),
                expiration: r.expiration,
                option_type: r.option_type,
                side: r.side,
                size: r.size,
                pct_of_total: pct_of(r.size, total),
            })
            .collect()
    }

    /// Total volume per underlying symbol, descending.
    pub fn volume_by_product(&self, day: &[&TradeRecord]) -> Vec<VolumeBucket> {
        let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
        for record in day {
            *grouped.entry(record.underlying.clone()).or_default() += record.size;
        }
        bucketize(grouped)
    }

    /// Total volume per expiration date, descending.
    pub fn volume_by_expiration(&self, day: &[&TradeRecord]) -> Vec<VolumeBucket> {
        let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
        for record in day {
            *grouped.entry(record.expiration.to_string()).or_default() += record.size;
        }
        bucketize(grouped)
    }

    /// Splits the given rows into the four position buckets
    /// (bought/sold calls/puts).
    pub fn position_breakdown(&self, rows: &[&TradeRecord]) -> PositionBreakdown {
        let mut breakdown = PositionBreakdown::default();
        for record in rows {
            let bucket = match (record.option_type, record.side) {
                (OptionType::Call, TradeSide::Buy) => &mut breakdown.bought_calls,
                (OptionType::Call, TradeSide::Sell) => &mut breakdown.sold_calls,
                (OptionType::Put, TradeSide::Buy) => &mut breakdown.bought_puts,
                (OptionType::Put, TradeSide::Sell) => &mut breakdown.sold_puts,
            };
            *bucket += record.size;
        }
        breakdown
    }

    /// The position breakdown of each product among the given rows, in order
    /// of first appearance.
    pub fn positions_by_product(&self, rows: &[&TradeRecord]) -> Vec<ProductPosition> {
        let mut positions: Vec<ProductPosition> = Vec::new();
        for record in rows {
            let idx = match positions.iter().position(|p| p.product == record.underlying) {
                Some(idx) => idx,
                None => {
                    positions.push(ProductPosition {
                        product: record.underlying.clone(),
                        breakdown: PositionBreakdown::default(),
                    });
                    positions.len() - 1
                }
            };
            let entry = &mut positions[idx];
            let bucket = match (record.option_type, record.side) {
                (OptionType::Call, TradeSide::Buy) => &mut entry.breakdown.bought_calls,
                (OptionType::Call, TradeSide::Sell) => &mut entry.breakdown.sold_calls,
                (OptionType::Put, TradeSide::Buy) => &mut entry.breakdown.bought_puts,
                (OptionType::Put, TradeSide::Sell) => &mut entry.breakdown.sold_puts,
            };
            *bucket += record.size;
        }
        positions
    }
}

/// Median of a set of counts; the mean of the middle pair for even counts.
fn median(mut values: Vec<u64>) -> Decimal {
    values.sort_unstable();
    let n = values.len();
    if n == 0 {
        return Decimal::ZERO;
    }
    if n % 2 == 1 {
        Decimal::from(values[n / 2])
    } else {
        (Decimal::from(values[n / 2 - 1]) + Decimal::from(values[n / 2])) / dec!(2)
    }
}

/// `part` as a percentage of `total`, rounded to 4dp.
fn pct_of(part: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) / Decimal::from(total) * dec!(100)).round_dp(4)
}

/// Turns grouped totals into percentage-annotated buckets sorted by volume,
/// descending, with ties broken by key.
fn bucketize(grouped: BTreeMap<String, u64>) -> Vec<VolumeBucket> {
    let total: u64 = grouped.values().sum();
    let mut buckets: Vec<VolumeBucket> = grouped
        .into_iter()
        .map(|(key, volume)| VolumeBucket {
            key,
            total_volume: volume,
            pct_of_total: pct_of(volume, total),
        })
        .collect();
    buckets.sort_by(|a, b| {
        b.total_volume
            .cmp(&a.total_volume)
            .then_with(|| a.key.cmp(&b.key))
    });
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(
        date: &str,
        time: &str,
        sym: &str,
        exp: &str,
        option_type: OptionType,
        side: TradeSide,
        size: u64,
    ) -> TradeRecord {
        TradeRecord {
            trade_date: date.parse::<NaiveDate>().unwrap(),
            trade_time: time.parse::<NaiveTime>().unwrap(),
            underlying: sym.to_string(),
            expiration: exp.parse::<NaiveDate>().unwrap(),
            option_type,
            side,
            size,
        }
    }

    fn sample_day() -> Vec<TradeRecord> {
        vec![
            record("2022-01-18", "09:30:00", "AAPL", "2022-02-18", OptionType::Call, TradeSide::Buy, 10),
            record("2022-01-18", "10:00:00", "TSLA", "2022-01-21", OptionType::Put, TradeSide::Sell, 50),
            record("2022-01-18", "11:30:00", "AAPL", "2022-01-21", OptionType::Call, TradeSide::Sell, 20),
            record("2022-01-18", "15:59:00", "NVDA", "2022-02-18", OptionType::Put, TradeSide::Buy, 20),
        ]
    }

    #[test]
    fn daily_summary_computes_bounds_and_central_tendency() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let engine = AnalyticsEngine::new();
        let summary = engine
            .daily_summary("2022-01-18".parse().unwrap(), &refs)
            .unwrap();

        assert_eq!(summary.first_trade, "09:30:00".parse::<NaiveTime>().unwrap());
        assert_eq!(summary.last_trade, "15:59:00".parse::<NaiveTime>().unwrap());
        assert_eq!(summary.total_volume, 100);
        assert_eq!(summary.trade_count, 4);
        assert_eq!(summary.mean_trade_size, dec!(25));
        // sizes sorted: 10 20 20 50 -> median is the mean of the middle pair
        assert_eq!(summary.median_trade_size, dec!(20));
    }

    #[test]
    fn daily_summary_rejects_empty_day() {
        let engine = AnalyticsEngine::new();
        let err = engine
            .daily_summary("2022-01-18".parse().unwrap(), &[])
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotEnoughData(_)));
    }

    #[test]
    fn timeline_accumulates_to_total() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let timeline = AnalyticsEngine::new().timeline(&refs);

        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[0].cumulative_volume, 10);
        assert_eq!(timeline[3].cumulative_volume, 100);
        assert!(timeline.windows(2).all(|w| w[0].cumulative_volume <= w[1].cumulative_volume));
    }

    #[test]
    fn volume_guides_average_per_day_totals() {
        let mut all = sample_day();
        // Second session with a 200-contract total.
        all.push(record("2022-01-19", "09:45:00", "AMD", "2022-02-18", OptionType::Call, TradeSide::Buy, 200));
        let guides = AnalyticsEngine::new().volume_guides(&all).unwrap();

        // Day totals are 100 and 200.
        assert_eq!(guides.daily_mean, dec!(150));
        assert_eq!(guides.daily_median, dec!(150));
    }

    #[test]
    fn top_trades_rank_by_size_with_shares() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let top = AnalyticsEngine::new().top_trades(&refs, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].size, 50);
        assert_eq!(top[0].pct_of_total, dec!(50));
        assert_eq!(top[1].size, 20);
        // Stable ordering: the earlier of the two 20-lots comes first.
        assert_eq!(top[1].underlying, "AAPL");
        assert_eq!(top[1].pct_of_total, dec!(20));
    }

    #[test]
    fn volume_buckets_sort_descending_and_sum_to_hundred_pct() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let buckets = AnalyticsEngine::new().volume_by_product(&refs);

        assert_eq!(buckets[0].key, "TSLA");
        assert_eq!(buckets[0].total_volume, 50);
        let pct_sum: Decimal = buckets.iter().map(|b| b.pct_of_total).sum();
        assert_eq!(pct_sum, dec!(100));
    }

    #[test]
    fn volume_by_expiration_groups_on_expiry() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let buckets = AnalyticsEngine::new().volume_by_expiration(&refs);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2022-01-21");
        assert_eq!(buckets[0].total_volume, 70);
    }

    #[test]
    fn position_buckets_partition_the_volume() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let breakdown = AnalyticsEngine::new().position_breakdown(&refs);

        assert_eq!(breakdown.bought_calls, 10);
        assert_eq!(breakdown.sold_calls, 20);
        assert_eq!(breakdown.bought_puts, 20);
        assert_eq!(breakdown.sold_puts, 50);
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn positions_by_product_keep_appearance_order() {
        let day = sample_day();
        let refs: Vec<&TradeRecord> = day.iter().collect();
        let positions = AnalyticsEngine::new().positions_by_product(&refs);

        let products: Vec<&str> = positions.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(products, vec!["AAPL", "TSLA", "NVDA"]);
        assert_eq!(positions[0].breakdown.bought_calls, 10);
        assert_eq!(positions[0].breakdown.sold_calls, 20);
    }

    #[test]
    fn median_handles_odd_and_even_counts() {
        assert_eq!(median(vec![3, 1, 2]), dec!(2));
        assert_eq!(median(vec![4, 1, 2, 3]), dec!(2.5));
        assert_eq!(median(vec![]), Decimal::ZERO);
    }
}
