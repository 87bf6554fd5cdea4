use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::TradeRecord;
use std::collections::BTreeSet;

/// The single in-memory table of trade records.
///
/// Built once by the loader, then shared immutably across the application.
/// All views return borrowed slices of the loaded records; selecting rows
/// never mutates or copies the table.
#[derive(Debug)]
pub struct TradeStore {
    records: Vec<TradeRecord>,
}

impl TradeStore {
    /// Wraps an already-parsed set of records.
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record in load order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// The distinct trade dates present in the table, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.trade_date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The distinct underlying symbols present in the table, ascending.
    pub fn products(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.underlying.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The distinct expiration dates present in the table, ascending.
    pub fn expirations(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.expiration)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All trades that printed on `date`, sorted by trade time.
    ///
    /// A date with no matching rows is a designed error, not an empty view:
    /// the dashboard treats it as a 404.
    pub fn day(&self, date: NaiveDate) -> Result<Vec<&TradeRecord>, DatasetError> {
        let mut rows: Vec<&TradeRecord> = self
            .records
            .iter()
            .filter(|r| r.trade_date == date)
            .collect();
        if rows.is_empty() {
            return Err(DatasetError::DateNotFound(date));
        }
        rows.sort_by_key(|r| r.trade_time);
        Ok(rows)
    }

    /// All trades for one product and expiration pair, across all dates.
    pub fn position(
        &self,
        product: &str,
        expiration: NaiveDate,
    ) -> Result<Vec<&TradeRecord>, DatasetError> {
        let rows: Vec<&TradeRecord> = self
            .records
            .iter()
            .filter(|r| r.matches_position(product, expiration))
            .collect();
        if rows.is_empty() {
            return Err(DatasetError::PositionNotFound {
                product: product.to_string(),
                expiration,
            });
        }
        Ok(rows)
    }

    /// All trades expiring on `expiration`, across all products and dates.
    pub fn expiring(&self, expiration: NaiveDate) -> Result<Vec<&TradeRecord>, DatasetError> {
        let rows: Vec<&TradeRecord> = self
            .records
            .iter()
            .filter(|r| r.expiration == expiration)
            .collect();
        if rows.is_empty() {
            return Err(DatasetError::ExpirationNotFound(expiration));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use core_types::{OptionType, TradeSide};

    fn record(date: &str, time: &str, sym: &str, exp: &str, size: u64) -> TradeRecord {
        TradeRecord {
            trade_date: date.parse::<NaiveDate>().unwrap(),
            trade_time: time.parse::<NaiveTime>().unwrap(),
            underlying: sym.to_string(),
            expiration: exp.parse::<NaiveDate>().unwrap(),
            option_type: OptionType::Call,
            side: TradeSide::Buy,
            size,
        }
    }

    fn store() -> TradeStore {
        TradeStore::from_records(vec![
            record("2022-01-19", "10:15:00", "TSLA", "2022-02-18", 40),
            record("2022-01-18", "09:31:00", "AAPL", "2022-01-21", 10),
            record("2022-01-18", "09:30:00", "TSLA", "2022-02-18", 20),
        ])
    }

    #[test]
    fn distinct_keys_are_sorted_and_deduped() {
        let store = store();
        assert_eq!(
            store.dates(),
            vec![
                "2022-01-18".parse::<NaiveDate>().unwrap(),
                "2022-01-19".parse::<NaiveDate>().unwrap()
            ]
        );
        assert_eq!(store.products(), vec!["AAPL".to_string(), "TSLA".to_string()]);
        assert_eq!(store.expirations().len(), 2);
    }

    #[test]
    fn day_view_is_sorted_by_time() {
        let store = store();
        let day = store.day("2022-01-18".parse().unwrap()).unwrap();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].underlying, "TSLA");
        assert_eq!(day[1].underlying, "AAPL");
    }

    #[test]
    fn missing_date_is_an_error() {
        let store = store();
        let err = store.day("2022-03-01".parse().unwrap()).unwrap_err();
        assert!(matches!(err, DatasetError::DateNotFound(_)));
    }

    #[test]
    fn position_view_spans_dates() {
        let store = store();
        let rows = store
            .position("TSLA", "2022-02-18".parse().unwrap())
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn expiring_view_spans_products_and_dates() {
        let store = store();
        let rows = store.expiring("2022-02-18".parse().unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.underlying == "TSLA"));
    }

    #[test]
    fn missing_expiration_is_an_error() {
        let store = store();
        let err = store.expiring("2022-06-17".parse().unwrap()).unwrap_err();
        assert!(matches!(err, DatasetError::ExpirationNotFound(_)));
    }

    #[test]
    fn missing_position_is_an_error() {
        let store = store();
        let err = store
            .position("NVDA", "2022-02-18".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, DatasetError::PositionNotFound { .. }));
    }
}
