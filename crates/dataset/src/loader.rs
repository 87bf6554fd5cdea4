use crate::error::DatasetError;
use crate::store::TradeStore;
use core_types::{OptionType, TradeRecord, TradeSide};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The column headers this crate requires in the input spreadsheet.
///
/// Extra columns (the feed also carries e.g. `opraTradeType`) are ignored.
const REQUIRED_COLUMNS: [&str; 7] = [
    "tradeDate",
    "tradeTime",
    "undsym",
    "expdate",
    "callPut",
    "side",
    "tradeSize",
];

/// Positions of the required columns within one header row.
struct ColumnMap {
    trade_date: usize,
    trade_time: usize,
    underlying: usize,
    expiration: usize,
    option_type: usize,
    side: usize,
    size: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            trade_date: find(REQUIRED_COLUMNS[0])?,
            trade_time: find(REQUIRED_COLUMNS[1])?,
            underlying: find(REQUIRED_COLUMNS[2])?,
            expiration: find(REQUIRED_COLUMNS[3])?,
            option_type: find(REQUIRED_COLUMNS[4])?,
            side: find(REQUIRED_COLUMNS[5])?,
            size: find(REQUIRED_COLUMNS[6])?,
        })
    }
}

/// Loads the trade spreadsheet at `path` and builds the in-memory table.
///
/// This is the primary entry point of the crate; it is called exactly once
/// at startup. Rows that cannot be parsed are dropped and counted.
pub fn load_trades(path: impl AsRef<Path>) -> Result<TradeStore, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let store = load_trades_from_reader(file)?;
    tracing::info!(
        path = %path.display(),
        records = store.len(),
        "Loaded trade spreadsheet."
    );
    Ok(store)
}

/// Reads trade records from any CSV source.
///
/// Split out from `load_trades` so the parsing logic can be exercised
/// against in-memory fixtures.
pub fn load_trades_from_reader<R: Read>(reader: R) -> Result<TradeStore, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in csv_reader.records() {
        let row = row?;
        match parse_row(&row, &columns) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Dropped rows with missing or unparseable fields.");
    }
    if records.is_empty() {
        return Err(DatasetError::EmptyTable);
    }

    Ok(TradeStore::from_records(records))
}

/// Parses one data row into a `TradeRecord`, or `None` if any field is
/// missing or malformed.
fn parse_row(row: &csv::StringRecord, columns: &ColumnMap) -> Option<TradeRecord> {
    let field = |idx: usize| row.get(idx).map(str::trim).filter(|s| !s.is_empty());

    let trade_date = field(columns.trade_date)?.parse().ok()?;
    let trade_time = field(columns.trade_time)?.parse().ok()?;
    let underlying = field(columns.underlying)?.to_string();
    let expiration = field(columns.expiration)?.parse().ok()?;
    let option_type: OptionType = field(columns.option_type)?.parse().ok()?;
    let side: TradeSide = field(columns.side)?.parse().ok()?;
    let size: u64 = field(columns.size)?.parse().ok()?;

    Some(TradeRecord {
        trade_date,
        trade_time,
        underlying,
        expiration,
        option_type,
        side,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "tradeDate,tradeTime,undsym,expdate,callPut,side,tradeSize";

    #[test]
    fn loads_well_formed_rows() {
        let csv_data = format!(
            "{HEADER}\n\
             2022-01-18,09:30:01,AAPL,2022-02-18,C,B,25\n\
             2022-01-18,09:31:15,TSLA,2022-01-21,P,S,100\n"
        );
        let store = load_trades_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        let first = &store.records()[0];
        assert_eq!(first.underlying, "AAPL");
        assert_eq!(first.size, 25);
        assert_eq!(first.option_type, OptionType::Call);
        assert_eq!(first.side, TradeSide::Buy);
    }

    #[test]
    fn drops_rows_with_missing_or_bad_fields() {
        let csv_data = format!(
            "{HEADER}\n\
             2022-01-18,09:30:01,AAPL,2022-02-18,C,B,25\n\
             2022-01-18,,AAPL,2022-02-18,C,B,30\n\
             2022-01-18,09:32:00,NVDA,2022-02-18,X,B,10\n\
             2022-01-18,09:33:00,AMD,2022-02-18,P,S,not-a-number\n"
        );
        let store = load_trades_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ignores_extra_columns() {
        let csv_data = "tradeDate,tradeTime,undsym,expdate,callPut,side,tradeSize,opraTradeType\n\
                        2022-01-18,09:30:01,AAPL,2022-02-18,C,B,25,REGULAR\n";
        let store = load_trades_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv_data = "tradeDate,tradeTime,undsym,expdate,callPut,side\n\
                        2022-01-18,09:30:01,AAPL,2022-02-18,C,B\n";
        let err = load_trades_from_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == "tradeSize"));
    }

    #[test]
    fn rejects_table_with_no_usable_rows() {
        let csv_data = format!("{HEADER}\n2022-01-18,,AAPL,2022-02-18,C,B,30\n");
        let err = load_trades_from_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyTable));
    }
}
