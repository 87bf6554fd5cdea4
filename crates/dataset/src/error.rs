use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open the trade spreadsheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read the trade spreadsheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("The trade spreadsheet is missing the required column '{0}'")]
    MissingColumn(String),

    #[error("The trade spreadsheet contained no usable rows")]
    EmptyTable,

    #[error("No trades found for date {0}")]
    DateNotFound(NaiveDate),

    #[error("No trades found for {product} expiring on {expiration}")]
    PositionNotFound {
        product: String,
        expiration: NaiveDate,
    },

    #[error("No trades found expiring on {0}")]
    ExpirationNotFound(NaiveDate),
}
