use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Date range is empty or could not be computed")]
    InvalidDateRange,
    #[error("Band `{0}` has a minimum greater than its maximum")]
    InvalidBand(&'static str),
    #[error("Prices must be positive and the revenue target must not be negative")]
    InvalidPrice,
    #[error("The store must open before it closes")]
    InvalidStoreHours,
}
