use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use thousands::Separable;

use crate::calendar::DateRange;
use crate::error::SalesError;
use crate::generator::SalesHistory;
use crate::sale::{SaleRecord, CSV_HEADER};

pub const DEFAULT_OUTPUT_FILE: &str = "saleshistory.csv";

/// The console summary printed once the history has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub revenue: Decimal,
    pub range: DateRange,
    pub output: String,
}

/// Writes the header followed by one line per record.
///
/// # Errors
/// Errors when serializing a record or writing to `writer` fails
pub fn write_csv<W: io::Write>(records: &[SaleRecord], writer: W) -> Result<(), SalesError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// # Errors
/// Errors when `path` cannot be created or written
pub fn write_csv_path<P: AsRef<Path>>(records: &[SaleRecord], path: P) -> Result<(), SalesError> {
    let file = File::create(path)?;
    write_csv(records, file)
}

impl Summary {
    #[must_use]
    pub fn new(history: &SalesHistory, output: impl Into<String>) -> Self {
        Summary {
            rows: history.records().len(),
            revenue: history.revenue(),
            range: *history.range(),
            output: output.into(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let revenue = format!("{:.2}", self.revenue.round_dp(2));
        let (whole, cents) = revenue.split_once('.').unwrap_or((revenue.as_str(), "00"));
        writeln!(
            f,
            "Wrote {} rows to {}.",
            self.rows.separate_with_commas(),
            self.output
        )?;
        writeln!(f, "Total revenue: ${}.{}", whole.separate_with_commas(), cents)?;
        write!(
            f,
            "Date range: {} to {}",
            self.range.start(),
            self.range.end()
        )
    }
}
