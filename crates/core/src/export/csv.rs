//! CSV serialization for export rows.

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::QUICKBOOKS_DATE_FORMAT;
use super::error::ExportError;

/// A row with a fixed column order.
///
/// Fields serialize in `HEADERS` order. The header is written even when there
/// are no rows.
pub trait CsvRecord: Serialize {
    /// Column names, in order.
    const HEADERS: &'static [&'static str];
}

/// Writes the header line followed by one line per row.
///
/// Fields are quoted only when they contain a delimiter, quote or newline.
///
/// # Errors
///
/// Returns `ExportError::Csv` if a row cannot be serialized and
/// `ExportError::Io` if the writer fails.
pub fn write_csv<R, W>(rows: &[R], writer: W) -> Result<(), ExportError>
where
    R: CsvRecord,
    W: Write,
{
    let mut out = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    out.write_record(R::HEADERS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Serializes a date the way Quickbooks imports it.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn quickbooks_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(QUICKBOOKS_DATE_FORMAT))
}

/// Serializes an amount with exactly two decimal places.
pub(crate) fn cents<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{amount:.2}"))
}
