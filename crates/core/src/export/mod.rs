//! Quickbooks export rows.
//!
//! Invoices become Quickbooks invoice lines and paystubs become bill lines.
//! Both are flat rows with a fixed column order, written out with
//! [`write_csv`].

pub mod csv;
pub mod error;
pub mod invoice;
pub mod payroll;

pub use csv::{CsvRecord, write_csv};
pub use error::ExportError;
pub use invoice::{QuickbooksInvoiceRow, QuickbooksInvoiceRowBuilder, QuickbooksInvoices};
pub use payroll::{QuickbooksBillRow, QuickbooksBillRowBuilder, QuickbooksBills};

use chrono::{Days, NaiveDate};

use crate::period::Period;

/// Date format Quickbooks expects in imports.
pub const QUICKBOOKS_DATE_FORMAT: &str = "%m/%d/%Y";

/// Default number of days between the period end and the due date.
pub const DEFAULT_DUE_DAYS: u32 = 15;

/// Transaction and due date of the documents of `period`.
fn document_dates(period: Period, due_days: u32) -> (NaiveDate, NaiveDate) {
    let txn_date = period.end_date();
    let due_date = txn_date
        .checked_add_days(Days::new(u64::from(due_days)))
        .unwrap_or(txn_date);
    (txn_date, due_date)
}

/// Human-readable span of `period`, used in descriptions and memos.
fn period_label(period: Period) -> String {
    format!(
        "{} - {}",
        period.start_date().format(QUICKBOOKS_DATE_FORMAT),
        period.end_date().format(QUICKBOOKS_DATE_FORMAT)
    )
}
