//! Quickbooks invoice rows for client invoices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::csv::{CsvRecord, cents, quickbooks_date};
use super::error::ExportError;
use super::{DEFAULT_DUE_DAYS, document_dates, period_label};
use crate::billing::ClientInvoice;
use crate::period::Period;

/// One line of a Quickbooks invoice import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuickbooksInvoiceRow {
    /// Invoice number; shared by every line of one invoice.
    pub ref_number: u32,
    /// Client name.
    pub customer: String,
    /// Invoice date.
    #[serde(serialize_with = "quickbooks_date")]
    pub txn_date: NaiveDate,
    /// Payment due date.
    #[serde(serialize_with = "quickbooks_date")]
    pub due_date: NaiveDate,
    /// Product or service item.
    pub item: String,
    /// Line description.
    pub description: String,
    /// Line amount.
    #[serde(serialize_with = "cents")]
    pub amount: Decimal,
}

impl QuickbooksInvoiceRow {
    /// Starts building a row.
    #[must_use]
    pub fn builder() -> QuickbooksInvoiceRowBuilder {
        QuickbooksInvoiceRowBuilder::default()
    }
}

impl CsvRecord for QuickbooksInvoiceRow {
    const HEADERS: &'static [&'static str] = &[
        "RefNumber",
        "Customer",
        "TxnDate",
        "DueDate",
        "Item",
        "Description",
        "Amount",
    ];
}

/// Builder for [`QuickbooksInvoiceRow`].
#[derive(Debug, Clone, Default)]
pub struct QuickbooksInvoiceRowBuilder {
    ref_number: Option<u32>,
    customer: Option<String>,
    txn_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    item: Option<String>,
    description: String,
    amount: Decimal,
}

impl QuickbooksInvoiceRowBuilder {
    /// Builder: set the invoice number.
    #[must_use]
    pub const fn ref_number(mut self, ref_number: u32) -> Self {
        self.ref_number = Some(ref_number);
        self
    }

    /// Builder: set the customer.
    #[must_use]
    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Builder: set the invoice and due dates.
    #[must_use]
    pub const fn dates(mut self, txn_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.txn_date = Some(txn_date);
        self.due_date = Some(due_date);
        self
    }

    /// Builder: set the item, description and amount.
    #[must_use]
    pub fn line(
        mut self,
        item: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.item = Some(item.into());
        self.description = description.into();
        self.amount = amount;
        self
    }

    /// Builds the row.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::RefNumberRequired` without a reference number and
    /// `ExportError::MissingField` without a customer, dates or item.
    pub fn build(self) -> Result<QuickbooksInvoiceRow, ExportError> {
        Ok(QuickbooksInvoiceRow {
            ref_number: self.ref_number.ok_or(ExportError::RefNumberRequired)?,
            customer: self.customer.ok_or(ExportError::MissingField("Customer"))?,
            txn_date: self.txn_date.ok_or(ExportError::MissingField("TxnDate"))?,
            due_date: self.due_date.ok_or(ExportError::MissingField("DueDate"))?,
            item: self.item.ok_or(ExportError::MissingField("Item"))?,
            description: self.description,
            amount: self.amount,
        })
    }
}

/// Formats client invoices as Quickbooks invoice lines.
#[derive(Debug, Clone, Copy)]
pub struct QuickbooksInvoices {
    due_days: u32,
}

impl Default for QuickbooksInvoices {
    fn default() -> Self {
        Self::new(DEFAULT_DUE_DAYS)
    }
}

impl QuickbooksInvoices {
    /// Creates a formatter whose invoices fall due `due_days` after the period end.
    #[must_use]
    pub const fn new(due_days: u32) -> Self {
        Self { due_days }
    }

    /// Emits the Delivery Fees, Tips and Admin Fee lines of each invoice.
    ///
    /// Zero lines are omitted. Invoices with at least one line get consecutive
    /// reference numbers starting at `first_ref`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::PeriodMismatch` if an invoice was computed for a
    /// period other than `period`, `ExportError::Billing` if an invoice cannot
    /// be computed, or `ExportError::RefNumberRequired` once reference numbers
    /// run out.
    pub fn format(
        &self,
        invoices: &[ClientInvoice<'_>],
        period: Period,
        first_ref: u32,
    ) -> Result<Vec<QuickbooksInvoiceRow>, ExportError> {
        let (txn_date, due_date) = document_dates(period, self.due_days);
        let label = period_label(period);
        let mut next_ref = Some(first_ref);
        let mut rows = Vec::new();

        for invoice in invoices {
            let found = invoice.accounting().period();
            if found != period {
                return Err(ExportError::PeriodMismatch {
                    expected: period,
                    found,
                });
            }

            let lines = [
                ("Delivery Fees", invoice.fee_total()?),
                ("Tips", invoice.tip_total()?),
                ("Admin Fee", invoice.admin_fee()),
            ];

            let mut emitted = false;
            for (item, amount) in lines {
                if amount.is_zero() {
                    continue;
                }
                let mut builder = QuickbooksInvoiceRow::builder()
                    .customer(invoice.client().name.as_str())
                    .dates(txn_date, due_date)
                    .line(item, format!("{item} {label}"), amount);
                if let Some(ref_number) = next_ref {
                    builder = builder.ref_number(ref_number);
                }
                rows.push(builder.build()?);
                emitted = true;
            }

            if emitted {
                next_ref = next_ref.and_then(|n| n.checked_add(1));
            }
        }

        Ok(rows)
    }
}
