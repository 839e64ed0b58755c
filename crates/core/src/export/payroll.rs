//! Quickbooks bill rows for courier paystubs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::csv::{CsvRecord, cents, quickbooks_date};
use super::error::ExportError;
use super::{DEFAULT_DUE_DAYS, document_dates, period_label};
use crate::billing::CourierPaystub;
use crate::period::Period;

/// Ledger account radio rental deductions are posted to.
pub const RADIO_RENTAL_ACCOUNT: &str = "Radio Rental Income";

/// One line of a Quickbooks bill import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuickbooksBillRow {
    /// Bill number; shared by every line of one paystub.
    pub ref_number: u32,
    /// Courier name.
    pub vendor: String,
    /// Bill date.
    #[serde(serialize_with = "quickbooks_date")]
    pub txn_date: NaiveDate,
    /// Payment due date.
    #[serde(serialize_with = "quickbooks_date")]
    pub due_date: NaiveDate,
    /// Expense account.
    pub account: String,
    /// Line memo.
    pub memo: String,
    /// Line amount; deductions are negative.
    #[serde(serialize_with = "cents")]
    pub amount: Decimal,
}

impl QuickbooksBillRow {
    /// Starts building a row.
    #[must_use]
    pub fn builder() -> QuickbooksBillRowBuilder {
        QuickbooksBillRowBuilder::default()
    }
}

impl CsvRecord for QuickbooksBillRow {
    const HEADERS: &'static [&'static str] = &[
        "RefNumber",
        "Vendor",
        "TxnDate",
        "DueDate",
        "Account",
        "Memo",
        "Amount",
    ];
}

/// Builder for [`QuickbooksBillRow`].
#[derive(Debug, Clone, Default)]
pub struct QuickbooksBillRowBuilder {
    ref_number: Option<u32>,
    vendor: Option<String>,
    txn_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    account: Option<String>,
    memo: String,
    amount: Decimal,
}

impl QuickbooksBillRowBuilder {
    /// Builder: set the bill number.
    #[must_use]
    pub const fn ref_number(mut self, ref_number: u32) -> Self {
        self.ref_number = Some(ref_number);
        self
    }

    /// Builder: set the vendor.
    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Builder: set the bill and due dates.
    #[must_use]
    pub const fn dates(mut self, txn_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.txn_date = Some(txn_date);
        self.due_date = Some(due_date);
        self
    }

    /// Builder: set the account, memo and amount.
    #[must_use]
    pub fn line(
        mut self,
        account: impl Into<String>,
        memo: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.account = Some(account.into());
        self.memo = memo.into();
        self.amount = amount;
        self
    }

    /// Builds the row.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::RefNumberRequired` without a reference number and
    /// `ExportError::MissingField` without a vendor, dates or account.
    pub fn build(self) -> Result<QuickbooksBillRow, ExportError> {
        Ok(QuickbooksBillRow {
            ref_number: self.ref_number.ok_or(ExportError::RefNumberRequired)?,
            vendor: self.vendor.ok_or(ExportError::MissingField("Vendor"))?,
            txn_date: self.txn_date.ok_or(ExportError::MissingField("TxnDate"))?,
            due_date: self.due_date.ok_or(ExportError::MissingField("DueDate"))?,
            account: self.account.ok_or(ExportError::MissingField("Account"))?,
            memo: self.memo,
            amount: self.amount,
        })
    }
}

/// Formats courier paystubs as Quickbooks bill lines.
#[derive(Debug, Clone, Copy)]
pub struct QuickbooksBills {
    due_days: u32,
}

impl Default for QuickbooksBills {
    fn default() -> Self {
        Self::new(DEFAULT_DUE_DAYS)
    }
}

impl QuickbooksBills {
    /// Creates a formatter whose bills fall due `due_days` after the period end.
    #[must_use]
    pub const fn new(due_days: u32) -> Self {
        Self { due_days }
    }

    /// Emits the Delivery Fees, Tips and Radio Rental lines of each paystub.
    ///
    /// Earnings post to the courier's payout account; the radio rental is a
    /// negative line. Zero lines are omitted and paystubs with at least one
    /// line get consecutive reference numbers starting at `first_ref`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::PeriodMismatch` if a paystub was computed for a
    /// period other than `period`, or `ExportError::RefNumberRequired` once
    /// reference numbers run out.
    pub fn format(
        &self,
        paystubs: &[CourierPaystub<'_>],
        period: Period,
        first_ref: u32,
    ) -> Result<Vec<QuickbooksBillRow>, ExportError> {
        let (txn_date, due_date) = document_dates(period, self.due_days);
        let label = period_label(period);
        let mut next_ref = Some(first_ref);
        let mut rows = Vec::new();

        for paystub in paystubs {
            let found = paystub.accounting().period();
            if found != period {
                return Err(ExportError::PeriodMismatch {
                    expected: period,
                    found,
                });
            }

            let lines = [
                ("Delivery Fees", paystub.account(), paystub.fee_total()),
                ("Tips", paystub.account(), paystub.tip_total()),
                ("Radio Rental", RADIO_RENTAL_ACCOUNT, paystub.admin_fee()),
            ];

            let mut emitted = false;
            for (name, account, amount) in lines {
                if amount.is_zero() {
                    continue;
                }
                let mut builder = QuickbooksBillRow::builder()
                    .vendor(paystub.courier().name.as_str())
                    .dates(txn_date, due_date)
                    .line(account, format!("{name} {label}"), amount);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{Courier, CourierStatus, DeliveryStatus, FeeSchedule, Ride};
    use crate::export::write_csv;
    use dispatch_shared::types::{ClientId, CourierId};
    use rust_decimal_macros::dec;

    fn courier(name: &str, rents: bool) -> Courier {
        Courier {
            id: CourierId::new(),
            name: name.to_string(),
            call_number: name.to_lowercase(),
            status: CourierStatus::Guest,
            monthly_radio_rental: rents,
        }
    }

    fn ride(courier: CourierId, day: u32) -> Ride {
        Ride {
            job_id: format!("J-{courier}-{day}"),
            client: ClientId::new(),
            courier,
            ready_time: NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            delivery_status: DeliveryStatus::Complete,
            order_total: Some(dec!(15)),
            billable_total: Some(dec!(6.50)),
            tip: Some(dec!(2.25)),
            delivery_fee: Some(dec!(6.50)),
            pickup_address: None,
            destination_address1: Some("9 Elm St".to_string()),
            notes: None,
        }
    }

    fn leap_month_end() -> Period {
        Period::from_dates(
            NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
    }

    #[test]
    fn test_builder_requires_ref_number() {
        let result = QuickbooksBillRow::builder()
            .vendor("Sam Rivera")
            .dates(NaiveDate::MIN, NaiveDate::MIN)
            .line(RADIO_RENTAL_ACCOUNT, "", dec!(-30))
            .build();

        assert!(matches!(result, Err(ExportError::RefNumberRequired)));
    }

    #[test]
    fn test_format_bills_with_radio_rental() {
        let sam = courier("Sam", true);
        let ana = courier("Ana", false);
        let idle = courier("Idle", false);
        let rides = vec![ride(sam.id, 20), ride(sam.id, 21), ride(ana.id, 22)];
        let schedule = FeeSchedule::default();
        let couriers = [sam, idle, ana];
        let paystubs: Vec<CourierPaystub<'_>> = couriers
            .iter()
            .map(|c| CourierPaystub::new(c, leap_month_end(), &rides, &schedule))
            .collect();

        let rows = QuickbooksBills::default()
            .format(&paystubs, leap_month_end(), 500)
            .unwrap();

        let summary: Vec<(u32, &str, &str, Decimal)> = rows
            .iter()
            .map(|r| (r.ref_number, r.vendor.as_str(), r.account.as_str(), r.amount))
            .collect();
        assert_eq!(
            summary,
            vec![
                (500, "Sam", "Guest Courier Payouts", dec!(13.00)),
                (500, "Sam", "Guest Courier Payouts", dec!(4.50)),
                (500, "Sam", RADIO_RENTAL_ACCOUNT, dec!(-30)),
                (501, "Ana", "Guest Courier Payouts", dec!(6.50)),
                (501, "Ana", "Guest Courier Payouts", dec!(2.25)),
            ]
        );
        assert_eq!(rows[2].memo, "Radio Rental 02/16/2024 - 02/29/2024");
        assert_eq!(rows[0].due_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let mut out = Vec::new();
        write_csv(&rows[2..3], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with(
            "Sam,02/29/2024,03/15/2024,Radio Rental Income,Radio Rental 02/16/2024 - 02/29/2024,-30.00\n"
        ));
    }

    #[test]
    fn test_format_rejects_paystub_from_another_period() {
        let sam = courier("Sam", true);
        let schedule = FeeSchedule::default();
        let paystubs = vec![CourierPaystub::new(&sam, leap_month_end(), &[], &schedule)];
        let first_half = Period::from_dates(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        );

        let result = QuickbooksBills::default().format(&paystubs, first_half, 1);

        assert!(matches!(
            result,
            Err(ExportError::PeriodMismatch { expected, found })
                if expected == first_half && found == leap_month_end()
        ));
    }
}
