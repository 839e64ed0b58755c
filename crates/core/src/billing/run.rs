//! Generation runs: every invoice or paystub of one period.

use dispatch_shared::types::{InvoiceId, PayrollId};
use rayon::prelude::*;
use tracing::info;

use super::invoice::ClientInvoice;
use super::paystub::CourierPaystub;
use super::schedule::FeeSchedule;
use super::types::{Client, Courier, Ride};
use crate::period::{Invoice, Payroll, Period};

/// Computes the accounting entities of a period.
///
/// Entities are independent, so each run fans out over clients or couriers.
pub struct BillingRun;

impl BillingRun {
    /// Builds one invoice per client for `period`.
    pub fn invoices<'a>(
        clients: &'a [Client],
        rides: &'a [Ride],
        period: Period,
        schedule: &'a FeeSchedule,
    ) -> Vec<ClientInvoice<'a>> {
        let invoices: Vec<ClientInvoice<'a>> = clients
            .par_iter()
            .map(|client| ClientInvoice::new(client, period, rides, schedule))
            .collect();

        info!(
            period = %period,
            clients = invoices.len(),
            month_end = period.is_month_end(),
            "Computed client invoices"
        );

        invoices
    }

    /// Builds one paystub per courier for `period`.
    pub fn paystubs<'a>(
        couriers: &'a [Courier],
        rides: &'a [Ride],
        period: Period,
        schedule: &'a FeeSchedule,
    ) -> Vec<CourierPaystub<'a>> {
        let paystubs: Vec<CourierPaystub<'a>> = couriers
            .par_iter()
            .map(|courier| CourierPaystub::new(courier, period, rides, schedule))
            .collect();

        info!(
            period = %period,
            couriers = paystubs.len(),
            month_end = period.is_month_end(),
            "Computed courier paystubs"
        );

        paystubs
    }

    /// Records a generated invoice once its artifact is stored at `file_path`.
    #[must_use]
    pub fn record_invoice(invoice: &ClientInvoice<'_>, file_path: impl Into<String>) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            client_id: invoice.client().id,
            period: invoice.accounting().period(),
            file_path: file_path.into(),
        }
    }

    /// Records a generated payroll once its artifact is stored at `file_path`.
    #[must_use]
    pub fn record_payroll(period: Period, file_path: impl Into<String>) -> Payroll {
        Payroll {
            id: PayrollId::new(),
            period,
            file_path: file_path.into(),
        }
    }
}
