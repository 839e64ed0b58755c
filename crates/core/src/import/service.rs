//! Batched ride import.

use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use super::book::{RideBook, UpsertOutcome};
use super::cache::LookupCache;
use super::directory::Directory;
use super::error::ImportError;
use super::types::RideImportRow;
use crate::billing::Ride;

/// Default number of rows resolved per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based position of the row in the input.
    pub row: usize,
    /// Job id of the row.
    pub job_id: String,
    /// Why the row was rejected.
    #[serde(serialize_with = "serialize_display")]
    pub error: ImportError,
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rides with a new job id.
    pub inserted: usize,
    /// Rides that replaced an earlier ride with the same job id.
    pub updated: usize,
    /// Rows that were skipped, in input order.
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    /// Number of rows that reached the ride book.
    #[must_use]
    pub const fn imported(&self) -> usize {
        self.inserted + self.updated
    }

    /// Returns true if every row was imported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Imports dispatch rows into a ride book.
#[derive(Debug, Clone, Copy)]
pub struct RideImporter {
    batch_size: usize,
}

impl Default for RideImporter {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl RideImporter {
    /// Creates an importer resolving `batch_size` rows at a time.
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Rows resolved per batch.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Imports `rows` into `book`.
    ///
    /// Names are resolved in parallel within a batch through `cache`; rides are
    /// then upserted in input order, so the last row for a job id wins. Invalid
    /// rows are reported rather than aborting the import.
    pub fn import<D>(
        &self,
        rows: Vec<RideImportRow>,
        directory: &D,
        cache: &LookupCache,
        book: &mut RideBook,
    ) -> ImportReport
    where
        D: Directory + ?Sized,
    {
        let mut report = ImportReport::default();
        let total = rows.len();
        let mut rows = rows.into_iter().enumerate().peekable();
        let mut batch_number = 0usize;

        while rows.peek().is_some() {
            let batch: Vec<(usize, RideImportRow)> = rows.by_ref().take(self.batch_size).collect();
            batch_number += 1;

            let resolved: Vec<(usize, String, Result<Ride, ImportError>)> = batch
                .into_par_iter()
                .map(|(index, row)| {
                    let job_id = row.job_id.clone();
                    (index + 1, job_id, resolve(row, directory, cache))
                })
                .collect();

            let mut batch_failures = 0usize;
            for (row, job_id, result) in resolved {
                match result {
                    Ok(ride) => match book.upsert(ride) {
                        UpsertOutcome::Inserted => report.inserted += 1,
                        UpsertOutcome::Updated => report.updated += 1,
                    },
                    Err(error) => {
                        batch_failures += 1;
                        report.failures.push(RowFailure { row, job_id, error });
                    }
                }
            }

            debug!(
                batch = batch_number,
                failures = batch_failures,
                "Imported ride batch"
            );
        }

        info!(
            rows = total,
            inserted = report.inserted,
            updated = report.updated,
            failed = report.failures.len(),
            "Ride import finished"
        );

        report
    }
}

fn resolve<D>(
    row: RideImportRow,
    directory: &D,
    cache: &LookupCache,
) -> Result<Ride, ImportError>
where
    D: Directory + ?Sized,
{
    let client = cache.client_id(&row.client_name, directory)?;
    let courier = cache.courier_id(&row.courier_number, directory)?;
    Ok(row.into_ride(client, courier)?)
}

fn serialize_display<S: Serializer>(error: &ImportError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
