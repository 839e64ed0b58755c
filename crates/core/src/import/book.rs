//! Job-id keyed ride storage.

use std::collections::HashMap;

use crate::billing::Ride;

/// Whether an upsert created or replaced a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The job id was new.
    Inserted,
    /// A ride with the same job id was replaced.
    Updated,
}

/// Rides keyed by dispatch job id; re-importing a job updates it in place.
#[derive(Debug, Clone, Default)]
pub struct RideBook {
    rides: HashMap<String, Ride>,
}

impl RideBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `ride`, replacing any ride with the same job id.
    pub fn upsert(&mut self, ride: Ride) -> UpsertOutcome {
        match self.rides.insert(ride.job_id.clone(), ride) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Inserted,
        }
    }

    /// Looks up a ride by job id.
    #[must_use]
    pub fn get(&self, job_id: &str) -> Option<&Ride> {
        self.rides.get(job_id)
    }

    /// Number of rides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rides.len()
    }

    /// Returns true if the book holds no rides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// All rides ordered by ready time, then job id.
    #[must_use]
    pub fn into_rides(self) -> Vec<Ride> {
        let mut rides: Vec<Ride> = self.rides.into_values().collect();
        rides.sort_by(|a, b| {
            a.ready_time
                .cmp(&b.ready_time)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });
        rides
    }
}

impl FromIterator<Ride> for RideBook {
    fn from_iter<I: IntoIterator<Item = Ride>>(iter: I) -> Self {
        let mut book = Self::new();
        for ride in iter {
            book.upsert(ride);
        }
        book
    }
}
