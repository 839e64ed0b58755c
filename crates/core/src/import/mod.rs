//! Ride import.
//!
//! Rows exported by the dispatch system name their client and courier rather
//! than referencing them by id. An import resolves those names through a
//! [`Directory`], memoised per import in a [`LookupCache`], and upserts the
//! resulting rides into a [`RideBook`] keyed by job id.

pub mod book;
pub mod cache;
pub mod directory;
pub mod error;
pub mod service;
pub mod types;

pub use book::{RideBook, UpsertOutcome};
pub use cache::LookupCache;
pub use directory::{Directory, InMemoryDirectory};
pub use error::ImportError;
pub use service::{ImportReport, RideImporter, RowFailure};
pub use types::RideImportRow;
