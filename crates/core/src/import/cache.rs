//! Per-import lookup cache using Moka.
//!
//! Dispatch exports repeat the same client and courier on most rows. The cache
//! remembers every answer, including "not found", for the lifetime of one
//! import so each distinct name reaches the directory once.

use dispatch_shared::types::{ClientId, CourierId};
use moka::sync::Cache;

use super::directory::{Directory, lookup_key};
use super::error::ImportError;

/// Default cache capacity (number of names per kind).
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Memoised client and courier lookups.
///
/// Thread-safe; concurrent lookups of the same name wait for a single
/// directory call.
#[derive(Clone)]
pub struct LookupCache {
    clients: Cache<String, Option<ClientId>>,
    couriers: Cache<String, Option<CourierId>>,
}

impl LookupCache {
    /// Creates an empty cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates an empty cache holding up to `max_capacity` names of each kind.
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            clients: Cache::new(max_capacity),
            couriers: Cache::new(max_capacity),
        }
    }

    /// Resolves a client name, asking `directory` only on a miss.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::ClientNotFound` for an unknown name, or the
    /// directory's own error.
    pub fn client_id<D>(&self, name: &str, directory: &D) -> Result<ClientId, ImportError>
    where
        D: Directory + ?Sized,
    {
        self.clients
            .try_get_with(lookup_key(name), || directory.client_id(name))
            .map_err(|err| (*err).clone())?
            .ok_or_else(|| ImportError::ClientNotFound(name.trim().to_string()))
    }

    /// Resolves a courier call number, asking `directory` only on a miss.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::CourierNotFound` for an unknown call number, or the
    /// directory's own error.
    pub fn courier_id<D>(&self, call_number: &str, directory: &D) -> Result<CourierId, ImportError>
    where
        D: Directory + ?Sized,
    {
        self.couriers
            .try_get_with(lookup_key(call_number), || directory.courier_id(call_number))
            .map_err(|err| (*err).clone())?
            .ok_or_else(|| ImportError::CourierNotFound(call_number.trim().to_string()))
    }

    /// Number of cached client names.
    #[must_use]
    pub fn client_count(&self) -> u64 {
        self.clients.run_pending_tasks();
        self.clients.entry_count()
    }

    /// Number of cached courier call numbers.
    #[must_use]
    pub fn courier_count(&self) -> u64 {
        self.couriers.run_pending_tasks();
        self.couriers.entry_count()
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LookupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCache")
            .field("clients", &self.clients.entry_count())
            .field("couriers", &self.couriers.entry_count())
            .finish()
    }
}
