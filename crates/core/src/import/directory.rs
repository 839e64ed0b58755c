//! Client and courier lookups used by the import.

use std::collections::HashMap;

use dispatch_shared::types::{ClientId, CourierId};

use super::error::ImportError;
use crate::billing::{Client, Courier};

/// Normalises a client name or call number into a lookup key.
pub(crate) fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Source of truth for resolving dispatch names into ids.
///
/// `Ok(None)` means the name is unknown; `Err` means the lookup itself failed.
pub trait Directory: Sync {
    /// Finds the client with the given display name.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Directory` if the lookup could not be performed.
    fn client_id(&self, name: &str) -> Result<Option<ClientId>, ImportError>;

    /// Finds the courier with the given radio call number.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Directory` if the lookup could not be performed.
    fn courier_id(&self, call_number: &str) -> Result<Option<CourierId>, ImportError>;
}

/// Directory over client and courier lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    clients: HashMap<String, ClientId>,
    couriers: HashMap<String, CourierId>,
}

impl InMemoryDirectory {
    /// Indexes clients by name and couriers by call number, case-insensitively.
    #[must_use]
    pub fn new(clients: &[Client], couriers: &[Courier]) -> Self {
        Self {
            clients: clients
                .iter()
                .map(|client| (lookup_key(&client.name), client.id))
                .collect(),
            couriers: couriers
                .iter()
                .map(|courier| (lookup_key(&courier.call_number), courier.id))
                .collect(),
        }
    }
}

impl Directory for InMemoryDirectory {
    fn client_id(&self, name: &str) -> Result<Option<ClientId>, ImportError> {
        Ok(self.clients.get(&lookup_key(name)).copied())
    }

    fn courier_id(&self, call_number: &str) -> Result<Option<CourierId>, ImportError> {
        Ok(self.couriers.get(&lookup_key(call_number)).copied())
    }
}
