use tracing::info;

use crate::db::ClientStore;
use crate::error::{Error, ErrorKind, Result};
use crate::format;
use crate::models::{Client, NewClient};

use super::{confirm_then, resolve_with_retry, Interaction};

/// Client-facing operations on top of any [`ClientStore`].
pub struct ClientService<S> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a client. The returned record carries the new id and
    /// creation timestamp.
    pub fn create(&self, client: &NewClient) -> Result<Client> {
        let created = self.store.create(client)?;
        info!(id = created.id, created_at = %created.created_at, "client added");
        Ok(created)
    }

    /// Look a client up. A miss keeps the `ClientNotFound` tag so callers can
    /// ask again; every other failure is a `DatabaseSelect`.
    pub fn get_by_id(&self, id: i64) -> Result<Client> {
        self.store.get_by_id(id).map_err(|err| {
            if err.has_kind(ErrorKind::ClientNotFound) {
                Error::wrap(err, ErrorKind::ClientNotFound, "client not found")
            } else {
                Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get client")
            }
        })
    }

    /// Prompt for a client id until it names an existing client.
    pub fn resolve(&self, io: &mut dyn Interaction, label: &str) -> Result<Client> {
        resolve_with_retry(
            io,
            label,
            ErrorKind::ClientNotFound,
            "Client not found. Try again",
            |id| self.get_by_id(id),
        )
    }

    /// Delete a client, and with it every shoot booked for them, once the
    /// operator confirms.
    pub fn delete(&self, id: i64, io: &mut dyn Interaction) -> Result<()> {
        confirm_then(io, "Are you sure you want to delete the client?", || {
            self.store.delete(id)
        })?;
        info!(id, "client deleted");
        Ok(())
    }

    /// Fetch every client and render the listing.
    pub fn list(&self) -> Result<String> {
        let clients = self
            .store
            .list()
            .map_err(|err| Error::wrap(err, ErrorKind::ClientListFailed, "failed to list clients"))?;
        Ok(format::clients_table(&clients))
    }
}
