use tracing::info;

use crate::db::{ClientStore, ShootStore};
use crate::error::{Error, ErrorKind, Result};
use crate::format;
use crate::models::{Client, NewShoot, Shoot, ShootDetails};

use super::{confirm_then, resolve_with_retry, Interaction};

/// Shoot operations. Holds a client store as well because every booking
/// has to be tied to an existing client.
pub struct ShootService<S, C> {
    shoots: S,
    clients: C,
}

impl<S: ShootStore, C: ClientStore> ShootService<S, C> {
    pub fn new(shoots: S, clients: C) -> Self {
        Self { shoots, clients }
    }

    /// Book a shoot for `client_id`. The client is looked up first so the
    /// booking can carry a snapshot of their name; an unknown id fails with
    /// `ClientNotFound` and nothing is written.
    pub fn create(&self, client_id: i64, details: ShootDetails) -> Result<Shoot> {
        let client = self.clients.get_by_id(client_id)?;
        let shoot = self.shoots.create(&NewShoot::for_client(&client, details))?;
        info!(
            id = shoot.id,
            client_id,
            date = %shoot.shoot_date,
            start = %shoot.start_time,
            "shoot added"
        );
        Ok(shoot)
    }

    /// Prompt for a client id until it names an existing client.
    pub fn resolve_client(&self, io: &mut dyn Interaction, label: &str) -> Result<Client> {
        resolve_with_retry(
            io,
            label,
            ErrorKind::ClientNotFound,
            "Client not found. Try again",
            |id| self.clients.get_by_id(id),
        )
    }

    /// Look a shoot up. A miss keeps the `ShootNotFound` tag so callers can
    /// ask again; every other failure is a `DatabaseSelect`.
    pub fn get_by_id(&self, id: i64) -> Result<Shoot> {
        self.shoots.get_by_id(id).map_err(|err| {
            if err.has_kind(ErrorKind::ShootNotFound) {
                Error::wrap(err, ErrorKind::ShootNotFound, "shoot not found")
            } else {
                Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get shoot")
            }
        })
    }

    /// Prompt for a shoot id until it names an existing shoot.
    pub fn resolve(&self, io: &mut dyn Interaction, label: &str) -> Result<Shoot> {
        resolve_with_retry(
            io,
            label,
            ErrorKind::ShootNotFound,
            "Shoot not found. Try again",
            |id| self.get_by_id(id),
        )
    }

    pub fn delete(&self, id: i64, io: &mut dyn Interaction) -> Result<()> {
        confirm_then(io, "Are you sure you want to delete the shoot?", || {
            self.shoots.delete(id)
        })?;
        info!(id, "shoot deleted");
        Ok(())
    }

    /// Fetch every shoot and render the listing.
    pub fn list(&self) -> Result<String> {
        let shoots = self
            .shoots
            .list()
            .map_err(|err| Error::wrap(err, ErrorKind::ShootListFailed, "failed to list shoots"))?;
        Ok(format::shoots_table(&shoots))
    }
}
