use rusqlite::{params, Error as SqlError, Row};

use crate::error::{Error, ErrorKind, Result};
use crate::models::{Client, NewClient};

use super::connection::Database;

/// Column order shared by every client read so the row mapper always lines up.
const CLIENT_COLUMNS: &str = "id, first_name, last_name, phone, social_network_url, created_at";

/// Persistence operations for clients. Implementations trust their input;
/// required-field checks belong to the caller.
pub trait ClientStore {
    /// Insert a client and return it with the store-assigned id and timestamp.
    fn create(&self, client: &NewClient) -> Result<Client>;

    /// Fetch one client. `ClientNotFound` when the id matches nothing.
    fn get_by_id(&self, id: i64) -> Result<Client>;

    /// Remove a client together with its shoots. `ClientNotFound` when the
    /// id matches nothing.
    fn delete(&self, id: i64) -> Result<()>;

    /// Every client in whatever order the store returns them. Any undecodable
    /// row fails the call with `DatabaseSelect`.
    fn list(&self) -> Result<Vec<Client>>;
}

/// [`ClientStore`] backed by the SQLite `clients` table.
#[derive(Clone, Copy)]
pub struct SqliteClientStore<'db> {
    db: &'db Database,
}

impl<'db> SqliteClientStore<'db> {
    /// Borrow `db` for the lifetime of the store. Copies are cheap, so the
    /// same store can back both services.
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl ClientStore for SqliteClientStore<'_> {
    fn create(&self, client: &NewClient) -> Result<Client> {
        let sql = format!(
            "INSERT INTO clients (first_name, last_name, phone, social_network_url)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {CLIENT_COLUMNS}"
        );
        self.db
            .run(|conn| {
                conn.query_row(
                    &sql,
                    params![
                        client.first_name,
                        client.last_name,
                        client.phone,
                        client.social_network_url
                    ],
                    client_from_row,
                )
            })
            .map_err(|err| Error::wrap(err, ErrorKind::ClientCreateFailed, "failed to create client"))
    }

    fn get_by_id(&self, id: i64) -> Result<Client> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1");
        match self
            .db
            .run(|conn| conn.query_row(&sql, params![id], client_from_row))
        {
            Ok(client) => Ok(client),
            Err(SqlError::QueryReturnedNoRows) => {
                Err(Error::new(ErrorKind::ClientNotFound, "client not found"))
            }
            Err(err) => Err(Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get client")),
        }
    }

    /// The `ON DELETE CASCADE` on `shoots.client_id` removes the client's
    /// bookings in the same statement.
    fn delete(&self, id: i64) -> Result<()> {
        let deleted = self
            .db
            .run(|conn| conn.execute("DELETE FROM clients WHERE id = ?1", params![id]))
            .map_err(|err| Error::wrap(err, ErrorKind::ClientDeleteFailed, "failed to delete client"))?;

        if deleted == 0 {
            Err(Error::new(ErrorKind::ClientNotFound, "client not found"))
        } else {
            Ok(())
        }
    }

    fn list(&self) -> Result<Vec<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients");
        self.db
            .run(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let clients = stmt
                    .query_map([], client_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(clients)
            })
            .map_err(|err| Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get clients"))
    }
}

fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        phone: row.get(3)?,
        social_network_url: row.get(4)?,
        created_at: row.get(5)?,
    })
}
