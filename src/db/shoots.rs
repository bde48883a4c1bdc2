use rusqlite::{params, Error as SqlError, Row};

use crate::error::{Error, ErrorKind, Result};
use crate::models::{NewShoot, Shoot};

use super::connection::Database;

/// Column order shared by insert, single-row and list reads. Adding a column
/// here is enough to keep all three in step with [`shoot_from_row`].
const SHOOT_COLUMNS: &str = "id, client_id, date, start_time, end_time, shoot_price, location, \
                             client_first_name, client_last_name, shoot_type, notes, created_at";

/// Persistence operations for shoots. The store never resolves the client
/// itself: the name snapshot in [`NewShoot`] is written as given.
pub trait ShootStore {
    /// Insert a shoot and return it with the store-assigned id and
    /// timestamp. An unknown `client_id` fails with `ShootCreateFailed`
    /// because the foreign key rejects it.
    fn create(&self, shoot: &NewShoot) -> Result<Shoot>;

    /// `ShootNotFound` when the id matches nothing.
    fn get_by_id(&self, id: i64) -> Result<Shoot>;

    /// `ShootNotFound` when the id matches nothing.
    fn delete(&self, id: i64) -> Result<()>;

    /// Every shoot in whatever order the store returns them. A row that
    /// cannot be decoded fails the whole call rather than being skipped.
    fn list(&self) -> Result<Vec<Shoot>>;
}

/// [`ShootStore`] backed by the SQLite `shoots` table.
#[derive(Clone, Copy)]
pub struct SqliteShootStore<'db> {
    db: &'db Database,
}

impl<'db> SqliteShootStore<'db> {
    /// Borrow `db` for the lifetime of the store; the store itself is `Copy`.
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl ShootStore for SqliteShootStore<'_> {
    fn create(&self, shoot: &NewShoot) -> Result<Shoot> {
        let sql = format!(
            "INSERT INTO shoots (
                 client_id, date, start_time, end_time, shoot_price, location,
                 client_first_name, client_last_name, shoot_type, notes
             )
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             RETURNING {SHOOT_COLUMNS}"
        );
        let details = &shoot.details;
        self.db
            .run(|conn| {
                conn.query_row(
                    &sql,
                    params![
                        shoot.client_id,
                        details.shoot_date,
                        details.start_time,
                        details.end_time,
                        details.price,
                        details.location,
                        shoot.client_first_name,
                        shoot.client_last_name,
                        details.shoot_type,
                        details.notes
                    ],
                    shoot_from_row,
                )
            })
            .map_err(|err| Error::wrap(err, ErrorKind::ShootCreateFailed, "failed to create shoot"))
    }

    fn get_by_id(&self, id: i64) -> Result<Shoot> {
        let sql = format!("SELECT {SHOOT_COLUMNS} FROM shoots WHERE id = ?1");
        match self
            .db
            .run(|conn| conn.query_row(&sql, params![id], shoot_from_row))
        {
            Ok(shoot) => Ok(shoot),
            Err(SqlError::QueryReturnedNoRows) => {
                Err(Error::new(ErrorKind::ShootNotFound, "shoot not found"))
            }
            Err(err) => Err(Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get shoot")),
        }
    }

    fn delete(&self, id: i64) -> Result<()> {
        let deleted = self
            .db
            .run(|conn| conn.execute("DELETE FROM shoots WHERE id = ?1", params![id]))
            .map_err(|err| Error::wrap(err, ErrorKind::ShootDeleteFailed, "failed to delete shoot"))?;

        if deleted == 0 {
            Err(Error::new(ErrorKind::ShootNotFound, "shoot not found"))
        } else {
            Ok(())
        }
    }

    fn list(&self) -> Result<Vec<Shoot>> {
        let sql = format!("SELECT {SHOOT_COLUMNS} FROM shoots");
        self.db
            .run(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let shoots = stmt
                    .query_map([], shoot_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(shoots)
            })
            .map_err(|err| Error::wrap(err, ErrorKind::DatabaseSelect, "failed to get shoots"))
    }
}

/// Map a row selected with [`SHOOT_COLUMNS`]. Dates and times come back as
/// the TEXT forms rusqlite's chrono support writes.
fn shoot_from_row(row: &Row<'_>) -> rusqlite::Result<Shoot> {
    Ok(Shoot {
        id: row.get(0)?,
        client_id: row.get(1)?,
        shoot_date: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        price: row.get(5)?,
        location: row.get(6)?,
        client_first_name: row.get(7)?,
        client_last_name: row.get(8)?,
        shoot_type: row.get(9)?,
        notes: row.get(10)?,
        created_at: row.get(11)?,
    })
}
