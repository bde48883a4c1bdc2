//! SQLite-backed record stores, one submodule per table plus the shared
//! connection handle.

mod clients;
mod connection;
mod shoots;

pub use clients::{ClientStore, SqliteClientStore};
pub use connection::Database;
pub use shoots::{ShootStore, SqliteShootStore};
