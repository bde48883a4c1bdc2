//! Core library surface for the photoshoot manager: client and shoot records
//! kept in SQLite, the services that guard the rules between them, and the
//! terminal shell that drives it all.
//!
//! The binary only wires these pieces together, so the same stores and
//! services can be exercised directly from tests or other tooling.
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod service;
pub mod shell;

/// Persistence handle and record stores.
pub use db::{ClientStore, Database, ShootStore, SqliteClientStore, SqliteShootStore};

pub use error::{is_kind, Error, ErrorKind, Result};

/// The domain records other layers pass around.
pub use models::{Client, NewClient, NewShoot, Shoot, ShootDetails};

pub use service::{ClientService, Interaction, ShootService};

/// The interactive entry point.
pub use shell::{Prompter, Shell};
