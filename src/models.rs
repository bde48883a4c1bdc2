//! Domain records that mirror the SQLite schema and travel between the
//! persistence layer, the services and the shell. They stay plain data
//! holders; persistence and presentation live elsewhere.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Fields the operator supplies when registering a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Given name, shown first in listings and summaries.
    pub first_name: String,
    /// Family name. Together with `first_name` it is what a booking copies.
    pub last_name: String,
    /// Kept as typed; no format is imposed so local and international
    /// numbers both fit.
    pub phone: String,
    /// Free-form profile link or handle. Empty when the client has none.
    pub social_network_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A client row as stored. `id` and `created_at` are assigned by the store
/// on insert and never change afterwards.
pub struct Client {
    /// Primary key from the database.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Shown in the deletion summary so the operator can tell namesakes apart.
    pub phone: String,
    /// Empty when the client has no profile link.
    pub social_network_url: String,
    /// Insertion timestamp in UTC.
    pub created_at: NaiveDateTime,
}

impl fmt::Display for Client {
    /// `First Last`, used by summaries and log lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// What the operator enters about a shoot, before it is tied to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShootDetails {
    /// Calendar day of the shoot, entered as `dd.mm.yyyy`.
    pub shoot_date: NaiveDate,
    /// Local wall-clock time; no time zone is stored.
    pub start_time: NaiveTime,
    /// Not checked against `start_time`; a shoot may wrap past midnight.
    pub end_time: NaiveTime,
    /// Whole currency units. Unsigned because a shoot never pays the client.
    pub price: u32,
    /// Free text: a studio name, a park, an address.
    pub location: String,
    /// Genre such as "love story" or "family", used to plan equipment.
    pub shoot_type: String,
    /// Optional remarks. Empty when there are none.
    pub notes: String,
}

/// Insert payload for a shoot. The client name fields are a snapshot taken
/// when the shoot is booked; renaming the client later does not touch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShoot {
    /// Must reference an existing client or the insert is rejected.
    pub client_id: i64,
    pub client_first_name: String,
    pub client_last_name: String,
    pub details: ShootDetails,
}

impl NewShoot {
    /// Bind `details` to `client`, copying the client's current name.
    pub fn for_client(client: &Client, details: ShootDetails) -> Self {
        Self {
            client_id: client.id,
            client_first_name: client.first_name.clone(),
            client_last_name: client.last_name.clone(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A shoot row as stored.
pub struct Shoot {
    /// Primary key from the database.
    pub id: i64,
    /// References `clients.id`; the row disappears when that client is deleted.
    pub client_id: i64,
    pub shoot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: u32,
    pub location: String,
    /// Name as it was when the shoot was booked.
    pub client_first_name: String,
    pub client_last_name: String,
    pub shoot_type: String,
    pub notes: String,
    /// Insertion timestamp in UTC.
    pub created_at: NaiveDateTime,
}

impl Shoot {
    /// `First Last` from the booking-time snapshot.
    pub fn client_name(&self) -> String {
        format!("{} {}", self.client_first_name, self.client_last_name)
    }
}
