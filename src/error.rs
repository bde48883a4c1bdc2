//! Error taxonomy shared by the persistence, service and shell layers.
//!
//! Every failure carries a flat [`ErrorKind`] tag, a short message and an
//! optional underlying cause. Callers branch on the tag (see [`is_kind`]) and
//! print [`Error::report`] when the failure has to reach the operator.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed cause kept around for diagnostics.
pub type Source = Box<dyn StdError + Send + Sync + 'static>;

/// Shorthand used by every fallible operation in the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DatabaseConnection,
    DatabaseQuery,
    DatabaseInsert,
    DatabaseDelete,
    DatabaseSelect,
    ClientNotFound,
    ClientCreateFailed,
    ClientDeleteFailed,
    ClientListFailed,
    ShootNotFound,
    ShootCreateFailed,
    ShootDeleteFailed,
    ShootListFailed,
    ValidationFailed,
    InvalidInput,
    ConfigError,
}

impl ErrorKind {
    /// Stable upper-case code used in messages and log lines.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::DatabaseConnection => "DB_CONNECTION_ERROR",
            ErrorKind::DatabaseQuery => "DB_QUERY_ERROR",
            ErrorKind::DatabaseInsert => "DB_INSERT_ERROR",
            ErrorKind::DatabaseDelete => "DB_DELETE_ERROR",
            ErrorKind::DatabaseSelect => "DB_SELECT_ERROR",
            ErrorKind::ClientNotFound => "CLIENT_NOT_FOUND",
            ErrorKind::ClientCreateFailed => "CLIENT_CREATE_ERROR",
            ErrorKind::ClientDeleteFailed => "CLIENT_DELETE_ERROR",
            ErrorKind::ClientListFailed => "CLIENT_LIST_ERROR",
            ErrorKind::ShootNotFound => "SHOOT_NOT_FOUND",
            ErrorKind::ShootCreateFailed => "SHOOT_CREATE_ERROR",
            ErrorKind::ShootDeleteFailed => "SHOOT_DELETE_ERROR",
            ErrorKind::ShootListFailed => "SHOOT_LIST_ERROR",
            ErrorKind::ValidationFailed => "VALIDATION_ERROR",
            ErrorKind::InvalidInput => "INVALID_INPUT_ERROR",
            ErrorKind::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tagged application error.
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Source>,
}

impl Error {
    /// Fresh error with no underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Re-tag an existing failure while keeping it as the cause.
    pub fn wrap<E>(source: E, kind: ErrorKind, message: impl Into<String>) -> Self
    where
        E: Into<Source>,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when this error or anything it wraps carries `kind`.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        is_kind(self, kind)
    }

    /// Single-line rendering of the error followed by its cause chain.
    pub fn report(&self) -> String {
        let mut line = self.to_string();
        let mut current = self.source();
        while let Some(cause) = current {
            line.push_str(": ");
            line.push_str(&cause.to_string());
            current = cause.source();
        }
        line
    }
}

/// Walk `err` and its sources looking for an [`Error`] tagged with `kind`.
pub fn is_kind(err: &(dyn StdError + 'static), kind: ErrorKind) -> bool {
    let mut current = Some(err);
    while let Some(candidate) = current {
        if let Some(tagged) = candidate.downcast_ref::<Error>() {
            if tagged.kind == kind {
                return true;
            }
        }
        current = candidate.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = Error::new(ErrorKind::ClientNotFound, "client not found");
        assert_eq!(err.to_string(), "[CLIENT_NOT_FOUND] client not found");
        assert!(err.has_kind(ErrorKind::ClientNotFound));
        assert!(!err.has_kind(ErrorKind::ShootNotFound));
    }

    #[test]
    fn wrapped_kinds_are_visible_through_the_chain() {
        let inner = Error::new(ErrorKind::ClientNotFound, "client not found");
        let outer = Error::wrap(inner, ErrorKind::DatabaseSelect, "failed to get client");

        assert_eq!(outer.kind(), ErrorKind::DatabaseSelect);
        assert!(outer.has_kind(ErrorKind::DatabaseSelect));
        assert!(outer.has_kind(ErrorKind::ClientNotFound));
        assert!(!outer.has_kind(ErrorKind::ClientDeleteFailed));
    }

    #[test]
    fn foreign_causes_are_kept_for_reporting() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = Error::wrap(io, ErrorKind::DatabaseConnection, "failed to open database");

        assert_eq!(
            err.report(),
            "[DB_CONNECTION_ERROR] failed to open database: disk on fire"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn is_kind_accepts_plain_std_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "nope");
        assert!(!is_kind(&io, ErrorKind::ConfigError));
    }
}
