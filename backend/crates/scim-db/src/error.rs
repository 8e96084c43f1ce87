use scim_auth::AuthError;
use scim_core::CoreError;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User {id} does not exist {location}")]
    NotFound { id: Uuid, location: ErrorLocation },

    #[error("Username already in use (could be inactive account): {user_name} {location}")]
    AlreadyExists {
        user_name: String,
        /// Id of an inactive account holding the name, when one was found
        inactive_id: Option<Uuid>,
        location: ErrorLocation,
    },

    #[error(
        "Attempt to update a user ({id}) with wrong version: submitted={submitted} but found={found} {location}"
    )]
    OptimisticLock {
        id: Uuid,
        submitted: i64,
        found: i64,
        location: ErrorLocation,
    },

    #[error("Integrity violation: {operation} matched {affected} rows, expected at most 1 {location}")]
    IntegrityViolation {
        operation: &'static str,
        affected: u64,
        location: ErrorLocation,
    },

    #[error("Invalid filter '{filter}': {message} {location}")]
    InvalidFilter {
        filter: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported filter '{filter}': {message} {location}")]
    UnsupportedFilter {
        filter: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid user: {source} {location}")]
    InvalidResource {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Password rejected: {message} {location}")]
    WeakCredential {
        message: String,
        location: ErrorLocation,
    },

    #[error("Old password is incorrect {location}")]
    InvalidCredential { location: ErrorLocation },

    #[error("Credential error: {source} {location}")]
    Credential {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Cannot decode users.{column}: {message} {location}")]
    RowDecode {
        column: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error at {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Storage failure {location}")]
    Storage {
        #[source]
        source: sqlx::Error,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn integrity(operation: &'static str, affected: u64) -> Self {
        Self::IntegrityViolation {
            operation,
            affected,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_filter<F: Into<String>, M: Into<String>>(filter: F, message: M) -> Self {
        Self::InvalidFilter {
            filter: filter.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported_filter<F: Into<String>, M: Into<String>>(filter: F, message: M) -> Self {
        Self::UnsupportedFilter {
            filter: filter.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn row_decode<M: Into<String>>(column: &'static str, message: M) -> Self {
        Self::RowDecode {
            column,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Broken invariants must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::IntegrityViolation { .. } | Self::RowDecode { .. } | Self::Migration { .. }
        )
    }
}

impl From<sqlx::Error> for StoreError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for StoreError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::InvalidResource {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for StoreError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        match source {
            AuthError::WeakCredential { message, location } => {
                Self::WeakCredential { message, location }
            }
            AuthError::InvalidCredential { location } => Self::InvalidCredential { location },
            source @ AuthError::Hashing { .. } => Self::Credential {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
