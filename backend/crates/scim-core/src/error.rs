use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid user name '{value}': must be lower case alphanumeric with optional characters '+-_.@' {location}")]
    InvalidUserName {
        value: String,
        location: ErrorLocation,
    },

    #[error("An email must be provided {location}")]
    MissingEmail { location: ErrorLocation },

    #[error("A given name and a family name must be provided {location}")]
    MissingName { location: ErrorLocation },
}

pub type Result<T> = StdResult<T, CoreError>;
