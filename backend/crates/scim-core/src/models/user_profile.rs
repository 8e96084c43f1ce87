//! Caller-editable part of a user record.
//!
//! A `UserProfile` is built through [`UserProfileBuilder`], which runs the
//! field rules before handing out a value. Profiles that arrive through serde
//! skip the builder, so writers call [`UserProfile::validate`] again before
//! persisting anything.

use crate::{CoreError, Name, Result as CoreErrorResult};

use std::panic::Location;
use std::sync::LazyLock;

use error_location::ErrorLocation;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Allowed user name characters.
pub const USER_NAME_PATTERN: &str = r"^[a-z0-9+\-_.@]+$";

static USER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USER_NAME_PATTERN).expect("USER_NAME_PATTERN is a valid regex"));

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    user_name: String,
    name: Name,
    #[serde(default)]
    emails: Vec<String>,
    #[serde(default)]
    phone_numbers: Vec<String>,
    #[serde(default = "default_active")]
    active: bool,
}

impl UserProfile {
    pub fn builder() -> UserProfileBuilder {
        UserProfileBuilder::default()
    }

    /// Start a builder pre-populated with this profile's fields.
    pub fn to_builder(&self) -> UserProfileBuilder {
        UserProfileBuilder {
            user_name: Some(self.user_name.clone()),
            given_name: Some(self.name.given_name.clone()),
            family_name: Some(self.name.family_name.clone()),
            emails: self.emails.clone(),
            phone_numbers: self.phone_numbers.clone(),
            active: Some(self.active),
        }
    }

    /// Copy of this profile with `active = false`.
    pub fn deactivated(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }

    /// Check the user name pattern, the primary email and both name parts.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if !USER_NAME_REGEX.is_match(&self.user_name) {
            return Err(CoreError::InvalidUserName {
                value: self.user_name.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.primary_email().trim().is_empty() {
            return Err(CoreError::MissingEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.name.given_name.trim().is_empty() || self.name.family_name.trim().is_empty() {
            return Err(CoreError::MissingName {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// First email entry, or an empty string when none was supplied.
    pub fn primary_email(&self) -> &str {
        self.emails.first().map(String::as_str).unwrap_or("")
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    /// First phone number entry, if any.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_numbers.first().map(String::as_str)
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserProfileBuilder {
    user_name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    emails: Vec<String>,
    phone_numbers: Vec<String>,
    active: Option<bool>,
}

impl UserProfileBuilder {
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn name(self, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        self.given_name(given_name).family_name(family_name)
    }

    pub fn given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    pub fn family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    /// Append an email; the first one added is the primary.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }

    pub fn emails(mut self, emails: Vec<String>) -> Self {
        self.emails = emails;
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_numbers.push(phone_number.into());
        self
    }

    pub fn phone_numbers(mut self, phone_numbers: Vec<String>) -> Self {
        self.phone_numbers = phone_numbers;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    #[track_caller]
    pub fn build(self) -> CoreErrorResult<UserProfile> {
        let (given_name, family_name) = match (self.given_name, self.family_name) {
            (Some(given_name), Some(family_name)) => (given_name, family_name),
            _ => {
                return Err(CoreError::MissingName {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let profile = UserProfile {
            user_name: self.user_name.unwrap_or_default(),
            name: Name::new(given_name, family_name),
            emails: self.emails,
            phone_numbers: self.phone_numbers,
            active: self.active.unwrap_or(true),
        };
        profile.validate()?;

        Ok(profile)
    }
}
