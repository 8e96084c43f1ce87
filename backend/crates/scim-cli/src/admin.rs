//! Administrative operations over the user store.
//!
//! Every operation returns a JSON value ready for printing.

use crate::{CliError, Result as CliErrorResult, UnsupportedFilterTranslator};

use scim_auth::{Argon2Hasher, CredentialGuard, LengthPasswordPolicy};
use scim_config::Config;
use scim_core::{ScimMeta, ScimUser, UserProfile};
use scim_db::{ScimUserRepository, StoreSettings, UserDatabase};

use std::sync::Arc;

use futures::TryStreamExt;
use log::info;
use serde_json::{Value, json};
use uuid::Uuid;

/// Profile fields to change; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub user_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub active: Option<bool>,
}

pub struct Admin {
    repository: ScimUserRepository,
}

impl Admin {
    pub fn new(repository: ScimUserRepository) -> Self {
        Self { repository }
    }

    /// Open the configured database and wire the store with the configured
    /// password policy and Argon2 parameters.
    pub async fn open(config: &Config) -> CliErrorResult<Self> {
        let db_path = config.database_path()?;
        let pool = UserDatabase::open(&db_path, config.database.max_connections).await?;

        let policy =
            LengthPasswordPolicy::new(config.password.min_length, config.password.max_length);
        let hasher = Argon2Hasher::new(
            config.hashing.memory_kib,
            config.hashing.iterations,
            config.hashing.parallelism,
        )?;
        let settings = StoreSettings {
            deactivate_on_delete: config.store.deactivate_on_delete,
            page_size: config.store.page_size,
        };

        let repository = ScimUserRepository::new(
            pool,
            CredentialGuard::new(Arc::new(policy), Arc::new(hasher)),
            Arc::new(UnsupportedFilterTranslator),
            settings,
        );

        Ok(Self::new(repository))
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        given_name: &str,
        family_name: &str,
        emails: &[String],
        phone_numbers: &[String],
        password: &str,
    ) -> CliErrorResult<Value> {
        let profile = UserProfile::builder()
            .user_name(user_name)
            .name(given_name, family_name)
            .emails(emails.to_vec())
            .phone_numbers(phone_numbers.to_vec())
            .build()
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;

        let user = self.repository.create(&profile, password).await?;
        info!("Created user {} ({})", user.user_name(), user.id());

        to_json(&user)
    }

    pub async fn get_user(&self, id: &str) -> CliErrorResult<Value> {
        let user = self.repository.retrieve(parse_id(id)?).await?;
        to_json(&user)
    }

    pub async fn list_users(&self) -> CliErrorResult<Value> {
        let users: Vec<ScimUser> = self.repository.list().try_collect().await?;
        Ok(serde_json::to_value(users)?)
    }

    /// Apply `changes` on top of the stored profile, submitting `version` as
    /// the expected current version.
    pub async fn update_user(
        &self,
        id: &str,
        version: i64,
        changes: ProfileChanges,
    ) -> CliErrorResult<Value> {
        let id = parse_id(id)?;
        let current = self.repository.retrieve(id).await?;

        let mut builder = current.profile().to_builder();
        if let Some(user_name) = changes.user_name {
            builder = builder.user_name(user_name);
        }
        if let Some(given_name) = changes.given_name {
            builder = builder.given_name(given_name);
        }
        if let Some(family_name) = changes.family_name {
            builder = builder.family_name(family_name);
        }
        if let Some(email) = changes.email {
            builder = builder.emails(vec![email]);
        }
        if let Some(phone_number) = changes.phone_number {
            builder = builder.phone_numbers(vec![phone_number]);
        }
        if let Some(active) = changes.active {
            builder = builder.active(active);
        }
        let profile = builder
            .build()
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;

        let submitted = ScimUser::new(
            id,
            ScimMeta {
                version,
                ..*current.meta()
            },
            profile,
        );
        let user = self.repository.update(id, &submitted).await?;

        to_json(&user)
    }

    pub async fn change_password(
        &self,
        id: &str,
        old_password: Option<&str>,
        new_password: &str,
    ) -> CliErrorResult<Value> {
        let id = parse_id(id)?;
        let changed = self
            .repository
            .change_password(id, old_password, new_password)
            .await?;

        Ok(json!({ "id": id, "changed": changed }))
    }

    /// `version` of `None` removes regardless of the stored version.
    pub async fn remove_user(&self, id: &str, version: Option<i64>) -> CliErrorResult<Value> {
        let user = self
            .repository
            .remove(parse_id(id)?, version.unwrap_or(-1))
            .await?;

        to_json(&user)
    }
}

#[track_caller]
fn parse_id(id: &str) -> CliErrorResult<Uuid> {
    Uuid::parse_str(id).map_err(|e| CliError::invalid_argument(format!("invalid id '{}': {}", id, e)))
}

fn to_json(user: &ScimUser) -> CliErrorResult<Value> {
    Ok(serde_json::to_value(user)?)
}
