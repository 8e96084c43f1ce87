//! SCIM user provisioning on top of the `users` table.
//!
//! ## Versions
//!
//! `version` is the optimistic locking token. Every content write (update,
//! deactivate) is a single conditional statement keyed by `(id, version)` and
//! bumps it by one, so the affected-row count tells us what happened:
//!
//! - 0 rows: stale version (or the row is gone)
//! - 1 row: success
//! - more: the key no longer identifies one row, reported as an
//!   integrity violation and never retried
//!
//! Password rotation advances `lastModified` but leaves `version` alone.
//!
//! `lastModified` is written as `MAX(now, lastModified + 1)` so it strictly
//! advances even when two writes land in the same millisecond.
//!
//! ## Multi-valued attributes
//!
//! Only the first email and the first phone number are persisted. Extra
//! entries are logged at `warn` and dropped.

use crate::repositories::user_pager::UserPager;
use crate::repositories::user_row::{USER_FIELDS, decode_rows};
use crate::{
    FilterTranslator, FilterValidator, Result as StoreErrorResult, StoreError, StoreSettings,
    UserStream,
};

use scim_auth::CredentialGuard;
use scim_core::{ScimMeta, ScimUser, UserProfile};

use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, info, warn};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const DEFAULT_ORDER: &str = " ORDER BY created ASC, id ASC";
const ID_TIE_BREAKER: &str = ", id ASC";

#[derive(Clone)]
pub struct ScimUserRepository {
    pool: SqlitePool,
    credentials: CredentialGuard,
    translator: Arc<dyn FilterTranslator>,
    validator: FilterValidator,
    settings: StoreSettings,
}

impl ScimUserRepository {
    pub fn new(
        pool: SqlitePool,
        credentials: CredentialGuard,
        translator: Arc<dyn FilterTranslator>,
        settings: StoreSettings,
    ) -> Self {
        Self {
            pool,
            credentials,
            translator,
            validator: FilterValidator::new(),
            settings,
        }
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings
    }

    pub async fn retrieve(&self, id: Uuid) -> StoreErrorResult<ScimUser> {
        let sql = format!("SELECT {} FROM users WHERE id = ? LIMIT 2", USER_FIELDS);
        let rows = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await?;

        match rows.len() {
            0 => Err(StoreError::not_found(id)),
            1 => decode_rows(&rows)?
                .pop()
                .ok_or_else(|| StoreError::not_found(id)),
            n => Err(StoreError::integrity("retrieve", n as u64)),
        }
    }

    /// Every user, oldest first.
    pub fn list(&self) -> UserStream {
        let sql = format!("SELECT {} FROM users{}", USER_FIELDS, DEFAULT_ORDER);
        UserPager::new(
            self.pool.clone(),
            sql,
            Vec::new(),
            self.settings.page_size,
            None,
        )
        .into_stream()
    }

    /// Users matching `filter`, translated by the injected translator.
    ///
    /// Translation and safety checks run before this returns; engine
    /// rejections of the generated SQL surface from the stream as
    /// `InvalidFilter`.
    pub fn search(
        &self,
        filter: &str,
        sort_by: Option<&str>,
        ascending: bool,
    ) -> StoreErrorResult<UserStream> {
        let processed = self
            .translator
            .convert(filter, sort_by, ascending)
            .map_err(|e| StoreError::invalid_filter(filter, e.message))?;
        debug!("Filtering users with SQL: {}", processed.sql);

        self.validator.validate(filter, &processed.sql)?;

        let mut sql = format!("SELECT {} FROM users WHERE {}", USER_FIELDS, processed.sql);
        if FilterValidator::has_order_by(&processed.sql) {
            // Translator orderings may tie; windows need a total order.
            sql.push_str(ID_TIE_BREAKER);
        } else {
            sql.push_str(DEFAULT_ORDER);
        }
        debug!("complete sql: {}, params: {:?}", sql, processed.params);

        Ok(UserPager::new(
            self.pool.clone(),
            sql,
            processed.params,
            self.settings.page_size,
            Some(filter.to_string()),
        )
        .into_stream())
    }

    pub async fn create(
        &self,
        profile: &UserProfile,
        password: &str,
    ) -> StoreErrorResult<ScimUser> {
        self.credentials.validate(password, profile)?;
        profile.validate()?;
        warn_on_dropped_entries(profile);

        info!("Creating new user: {}", profile.user_name());

        let id = Uuid::new_v4();
        let now = Utc::now().timestamp_millis();
        let password_hash = self.credentials.hash(password)?;

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    id, version, created, lastModified, userName, email,
                    givenName, familyName, active, phoneNumber, password
                ) VALUES (?, 0, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(now)
        .bind(now)
        .bind(profile.user_name())
        .bind(profile.primary_email())
        .bind(profile.name().given_name.as_str())
        .bind(profile.name().family_name.as_str())
        .bind(profile.active())
        .bind(profile.phone_number())
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            return Err(self.classify_write_error(e, profile.user_name()).await);
        }

        self.retrieve(id).await
    }

    /// Write `record`'s profile if the stored version still equals
    /// `record.version()`.
    pub async fn update(&self, id: Uuid, record: &ScimUser) -> StoreErrorResult<ScimUser> {
        let profile = record.profile();
        profile.validate()?;
        warn_on_dropped_entries(profile);

        info!("Updating user {}", profile.user_name());

        let result = sqlx::query(
            r#"
                UPDATE users
                   SET version = ?,
                       lastModified = MAX(?, lastModified + 1),
                       userName = ?,
                       email = ?,
                       givenName = ?,
                       familyName = ?,
                       active = ?,
                       phoneNumber = ?
                 WHERE id = ? AND version = ?
            "#,
        )
        .bind(record.version() + 1)
        .bind(Utc::now().timestamp_millis())
        .bind(profile.user_name())
        .bind(profile.primary_email())
        .bind(profile.name().given_name.as_str())
        .bind(profile.name().family_name.as_str())
        .bind(profile.active())
        .bind(profile.phone_number())
        .bind(id.to_string())
        .bind(record.version())
        .execute(&self.pool)
        .await;

        let updated = match result {
            Ok(done) => done.rows_affected(),
            Err(e) => return Err(self.classify_write_error(e, profile.user_name()).await),
        };

        match updated {
            0 => {
                // Best-effort diagnostic: another writer may move it again.
                let current = self.retrieve(id).await?;
                Err(StoreError::OptimisticLock {
                    id,
                    submitted: record.version(),
                    found: current.version(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            1 => self.retrieve(id).await,
            n => Err(StoreError::integrity("update", n)),
        }
    }

    /// Replace the stored credential. When `old_password` is given it must
    /// match the current hash first. Never changes `version`.
    pub async fn change_password(
        &self,
        id: Uuid,
        old_password: Option<&str>,
        new_password: &str,
    ) -> StoreErrorResult<bool> {
        let user = self.retrieve(id).await?;

        self.credentials.validate(new_password, user.profile())?;
        if let Some(old_password) = old_password {
            let stored = self.read_password_hash(id).await?;
            self.credentials.ensure_matches(old_password, &stored)?;
        }

        info!("Changing password for user {}", id);

        let password_hash = self.credentials.hash(new_password)?;
        let updated = sqlx::query(
            r#"
                UPDATE users
                   SET lastModified = MAX(?, lastModified + 1),
                       password = ?
                 WHERE id = ?
            "#,
        )
        .bind(Utc::now().timestamp_millis())
        .bind(password_hash)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        match updated {
            0 => Err(StoreError::not_found(id)),
            1 => Ok(true),
            n => Err(StoreError::integrity("change_password", n)),
        }
    }

    /// Deactivate or delete, per [`StoreSettings::deactivate_on_delete`].
    ///
    /// A negative `version` skips the concurrency check.
    pub async fn remove(&self, id: Uuid, version: i64) -> StoreErrorResult<ScimUser> {
        let user = self.retrieve(id).await?;

        if self.settings.deactivate_on_delete {
            self.deactivate(user, version).await
        } else {
            self.delete(user, version).await
        }
    }

    /// Id of an inactive account holding `user_name`, if any.
    pub async fn find_inactive_id(&self, user_name: &str) -> StoreErrorResult<Option<Uuid>> {
        let row = sqlx::query("SELECT id FROM users WHERE userName = ? AND active = 0")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| -> StoreErrorResult<Uuid> {
            let id: String = r
                .try_get("id")
                .map_err(|e| StoreError::row_decode("id", e.to_string()))?;
            Uuid::parse_str(&id).map_err(|e| StoreError::row_decode("id", e.to_string()))
        })
        .transpose()
    }

    async fn deactivate(&self, user: ScimUser, version: i64) -> StoreErrorResult<ScimUser> {
        info!("Deactivating user: {}", user.id());

        let mut sql = String::from(
            r#"
                UPDATE users
                   SET active = 0,
                       version = version + 1,
                       lastModified = MAX(?, lastModified + 1)
                 WHERE id = ?"#,
        );
        if version >= 0 {
            sql.push_str(" AND version = ?");
        }
        sql.push_str(" RETURNING version, lastModified");

        let mut query = sqlx::query(&sql)
            .bind(Utc::now().timestamp_millis())
            .bind(user.id().to_string());
        if version >= 0 {
            query = query.bind(version);
        }
        let rows = query.fetch_all(&self.pool).await?;

        match rows.len() {
            0 => Err(self.removal_conflict(&user, version)),
            1 => {
                let row = &rows[0];
                let new_version: i64 = row
                    .try_get("version")
                    .map_err(|e| StoreError::row_decode("version", e.to_string()))?;
                let last_modified: i64 = row
                    .try_get("lastModified")
                    .map_err(|e| StoreError::row_decode("lastModified", e.to_string()))?;
                let last_modified = DateTime::<Utc>::from_timestamp_millis(last_modified)
                    .ok_or_else(|| {
                        StoreError::row_decode("lastModified", "timestamp out of range")
                    })?;

                let meta = ScimMeta {
                    version: new_version,
                    created: user.created(),
                    last_modified,
                };
                Ok(user.deactivated(meta))
            }
            n => Err(StoreError::integrity("deactivate", n as u64)),
        }
    }

    async fn delete(&self, user: ScimUser, version: i64) -> StoreErrorResult<ScimUser> {
        info!("Deleting user: {}", user.id());

        let result = if version < 0 {
            sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(user.id().to_string())
                .execute(&self.pool)
                .await?
        } else {
            sqlx::query("DELETE FROM users WHERE id = ? AND version = ?")
                .bind(user.id().to_string())
                .bind(version)
                .execute(&self.pool)
                .await?
        };

        match result.rows_affected() {
            0 => Err(self.removal_conflict(&user, version)),
            1 => Ok(user),
            n => Err(StoreError::integrity("delete", n)),
        }
    }

    /// Zero rows matched a removal. With the version check bypassed the row
    /// must have vanished since it was read.
    #[track_caller]
    fn removal_conflict(&self, user: &ScimUser, version: i64) -> StoreError {
        if version < 0 {
            StoreError::not_found(user.id())
        } else {
            StoreError::OptimisticLock {
                id: user.id(),
                submitted: version,
                found: user.version(),
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }

    async fn read_password_hash(&self, id: Uuid) -> StoreErrorResult<String> {
        let rows = sqlx::query("SELECT password FROM users WHERE id = ? LIMIT 2")
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await?;

        match rows.len() {
            0 => Err(StoreError::not_found(id)),
            1 => rows[0]
                .try_get("password")
                .map_err(|e| StoreError::row_decode("password", e.to_string())),
            n => Err(StoreError::integrity("read_password", n as u64)),
        }
    }

    /// Uniqueness violations become `AlreadyExists`; the engine's own
    /// message is not passed on.
    async fn classify_write_error(&self, error: sqlx::Error, user_name: &str) -> StoreError {
        let unique_violation = matches!(
            &error,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation()
        );
        if !unique_violation {
            return StoreError::from(error);
        }

        let inactive_id = match self.find_inactive_id(user_name).await {
            Ok(inactive_id) => inactive_id,
            Err(e) => {
                debug!("Inactive account lookup for {} failed: {}", user_name, e);
                None
            }
        };

        StoreError::AlreadyExists {
            user_name: user_name.to_string(),
            inactive_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

fn warn_on_dropped_entries(profile: &UserProfile) {
    if profile.emails().len() > 1 {
        warn!(
            "User {}: only the primary email is stored, dropping {} more",
            profile.user_name(),
            profile.emails().len() - 1
        );
    }
    if profile.phone_numbers().len() > 1 {
        warn!(
            "User {}: only the first phone number is stored, dropping {} more",
            profile.user_name(),
            profile.phone_numbers().len() - 1
        );
    }
}

impl std::fmt::Debug for ScimUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScimUserRepository")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
