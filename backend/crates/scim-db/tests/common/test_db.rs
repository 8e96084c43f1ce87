use super::fixtures::{EqTranslator, PlainHasher};

use scim_auth::{CredentialGuard, LengthPasswordPolicy};
use scim_db::{FilterTranslator, ScimUserRepository, StoreSettings, UserDatabase};

use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    UserDatabase::open_in_memory()
        .await
        .expect("Failed to create test pool")
}

/// Policy and hasher cheap enough for bulk inserts
pub fn test_credentials() -> CredentialGuard {
    CredentialGuard::new(
        Arc::new(LengthPasswordPolicy::default()),
        Arc::new(PlainHasher),
    )
}

pub fn create_test_repository(pool: SqlitePool) -> ScimUserRepository {
    create_test_repository_with(pool, StoreSettings::default(), Arc::new(EqTranslator))
}

pub fn create_test_repository_with(
    pool: SqlitePool,
    settings: StoreSettings,
    translator: Arc<dyn FilterTranslator>,
) -> ScimUserRepository {
    ScimUserRepository::new(pool, test_credentials(), translator, settings)
}

/// Reads the stored credential directly; the repository never exposes it
pub async fn stored_password(pool: &SqlitePool, id: Uuid) -> String {
    sqlx::query_scalar("SELECT password FROM users WHERE id = ?")
        .bind(id.to_string())
        .fetch_one(pool)
        .await
        .expect("Failed to read password")
}
