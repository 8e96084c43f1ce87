
use crate::{Admin, UnsupportedFilterTranslator};

use scim_auth::{Argon2Hasher, CredentialGuard, LengthPasswordPolicy};
use scim_db::{ScimUserRepository, StoreSettings, UserDatabase};

use std::sync::Arc;

/// Admin over a fresh in-memory store, hashing with minimal Argon2 cost.
pub(crate) async fn test_admin(settings: StoreSettings) -> Admin {
    let pool = UserDatabase::open_in_memory().await.unwrap();
    let credentials = CredentialGuard::new(
        Arc::new(LengthPasswordPolicy::default()),
        Arc::new(Argon2Hasher::new(8, 1, 1).unwrap()),
    );

    Admin::new(ScimUserRepository::new(
        pool,
        credentials,
        Arc::new(UnsupportedFilterTranslator),
        settings,
    ))
}
