mod common;

use common::{TEST_PASSWORD, create_test_pool, create_test_profile, create_test_repository};

use scim_core::{Name, UserProfile};
use scim_db::StoreError;

use futures::TryStreamExt;
use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_valid_profile_when_created_then_can_be_retrieved() {
    // Given: An empty store
    let repo = create_test_repository(create_test_pool().await);
    let profile = create_test_profile("bjensen");

    // When: Creating the user
    let created = repo.create(&profile, TEST_PASSWORD).await.unwrap();

    // Then: The stored record matches and starts at version 0
    assert_that!(created.version(), eq(0));
    assert_that!(created.active(), eq(true));
    assert_that!(created.created(), eq(created.last_modified()));

    let found = repo.retrieve(created.id()).await.unwrap();
    assert_that!(found, eq(&created));
    assert_that!(found.user_name(), eq("bjensen"));
    assert_that!(found.primary_email(), eq("bjensen@example.com"));
    assert_that!(found.name(), eq(&Name::new("Test", "User bjensen")));
    assert_that!(found.phone_number(), none());
}

#[tokio::test]
async fn given_profile_with_phone_when_created_then_phone_is_stored() {
    let repo = create_test_repository(create_test_pool().await);
    let profile = create_test_profile("phoned")
        .to_builder()
        .phone_number("+1 555 0100")
        .build()
        .unwrap();

    let created = repo.create(&profile, TEST_PASSWORD).await.unwrap();

    assert_that!(created.phone_number(), some(eq("+1 555 0100")));
}

#[tokio::test]
async fn given_profile_with_several_emails_when_created_then_only_primary_is_kept() {
    let repo = create_test_repository(create_test_pool().await);
    let profile = UserProfile::builder()
        .user_name("multi")
        .name("Multi", "Mail")
        .email("first@example.com")
        .email("second@example.com")
        .phone_number("111")
        .phone_number("222")
        .build()
        .unwrap();

    let created = repo.create(&profile, TEST_PASSWORD).await.unwrap();

    assert_that!(created.profile().emails().len(), eq(1));
    assert_that!(created.primary_email(), eq("first@example.com"));
    assert_that!(created.phone_number(), some(eq("111")));
}

#[tokio::test]
async fn given_unknown_id_when_retrieved_then_not_found() {
    let repo = create_test_repository(create_test_pool().await);
    let id = Uuid::new_v4();

    let result = repo.retrieve(id).await;

    match result {
        Err(StoreError::NotFound { id: missing, .. }) => assert_that!(missing, eq(id)),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn given_taken_user_name_when_created_then_already_exists() {
    // Given: An active user holding the name
    let repo = create_test_repository(create_test_pool().await);
    repo.create(&create_test_profile("taken"), TEST_PASSWORD)
        .await
        .unwrap();

    // When: Creating another user with the same name
    let result = repo.create(&create_test_profile("taken"), TEST_PASSWORD).await;

    // Then: Rejected, with no inactive account to point at
    match result {
        Err(StoreError::AlreadyExists {
            user_name,
            inactive_id,
            ..
        }) => {
            assert_that!(user_name, eq("taken"));
            assert!(inactive_id.is_none());
        }
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
}

#[tokio::test]
async fn given_deactivated_holder_when_name_reused_then_inactive_id_reported() {
    let repo = create_test_repository(create_test_pool().await);
    let original = repo
        .create(&create_test_profile("retired"), TEST_PASSWORD)
        .await
        .unwrap();
    repo.remove(original.id(), original.version()).await.unwrap();

    let result = repo
        .create(&create_test_profile("retired"), TEST_PASSWORD)
        .await;

    match result {
        Err(StoreError::AlreadyExists { inactive_id, .. }) => {
            assert_that!(inactive_id, some(eq(original.id())));
        }
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
}

#[tokio::test]
async fn given_weak_password_when_created_then_rejected_and_nothing_stored() {
    let repo = create_test_repository(create_test_pool().await);

    let result = repo.create(&create_test_profile("weakling"), "abc").await;

    assert!(matches!(result, Err(StoreError::WeakCredential { .. })));
    let stored: Vec<_> = repo.list().try_collect().await.unwrap();
    assert_that!(stored, is_empty());
}

#[tokio::test]
async fn given_password_equal_to_user_name_when_created_then_rejected() {
    let repo = create_test_repository(create_test_pool().await);

    let result = repo
        .create(&create_test_profile("samesame"), "SameSame")
        .await;

    assert!(matches!(result, Err(StoreError::WeakCredential { .. })));
}

#[tokio::test]
async fn given_current_version_when_updated_then_changes_persist_and_version_advances() {
    // Given: A stored user
    let repo = create_test_repository(create_test_pool().await);
    let created = repo
        .create(&create_test_profile("editor"), TEST_PASSWORD)
        .await
        .unwrap();

    // When: Updating names and email with the current version
    let profile = created
        .profile()
        .to_builder()
        .name("Edited", "Person")
        .emails(vec!["edited@example.com".to_string()])
        .build()
        .unwrap();
    let updated = repo
        .update(created.id(), &created.with_profile(profile))
        .await
        .unwrap();

    // Then: Content changed, version bumped, timestamps behave
    assert_that!(updated.version(), eq(created.version() + 1));
    assert_that!(updated.name(), eq(&Name::new("Edited", "Person")));
    assert_that!(updated.primary_email(), eq("edited@example.com"));
    assert_that!(updated.created(), eq(created.created()));
    assert_that!(updated.last_modified(), gt(created.last_modified()));
}

#[tokio::test]
async fn given_stale_version_when_updated_then_optimistic_lock_with_both_versions() {
    let repo = create_test_repository(create_test_pool().await);
    let created = repo
        .create(&create_test_profile("racer"), TEST_PASSWORD)
        .await
        .unwrap();
    let first = repo
        .update(created.id(), &created.with_profile(created.profile().clone()))
        .await
        .unwrap();

    // Second writer still holds version 0
    let result = repo
        .update(created.id(), &created.with_profile(created.profile().clone()))
        .await;

    match result {
        Err(StoreError::OptimisticLock {
            submitted, found, ..
        }) => {
            assert_that!(submitted, eq(0));
            assert_that!(found, eq(first.version()));
        }
        other => panic!("expected OptimisticLock, got {:?}", other),
    }
    let stored = repo.retrieve(created.id()).await.unwrap();
    assert_that!(stored, eq(&first));
}

#[tokio::test]
async fn given_unknown_id_when_updated_then_not_found() {
    let repo = create_test_repository(create_test_pool().await);
    let created = repo
        .create(&create_test_profile("ghost"), TEST_PASSWORD)
        .await
        .unwrap();

    let result = repo.update(Uuid::new_v4(), &created).await;

    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn given_name_of_other_user_when_updated_then_already_exists() {
    let repo = create_test_repository(create_test_pool().await);
    repo.create(&create_test_profile("first"), TEST_PASSWORD)
        .await
        .unwrap();
    let second = repo
        .create(&create_test_profile("second"), TEST_PASSWORD)
        .await
        .unwrap();

    let renamed = second
        .profile()
        .to_builder()
        .user_name("first")
        .build()
        .unwrap();
    let result = repo
        .update(second.id(), &second.with_profile(renamed))
        .await;

    assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
    let stored = repo.retrieve(second.id()).await.unwrap();
    assert_that!(stored.version(), eq(second.version()));
}

#[tokio::test]
async fn given_reactivation_when_updated_then_user_is_active_again() {
    let repo = create_test_repository(create_test_pool().await);
    let created = repo
        .create(&create_test_profile("phoenix"), TEST_PASSWORD)
        .await
        .unwrap();
    let removed = repo.remove(created.id(), created.version()).await.unwrap();

    let revived = removed.profile().to_builder().active(true).build().unwrap();
    let updated = repo
        .update(removed.id(), &removed.with_profile(revived))
        .await
        .unwrap();

    assert_that!(updated.active(), eq(true));
    assert_that!(updated.version(), eq(removed.version() + 1));
}
