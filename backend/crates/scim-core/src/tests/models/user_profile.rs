use crate::{CoreError, UserProfile};

use googletest::prelude::*;

fn valid_builder() -> crate::UserProfileBuilder {
    UserProfile::builder()
        .user_name("jo.bloggs+test@example.com")
        .name("Jo", "Bloggs")
        .email("jo@example.com")
}

#[test]
fn given_all_required_fields_when_built_then_profile_is_active_by_default() {
    let profile = valid_builder().build().unwrap();

    assert_that!(profile.user_name(), eq("jo.bloggs+test@example.com"));
    assert_that!(profile.primary_email(), eq("jo@example.com"));
    assert_that!(profile.name().given_name, eq("Jo"));
    assert_that!(profile.name().family_name, eq("Bloggs"));
    assert_that!(profile.active(), eq(true));
    assert_that!(profile.phone_number(), none());
}

#[test]
fn given_upper_case_user_name_when_built_then_invalid_user_name() {
    let result = valid_builder().user_name("JoBloggs").build();

    assert!(matches!(result, Err(CoreError::InvalidUserName { .. })));
}

#[test]
fn given_user_name_with_space_when_built_then_invalid_user_name() {
    let result = valid_builder().user_name("jo bloggs").build();

    assert!(matches!(result, Err(CoreError::InvalidUserName { .. })));
}

#[test]
fn given_empty_user_name_when_built_then_invalid_user_name() {
    let result = UserProfile::builder()
        .name("Jo", "Bloggs")
        .email("jo@example.com")
        .build();

    assert!(matches!(result, Err(CoreError::InvalidUserName { .. })));
}

#[test]
fn given_every_allowed_symbol_when_built_then_accepted() {
    let result = valid_builder().user_name("a-b_c.d+e@f9").build();

    assert_that!(result, ok(anything()));
}

#[test]
fn given_no_email_when_built_then_missing_email() {
    let result = UserProfile::builder()
        .user_name("jo")
        .name("Jo", "Bloggs")
        .build();

    assert!(matches!(result, Err(CoreError::MissingEmail { .. })));
}

#[test]
fn given_blank_primary_email_when_built_then_missing_email() {
    let result = UserProfile::builder()
        .user_name("jo")
        .name("Jo", "Bloggs")
        .email("  ")
        .email("second@example.com")
        .build();

    assert!(matches!(result, Err(CoreError::MissingEmail { .. })));
}

#[test]
fn given_missing_family_name_when_built_then_missing_name() {
    let result = UserProfile::builder()
        .user_name("jo")
        .given_name("Jo")
        .email("jo@example.com")
        .build();

    assert!(matches!(result, Err(CoreError::MissingName { .. })));
}

#[test]
fn given_several_emails_and_phones_when_built_then_first_entries_are_primary() {
    let profile = valid_builder()
        .email("other@example.com")
        .phone_number("+44 1234")
        .phone_number("+44 5678")
        .build()
        .unwrap();

    assert_that!(profile.primary_email(), eq("jo@example.com"));
    assert_that!(profile.emails().len(), eq(2));
    assert_that!(profile.phone_number(), some(eq("+44 1234")));
}

#[test]
fn given_profile_when_rebuilt_from_to_builder_then_equal() {
    let profile = valid_builder().phone_number("555").active(false).build().unwrap();

    let rebuilt = profile.to_builder().build().unwrap();

    assert_that!(rebuilt, eq(&profile));
}

#[test]
fn given_deserialized_invalid_profile_when_validated_then_rejected() {
    let json = r#"{"userName":"Not Valid","name":{"givenName":"A","familyName":"B"},"emails":["a@b.c"]}"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();

    let result = profile.validate();

    assert!(matches!(result, Err(CoreError::InvalidUserName { .. })));
}

#[test]
fn given_profile_when_deactivated_then_only_active_flag_changes() {
    let profile = valid_builder().build().unwrap();

    let inactive = profile.deactivated();

    assert_that!(inactive.active(), eq(false));
    assert_that!(inactive.user_name(), eq(profile.user_name()));
}
