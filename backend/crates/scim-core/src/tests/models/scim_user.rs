use crate::{ScimMeta, ScimUser, UserProfile};

use chrono::{Duration, Utc};
use googletest::prelude::*;
use uuid::Uuid;

fn persisted_user() -> ScimUser {
    let now = Utc::now();
    let profile = UserProfile::builder()
        .user_name("marissa")
        .name("Marissa", "Bloggs")
        .email("marissa@test.org")
        .build()
        .unwrap();
    ScimUser::new(
        Uuid::new_v4(),
        ScimMeta {
            version: 3,
            created: now,
            last_modified: now,
        },
        profile,
    )
}

#[test]
fn given_user_when_profile_replaced_then_id_and_version_kept() {
    let user = persisted_user();
    let profile = user.profile().to_builder().given_name("Mary").build().unwrap();

    let changed = user.with_profile(profile);

    assert_that!(changed.id(), eq(user.id()));
    assert_that!(changed.version(), eq(3));
    assert_that!(changed.name().given_name, eq("Mary"));
}

#[test]
fn given_user_when_deactivated_then_meta_replaced_and_inactive() {
    let user = persisted_user();
    let meta = ScimMeta {
        version: user.version() + 1,
        created: user.created(),
        last_modified: user.last_modified() + Duration::milliseconds(1),
    };

    let inactive = user.clone().deactivated(meta);

    assert_that!(inactive.active(), eq(false));
    assert_that!(inactive.version(), eq(4));
    assert_that!(inactive.id(), eq(user.id()));
    assert!(inactive.last_modified() > user.last_modified());
}

#[test]
fn given_user_when_serialized_then_profile_fields_are_flattened() {
    let user = persisted_user();

    let value = serde_json::to_value(&user).unwrap();

    assert_that!(value["userName"].as_str(), some(eq("marissa")));
    assert_that!(value["meta"]["version"].as_i64(), some(eq(3)));
}
