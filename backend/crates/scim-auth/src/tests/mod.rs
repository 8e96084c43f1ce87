
use scim_core::UserProfile;

pub(crate) fn test_profile(user_name: &str) -> UserProfile {
    UserProfile::builder()
        .user_name(user_name)
        .name("Test", "User")
        .email(format!("{}@example.com", user_name))
        .build()
        .unwrap()
}

/// Argon2 with the smallest legal cost so tests stay fast.
pub(crate) fn cheap_argon2() -> crate::Argon2Hasher {
    crate::Argon2Hasher::new(8, 1, 1).unwrap()
}
