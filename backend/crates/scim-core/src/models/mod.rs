pub mod name;
pub mod scim_meta;
pub mod scim_user;
pub mod user_profile;
