pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::name::Name;
pub use models::scim_meta::ScimMeta;
pub use models::scim_user::ScimUser;
pub use models::user_profile::{USER_NAME_PATTERN, UserProfile, UserProfileBuilder};
