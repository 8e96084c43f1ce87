mod scim_user;
mod user_profile;
