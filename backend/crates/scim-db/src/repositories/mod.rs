pub mod scim_user_repository;
pub mod store_settings;
pub mod user_pager;
pub(crate) mod user_row;
