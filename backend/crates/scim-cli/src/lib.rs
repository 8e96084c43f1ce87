//! scim-cli library
//!
//! Exports the administrative facade over the user store for the
//! `scim-admin` binary and its tests.

pub mod admin;
pub mod error;
pub mod logger;
pub mod unsupported_filter_translator;

#[cfg(test)]
mod tests;

pub use admin::Admin;
pub use error::{CliError, Result};
pub use unsupported_filter_translator::UnsupportedFilterTranslator;
