//! Contract for the external filter-language translator.
//!
//! The store never parses filter text itself. A translator turns it into a
//! SQL predicate over the `users` columns plus the values for its `?`
//! placeholders. The predicate may end with an `ORDER BY` clause when a sort
//! attribute was requested; the store appends `, id ASC` to it.

use crate::FilterParam;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFilter {
    pub sql: String,
    pub params: Vec<FilterParam>,
}

impl ProcessedFilter {
    pub fn new(sql: impl Into<String>, params: Vec<FilterParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FilterTranslationError {
    pub message: String,
}

impl FilterTranslationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait FilterTranslator: Send + Sync {
    fn convert(
        &self,
        filter: &str,
        sort_by: Option<&str>,
        ascending: bool,
    ) -> std::result::Result<ProcessedFilter, FilterTranslationError>;
}
