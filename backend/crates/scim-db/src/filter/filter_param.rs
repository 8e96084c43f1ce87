use chrono::{DateTime, Utc};
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// A value bound to a placeholder in a translated filter fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterParam {
    Text(String),
    Integer(i64),
    Boolean(bool),
    /// Bound as epoch milliseconds to match the `created`/`lastModified` columns
    Timestamp(DateTime<Utc>),
}

impl FilterParam {
    pub(crate) fn bind_to<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Self::Text(value) => query.bind(value.clone()),
            Self::Integer(value) => query.bind(*value),
            Self::Boolean(value) => query.bind(*value),
            Self::Timestamp(value) => query.bind(value.timestamp_millis()),
        }
    }
}

impl From<&str> for FilterParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterParam {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FilterParam {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}
