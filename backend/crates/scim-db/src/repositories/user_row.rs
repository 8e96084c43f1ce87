//! Typed decoding of `users` rows into [`ScimUser`] values.

use crate::{Result, StoreError};

use scim_core::{ScimMeta, ScimUser, UserProfile};

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Decode, Row, Sqlite, Type};
use uuid::Uuid;

/// Column order shared by every `SELECT` that feeds [`decode_rows`].
pub(crate) const USER_COLUMNS: [&str; 10] = [
    "id",
    "version",
    "created",
    "lastModified",
    "userName",
    "email",
    "givenName",
    "familyName",
    "active",
    "phoneNumber",
];

pub(crate) const USER_FIELDS: &str =
    "id, version, created, lastModified, userName, email, givenName, familyName, active, phoneNumber";

/// Decode a batch, checking the column set once against [`USER_COLUMNS`].
pub(crate) fn decode_rows(rows: &[SqliteRow]) -> Result<Vec<ScimUser>> {
    if let Some(first) = rows.first() {
        verify_columns(first)?;
    }

    rows.iter().map(decode_user).collect()
}

fn verify_columns(row: &SqliteRow) -> Result<()> {
    let columns = row.columns();
    if columns.len() != USER_COLUMNS.len() {
        return Err(StoreError::row_decode(
            "*",
            format!(
                "expected {} columns, got {}",
                USER_COLUMNS.len(),
                columns.len()
            ),
        ));
    }

    for (column, expected) in columns.iter().zip(USER_COLUMNS) {
        if !column.name().eq_ignore_ascii_case(expected) {
            return Err(StoreError::row_decode(
                expected,
                format!("found column '{}' in its position", column.name()),
            ));
        }
    }

    Ok(())
}

pub(crate) fn decode_user(row: &SqliteRow) -> Result<ScimUser> {
    let id: String = column(row, "id")?;
    let id = Uuid::parse_str(&id).map_err(|e| StoreError::row_decode("id", e.to_string()))?;

    let meta = ScimMeta {
        version: column(row, "version")?,
        created: timestamp(column(row, "created")?, "created")?,
        last_modified: timestamp(column(row, "lastModified")?, "lastModified")?,
    };

    let phone_number: Option<String> = column(row, "phoneNumber")?;
    let mut builder = UserProfile::builder()
        .user_name(column::<String>(row, "userName")?)
        .email(column::<String>(row, "email")?)
        .given_name(column::<String>(row, "givenName")?)
        .family_name(column::<String>(row, "familyName")?)
        .active(column(row, "active")?);
    if let Some(phone_number) = phone_number {
        builder = builder.phone_number(phone_number);
    }
    let profile = builder
        .build()
        .map_err(|e| StoreError::row_decode("userName", e.to_string()))?;

    Ok(ScimUser::new(id, meta, profile))
}

fn column<'r, T>(row: &'r SqliteRow, name: &'static str) -> Result<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| StoreError::row_decode(name, e.to_string()))
}

fn timestamp(millis: i64, name: &'static str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::row_decode(name, format!("{} is out of range", millis)))
}
