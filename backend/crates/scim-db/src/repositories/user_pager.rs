//! Windowed reads over the `users` table.
//!
//! Each window is an independent `LIMIT ? OFFSET ?` query issued when the
//! consumer polls past the previous one. Nothing is held open between
//! windows, so concurrent writers can shift rows across a boundary; the
//! stream trades snapshot consistency for bounded memory. Restarting means
//! calling `list`/`search` again.

use crate::repositories::user_row::decode_rows;
use crate::{FilterParam, Result, StoreError};

use scim_core::ScimUser;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use log::debug;
use sqlx::SqlitePool;

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

pub type UserStream = BoxStream<'static, Result<ScimUser>>;

/// Pager, next offset, and whether the last window came back short.
type PagerState = (UserPager, i64, bool);

pub(crate) struct UserPager {
    pool: SqlitePool,
    sql: String,
    params: Vec<FilterParam>,
    page_size: u32,
    /// Caller's filter text, present for searches
    filter: Option<String>,
}

impl UserPager {
    pub(crate) fn new(
        pool: SqlitePool,
        sql: String,
        params: Vec<FilterParam>,
        page_size: u32,
        filter: Option<String>,
    ) -> Self {
        Self {
            pool,
            sql,
            params,
            page_size: page_size.max(1),
            filter,
        }
    }

    pub(crate) fn into_stream(self) -> UserStream {
        stream::try_unfold((self, 0, false), next_window)
            .map_ok(|page| stream::iter(page.into_iter().map(Ok::<ScimUser, StoreError>)))
            .try_flatten()
            .boxed()
    }

    async fn fetch_page(&self, offset: i64) -> Result<Vec<ScimUser>> {
        let sql = format!("{} LIMIT ? OFFSET ?", self.sql);
        debug!("Fetching users window offset={} size={}", offset, self.page_size);

        let mut query = sqlx::query(&sql);
        for param in &self.params {
            query = param.bind_to(query);
        }

        let rows = query
            .bind(i64::from(self.page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.classify(e))?;

        decode_rows(&rows)
    }

    #[track_caller]
    fn classify(&self, error: sqlx::Error) -> StoreError {
        match &self.filter {
            Some(filter) => classify_search_error(filter, error),
            None => StoreError::from(error),
        }
    }
}

/// Engine rejections of a search's generated SQL are the filter's fault.
/// Lock contention and everything outside the engine are storage failures.
#[track_caller]
pub(crate) fn classify_search_error(filter: &str, error: sqlx::Error) -> StoreError {
    let rejected_sql = match &error {
        sqlx::Error::Database(db_error) => !is_contention(db_error.code().as_deref()),
        _ => false,
    };

    if rejected_sql {
        debug!("Filter '{}' generated invalid SQL: {}", filter, error);
        StoreError::invalid_filter(filter, "filter could not be executed")
    } else {
        StoreError::from(error)
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes.
fn is_contention(code: Option<&str>) -> bool {
    code.and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

async fn next_window(
    (pager, offset, exhausted): PagerState,
) -> Result<Option<(Vec<ScimUser>, PagerState)>> {
    if exhausted {
        return Ok(None);
    }

    let page = pager.fetch_page(offset).await?;
    if page.is_empty() {
        return Ok(None);
    }

    let fetched = page.len() as i64;
    let exhausted = fetched < i64::from(pager.page_size);
    Ok(Some((page, (pager, offset + fetched, exhausted))))
}
