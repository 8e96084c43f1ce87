//! Safety checks applied to translated filter fragments before execution.

use crate::{Result, StoreError};

use std::sync::LazyLock;

use regex::Regex;

/// `field = token` where the token is neither a quoted literal nor a `?` placeholder.
static UNQUOTED_EQ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(id|username|email|givenname|familyname)\s*=\s*[^'?\s]")
        .expect("UNQUOTED_EQ is a valid regex")
});

static MULTI_VALUED_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(emails|phonenumbers)\.([a-z_][a-z0-9_]*)")
        .expect("MULTI_VALUED_ATTRIBUTE is a valid regex")
});

/// A single-quoted SQL literal, with `''` as the escaped quote.
static QUOTED_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'").expect("QUOTED_LITERAL is a valid regex"));

static ORDER_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\border\s+by\b").expect("ORDER_BY is a valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterValidator;

impl FilterValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check a rendered fragment. `filter` is the caller's original text and
    /// only appears in error messages.
    #[track_caller]
    pub fn validate(&self, filter: &str, fragment: &str) -> Result<()> {
        // Literal contents are data, not structure.
        let structure = QUOTED_LITERAL.replace_all(fragment, "''");

        if UNQUOTED_EQ.is_match(&structure) {
            return Err(StoreError::invalid_filter(
                filter,
                "Eq argument in filter must be quoted",
            ));
        }

        for captures in MULTI_VALUED_ATTRIBUTE.captures_iter(&structure) {
            let attribute = &captures[1];
            let sub_attribute = &captures[2];
            if sub_attribute.eq_ignore_ascii_case("value") {
                continue;
            }

            let message = if attribute.eq_ignore_ascii_case("emails") {
                "Filters on email address fields other than 'value' not supported"
            } else {
                "Filters on phone number fields other than 'value' not supported"
            };
            return Err(StoreError::unsupported_filter(filter, message));
        }

        Ok(())
    }

    /// Whether the fragment already carries its own ordering.
    pub fn has_order_by(fragment: &str) -> bool {
        ORDER_BY.is_match(&QUOTED_LITERAL.replace_all(fragment, "''"))
    }
}
