use scim_auth::{AuthError, CredentialHasher};
use scim_core::UserProfile;
use scim_db::{FilterParam, FilterTranslationError, FilterTranslator, ProcessedFilter};

pub const TEST_PASSWORD: &str = "correct horse";

/// Creates a valid profile whose email and names derive from `user_name`
pub fn create_test_profile(user_name: &str) -> UserProfile {
    UserProfile::builder()
        .user_name(user_name)
        .name("Test", format!("User {}", user_name))
        .email(format!("{}@example.com", user_name))
        .build()
        .expect("Failed to build test profile")
}

/// Reversible stand-in for a real hasher so bulk tests stay fast
pub struct PlainHasher;

const PLAIN_PREFIX: &str = "plain$";

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> scim_auth::Result<String> {
        Ok(format!("{}{}", PLAIN_PREFIX, plaintext))
    }

    fn verify(&self, plaintext: &str, stored: &str) -> scim_auth::Result<bool> {
        match stored.strip_prefix(PLAIN_PREFIX) {
            Some(expected) => Ok(expected == plaintext),
            None => Err(AuthError::hashing("not a plain hash")),
        }
    }
}

/// Understands `<column> eq "<value>"` joined by ` and `.
pub struct EqTranslator;

impl FilterTranslator for EqTranslator {
    fn convert(
        &self,
        filter: &str,
        sort_by: Option<&str>,
        ascending: bool,
    ) -> Result<ProcessedFilter, FilterTranslationError> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        for term in filter.split(" and ") {
            let (column, value) = term
                .split_once(" eq ")
                .ok_or_else(|| FilterTranslationError::new(format!("cannot parse '{}'", term)))?;
            let value = value
                .trim()
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .ok_or_else(|| FilterTranslationError::new("value must be a string literal"))?;

            clauses.push(format!("{} = ?", column.trim()));
            params.push(FilterParam::from(value));
        }

        let mut sql = clauses.join(" AND ");
        if let Some(sort_by) = sort_by {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                sort_by,
                if ascending { "ASC" } else { "DESC" }
            ));
        }

        Ok(ProcessedFilter::new(sql, params))
    }
}

/// Hands the filter text straight through as SQL.
pub struct PassthroughTranslator;

impl FilterTranslator for PassthroughTranslator {
    fn convert(
        &self,
        filter: &str,
        _sort_by: Option<&str>,
        _ascending: bool,
    ) -> Result<ProcessedFilter, FilterTranslationError> {
        Ok(ProcessedFilter::new(filter, Vec::new()))
    }
}

pub struct RejectingTranslator;

impl FilterTranslator for RejectingTranslator {
    fn convert(
        &self,
        _filter: &str,
        _sort_by: Option<&str>,
        _ascending: bool,
    ) -> Result<ProcessedFilter, FilterTranslationError> {
        Err(FilterTranslationError::new("filter syntax not recognised"))
    }
}
