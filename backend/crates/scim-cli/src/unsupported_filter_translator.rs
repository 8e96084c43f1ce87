use scim_db::{FilterTranslationError, FilterTranslator, ProcessedFilter};

/// Stands in for a filter grammar the admin tool does not ship.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFilterTranslator;

impl FilterTranslator for UnsupportedFilterTranslator {
    fn convert(
        &self,
        filter: &str,
        _sort_by: Option<&str>,
        _ascending: bool,
    ) -> Result<ProcessedFilter, FilterTranslationError> {
        Err(FilterTranslationError::new(format!(
            "filter expressions are not supported by scim-admin: '{}'",
            filter
        )))
    }
}
