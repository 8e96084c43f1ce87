/// Rows fetched per window when listing or searching.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Store-wide switches fixed when the repository is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// `true`: `remove` marks the user inactive. `false`: the row is deleted.
    pub deactivate_on_delete: bool,
    pub page_size: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            deactivate_on_delete: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
