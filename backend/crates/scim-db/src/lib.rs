pub mod connection;
pub mod error;
pub mod filter;
pub mod repositories;


pub use connection::user_database::UserDatabase;
pub use error::{Result, StoreError};
pub use filter::filter_param::FilterParam;
pub use filter::filter_translator::{FilterTranslationError, FilterTranslator, ProcessedFilter};
pub use filter::filter_validator::FilterValidator;
pub use repositories::scim_user_repository::ScimUserRepository;
pub use repositories::store_settings::{DEFAULT_PAGE_SIZE, StoreSettings};
pub use repositories::user_pager::UserStream;
