pub mod filter_param;
pub mod filter_translator;
pub mod filter_validator;
