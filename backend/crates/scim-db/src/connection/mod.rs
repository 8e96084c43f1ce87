pub mod user_database;
