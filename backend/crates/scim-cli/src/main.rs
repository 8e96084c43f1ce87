//! scim-admin - SCIM user store administration
//!
//! Reads configuration from `$SCIM_CONFIG_DIR/config.toml` (default
//! `./.scim/`) and prints results as JSON on stdout. Logs go to stderr or the
//! configured log file.
//!
//! # Examples
//!
//! ```bash
//! # Create a user
//! scim-admin user create --user-name bjensen --given-name Barbara \
//!     --family-name Jensen --email bjensen@example.com --password 'correct horse'
//!
//! # List everyone
//! scim-admin user list --pretty
//!
//! # Deactivate, checking the version
//! scim-admin user remove <id> --version 2
//! ```

mod cli;
mod commands;
mod user_commands;

use crate::{cli::Cli, commands::Commands, user_commands::UserCommands};

use scim_cli::admin::ProfileChanges;
use scim_cli::{Admin, Result as CliErrorResult, logger};
use scim_config::Config;
use scim_db::UserDatabase;

use std::process::ExitCode;

use clap::Parser;
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli.command).await;

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> CliErrorResult<Value> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    match command {
        Commands::Init => init_database(&config).await,
        Commands::User { action } => {
            let admin = Admin::open(&config).await?;
            run_user_command(&admin, action).await
        }
    }
}

async fn init_database(config: &Config) -> CliErrorResult<Value> {
    let db_path = config.database_path()?;
    let pool = UserDatabase::open(&db_path, config.database.max_connections).await?;
    pool.close().await;

    Ok(json!({ "database": db_path.display().to_string() }))
}

async fn run_user_command(admin: &Admin, action: UserCommands) -> CliErrorResult<Value> {
    match action {
        UserCommands::Create {
            user_name,
            given_name,
            family_name,
            emails,
            phone_numbers,
            password,
        } => {
            admin
                .create_user(
                    &user_name,
                    &given_name,
                    &family_name,
                    &emails,
                    &phone_numbers,
                    &password,
                )
                .await
        }
        UserCommands::Get { id } => admin.get_user(&id).await,
        UserCommands::List => admin.list_users().await,
        UserCommands::Update {
            id,
            version,
            user_name,
            given_name,
            family_name,
            email,
            phone,
            active,
        } => {
            let changes = ProfileChanges {
                user_name,
                given_name,
                family_name,
                email,
                phone_number: phone,
                active,
            };
            admin.update_user(&id, version, changes).await
        }
        UserCommands::Passwd {
            id,
            old_password,
            new_password,
        } => {
            admin
                .change_password(&id, old_password.as_deref(), &new_password)
                .await
        }
        UserCommands::Remove { id, version } => admin.remove_user(&id, version).await,
    }
}
