use crate::user_commands::UserCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the database and apply pending migrations
    Init,

    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
