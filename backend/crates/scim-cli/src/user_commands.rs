use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Create {
        /// Login name (lowercase letters, digits, and + - _ . @)
        #[arg(long)]
        user_name: String,

        #[arg(long)]
        given_name: String,

        #[arg(long)]
        family_name: String,

        /// Email address; repeat to supply several, the first is primary
        #[arg(long = "email", required = true)]
        emails: Vec<String>,

        /// Phone number; repeat to supply several
        #[arg(long = "phone")]
        phone_numbers: Vec<String>,

        /// Initial password
        #[arg(long)]
        password: String,
    },

    /// Get a user by ID
    Get {
        /// User ID (UUID)
        id: String,
    },

    /// List all users, oldest first
    List,

    /// Update a user's profile
    Update {
        /// User ID (UUID)
        id: String,

        /// Current version (for optimistic locking)
        #[arg(long)]
        version: i64,

        #[arg(long)]
        user_name: Option<String>,

        #[arg(long)]
        given_name: Option<String>,

        #[arg(long)]
        family_name: Option<String>,

        /// Replaces the stored email
        #[arg(long)]
        email: Option<String>,

        /// Replaces the stored phone number
        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Change a user's password
    Passwd {
        /// User ID (UUID)
        id: String,

        /// Current password; omit for an administrative reset
        #[arg(long)]
        old_password: Option<String>,

        #[arg(long)]
        new_password: String,
    },

    /// Remove a user (deactivates or deletes, per configuration)
    Remove {
        /// User ID (UUID)
        id: String,

        /// Expected version; omit to skip the concurrency check
        #[arg(long)]
        version: Option<i64>,
    },
}
