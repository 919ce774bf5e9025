//! Command-line interface.
//!
//! `serve` (the default) runs the HTTP server. `create-admin` bootstraps an
//! Admin account directly against the configured database, which is how the
//! first Admin comes to exist on a fresh deployment.

use clap::{Parser, Subcommand};

use classdesk_core::AppError;
use classdesk_db::Stores;
use classdesk_models::accounts::{Account, NewAccount, RoleProfile};

use crate::modules::auth::service::AuthService;

#[derive(Debug, Parser)]
#[command(name = "classdesk", version)]
#[command(about = "Classdesk - role-based classroom management API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,
    /// Create an Admin account (requires DATABASE_URL)
    CreateAdmin {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        username: String,

        /// Falls back to the ADMIN_PASSWORD environment variable
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn create_admin(
    stores: &Stores,
    first_name: &str,
    last_name: &str,
    username: &str,
    password: &str,
) -> Result<Account, AppError> {
    let required = |value: &str, message: &str| {
        let value = value.trim();
        if value.is_empty() {
            Err(AppError::validation(message))
        } else {
            Ok(value.to_string())
        }
    };

    if password.len() < 6 {
        return Err(AppError::validation(
            "Password must be at least 6 characters",
        ));
    }

    let new_account = NewAccount {
        first_name: required(first_name, "First name is required")?,
        last_name: required(last_name, "Last name is required")?,
        middle_name: None,
        username: required(username, "Username is required")?,
        password: password.to_string(),
        profile: RoleProfile::Admin,
    };

    AuthService::create_account(stores.accounts.as_ref(), new_account).await
}
