//! Journal Portal CLI - Log in and out of the submission portal.
//!
//! # Usage
//!
//! ```bash
//! # Log in against the backend (password from PORTAL_PASSWORD or stdin)
//! jp-cli login -e jane.doe@example.com
//!
//! # Create an account and log in
//! jp-cli register -e jane.doe@example.com --first-name Jane --last-name Doe
//!
//! # Offline demo login
//! jp-cli demo-login -e admin@journal.com
//!
//! # Show who is logged in and which keys are stored
//! jp-cli status
//!
//! # Print the Authorization header for the current session
//! curl -H "Authorization: $(jp-cli token)" ...
//!
//! # Log out and clear stored credentials
//! jp-cli logout
//! ```
//!
//! # Commands
//!
//! - `login` - Exchange credentials with the portal backend
//! - `register` - Create an account, then log in
//! - `demo-login` - Offline login with a role derived from the email
//! - `logout` - End the session
//! - `status` - Show session state
//! - `token` - Print the bearer header value

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::BufRead;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use journal_portal_cli::api::{PortalClient, Registration};
use journal_portal_cli::commands::{self, CommandError};
use journal_portal_cli::config::CliConfig;
use journal_portal_session::{FileStorage, SessionStore};

#[derive(Parser)]
#[command(name = "jp-cli")]
#[command(author, version, about = "Journal Portal session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with the portal backend
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account with the portal backend and log in
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Institution or affiliation
        #[arg(long, default_value = "")]
        organization: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Offline demo login without contacting the backend
    DemoLogin {
        /// Email address; `admin@journal.com` logs in as admin
        #[arg(short, long)]
        email: String,
    },
    /// Log out and remove stored credentials
    Logout,
    /// Show the current session
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the Authorization header value for the current session
    Token,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    let mut store = SessionStore::open(FileStorage::new(&config.session_dir));

    let output = match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => SecretString::from(password),
                None => read_password()?,
            };
            let client = PortalClient::new(&config.api_base_url, config.http_timeout)?;
            commands::login::login(&mut store, &client, &email, &password).await?
        }
        Commands::Register {
            email,
            first_name,
            last_name,
            organization,
            password,
        } => {
            let registration = Registration {
                email,
                password: password.map_or_else(read_password, |p| Ok(SecretString::from(p)))?,
                first_name,
                last_name,
                organization,
            };
            let client = PortalClient::new(&config.api_base_url, config.http_timeout)?;
            commands::register::register(&mut store, &client, &registration).await?
        }
        Commands::DemoLogin { email } => commands::login::demo_login(&mut store, &email)?,
        Commands::Logout => commands::logout::logout(&mut store),
        Commands::Status { json } => commands::status::status(&store, json)?,
        Commands::Token => commands::status::token(&store)?,
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

/// Read a password from the first line of stdin.
fn read_password() -> Result<SecretString, CommandError> {
    #[allow(clippy::print_stderr)]
    {
        eprint!("Password: ");
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CommandError::MissingPassword);
    }
    Ok(SecretString::from(password.to_owned()))
}
