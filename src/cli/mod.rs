pub mod account;
pub mod session;

use clap::{Parser, Subcommand};

pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Authenticated account-balance service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, default_value = "teller.toml")]
        config: String,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Log in and store the token in the session file
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
    /// Show the balance of the logged-in account
    Balance {
        /// Overrides the URL saved at login
        #[arg(long)]
        url: Option<String>,
    },
    Deposit {
        #[arg(long)]
        amount: String,
        /// Overrides the URL saved at login
        #[arg(long)]
        url: Option<String>,
    },
    Withdraw {
        #[arg(long)]
        amount: String,
        /// Overrides the URL saved at login
        #[arg(long)]
        url: Option<String>,
    },
}
