use clap::Parser;
use rust_teller::cli::{account, session::Session, Cli, Commands};
use rust_teller::config::TellerConfig;
use rust_teller::rpc::TellerServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CLIENT_LOG_LEVEL: &str = "warn";

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let session_path = Session::default_path();

    let result = match cli.command.unwrap_or(Commands::Serve {
        config: "teller.toml".to_string(),
        port: None,
    }) {
        Commands::Serve { config, port } => {
            let mut config = TellerConfig::load_or_default(&config);
            if let Some(port) = port {
                config = config.with_port(port);
            }
            init_tracing(&config.server.log_level);
            return run_server(config).await;
        }
        Commands::Login { username, password, url } => {
            init_tracing(CLIENT_LOG_LEVEL);
            account::handle_login_command(username, password, url, &session_path).await
        }
        Commands::Balance { url } => {
            init_tracing(CLIENT_LOG_LEVEL);
            account::handle_balance_command(url, &session_path).await
        }
        Commands::Deposit { amount, url } => {
            init_tracing(CLIENT_LOG_LEVEL);
            account::handle_deposit_command(amount, url, &session_path).await
        }
        Commands::Withdraw { amount, url } => {
            init_tracing(CLIENT_LOG_LEVEL);
            account::handle_withdraw_command(amount, url, &session_path).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_server(config: TellerConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting teller on {}", config.listen_addr());
    let server = TellerServer::new(&config)?;
    server.start().await?;
    Ok(())
}
