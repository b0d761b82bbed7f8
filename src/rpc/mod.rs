pub mod handlers;
pub mod types;

use crate::account::Bank;
use crate::config::TellerConfig;
use crate::error::ConfigError;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[derive(Clone)]
pub struct RpcState {
    pub bank: Arc<Bank>,
}

pub struct TellerServer {
    state: RpcState,
    bind_addr: String,
}

impl TellerServer {
    pub fn new(config: &TellerConfig) -> Result<Self, ConfigError> {
        let bank = Bank::from_config(config)?;
        Ok(Self::with_bank(Arc::new(bank), config.listen_addr()))
    }

    pub fn with_bank(bank: Arc<Bank>, bind_addr: String) -> Self {
        Self {
            state: RpcState { bank },
            bind_addr,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(|| async { "teller ok" }))
            .route("/login", post(handlers::handle_login))
            .route("/balance", get(handlers::handle_get_balance))
            .route("/deposit", post(handlers::handle_deposit))
            .route("/withdraw", post(handlers::handle_withdraw))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    pub async fn start(self) -> std::io::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;

        info!(
            addr = %self.bind_addr,
            accounts = self.state.bank.ledger().account_count(),
            "Teller server listening"
        );
        axum::serve(listener, app).await
    }
}
