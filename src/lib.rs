pub mod account; // credentials, tokens and balances
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod rpc;
