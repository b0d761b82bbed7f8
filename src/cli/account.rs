use std::path::Path;

use super::session::Session;
use crate::client::TellerClient;
use crate::error::ClientError;

pub async fn handle_login_command(
    username: String,
    password: String,
    url: String,
    session_path: &Path,
) -> Result<(), ClientError> {
    let mut client = TellerClient::new(url.clone());
    let token = client.login(&username, &password).await?;

    Session { url, username: username.clone(), token }.save(session_path)?;
    println!("Logged in as {}", username);
    Ok(())
}

pub async fn handle_balance_command(
    url: Option<String>,
    session_path: &Path,
) -> Result<(), ClientError> {
    let client = session_client(url, session_path)?;
    let response = client.get_balance().await?;
    println!("Balance: {}", response.balance);
    Ok(())
}

pub async fn handle_deposit_command(
    amount: String,
    url: Option<String>,
    session_path: &Path,
) -> Result<(), ClientError> {
    let amount = parse_amount(&amount)?;
    let client = session_client(url, session_path)?;
    let receipt = client.deposit(amount).await?;
    println!("{} (new balance: {})", receipt.message, receipt.new_balance);
    Ok(())
}

pub async fn handle_withdraw_command(
    amount: String,
    url: Option<String>,
    session_path: &Path,
) -> Result<(), ClientError> {
    let amount = parse_amount(&amount)?;
    let client = session_client(url, session_path)?;
    let receipt = client.withdraw(amount).await?;
    println!("{} (new balance: {})", receipt.message, receipt.new_balance);
    Ok(())
}

fn session_client(url: Option<String>, session_path: &Path) -> Result<TellerClient, ClientError> {
    let session = Session::load(session_path)?;
    let url = url.unwrap_or(session.url);
    Ok(TellerClient::new(url).with_token(session.token))
}

/// Keep the amount as a JSON number so the server echoes it as typed.
fn parse_amount(raw: &str) -> Result<serde_json::Number, ClientError> {
    raw.trim()
        .parse::<serde_json::Number>()
        .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_keeps_text() {
        assert_eq!(parse_amount("250").unwrap().to_string(), "250");
        assert_eq!(parse_amount(" 12.5 ").unwrap().to_string(), "12.5");
        assert!(parse_amount("ten").is_err());
    }
}
