// HTTP client for the teller API
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::account::Receipt;
use crate::error::ClientError;
use crate::rpc::types::{BalanceResponse, ErrorResponse, LoginResponse};

pub struct TellerClient {
    url: String,
    client: Client,
    token: Option<String>,
}

impl TellerClient {
    pub fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Log in and keep the returned token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ClientError> {
        let request = self
            .client
            .post(format!("{}/login", self.url))
            .json(&json!({ "username": username, "password": password }));

        let response: LoginResponse = self.send(request).await?;
        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    pub async fn get_balance(&self) -> Result<BalanceResponse, ClientError> {
        let request = self.authorized(self.client.get(format!("{}/balance", self.url)))?;
        self.send(request).await
    }

    pub async fn deposit(&self, amount: serde_json::Number) -> Result<Receipt, ClientError> {
        let request = self
            .authorized(self.client.post(format!("{}/deposit", self.url)))?
            .json(&json!({ "amount": amount }));
        self.send(request).await
    }

    pub async fn withdraw(&self, amount: serde_json::Number) -> Result<Receipt, ClientError> {
        let request = self
            .authorized(self.client.post(format!("{}/withdraw", self.url)))?
            .json(&json!({ "amount": amount }));
        self.send(request).await
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| ClientError::Session("not logged in".to_string()))?;
        Ok(request.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(api_error(status, message))
    }
}

fn api_error(status: StatusCode, message: String) -> ClientError {
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
