use super::types::*;
use crate::account::AccountId;
use crate::error::{AccountError, AuthError, TellerError};
use crate::rpc::RpcState;
use async_trait::async_trait;
use axum::{
    debug_handler,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

/// Acting identity taken from a verified `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub AccountId);

#[async_trait]
impl FromRequestParts<RpcState> for Identity {
    type Rejection = TellerError;

    async fn from_request_parts(parts: &mut Parts, state: &RpcState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
            None => None,
        };

        state.bank.authenticate(header).map(Identity).map_err(|e| {
            debug!(path = %parts.uri.path(), reason = %e, "Unauthenticated request");
            TellerError::from(e)
        })
    }
}

/// HTTP status for each failure.
pub fn status_for(err: &TellerError) -> StatusCode {
    match err {
        TellerError::Auth(e) => match e {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingHeader
            | AuthError::MalformedHeader => StatusCode::UNAUTHORIZED,
            AuthError::InvalidOrExpiredToken => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        TellerError::Account(e) => match e {
            AccountError::InvalidAmount(_)
            | AccountError::InsufficientBalance
            | AccountError::Overflow => StatusCode::BAD_REQUEST,
            AccountError::UnknownAccount(_) => StatusCode::NOT_FOUND,
            AccountError::LockPoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        TellerError::Config(_) | TellerError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for TellerError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// POST /login
#[debug_handler(state = RpcState)]
pub async fn handle_login(
    State(state): State<RpcState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, TellerError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (username, password) = req.credentials().map_err(|e| {
        if e == AuthError::InvalidCredentials {
            warn!("Login rejected: non-string credential");
        }
        e
    })?;
    let token = state.bank.login(Some(username), Some(password))?;
    Ok(Json(LoginResponse { token }))
}

/// GET /balance
#[debug_handler(state = RpcState)]
pub async fn handle_get_balance(
    State(state): State<RpcState>,
    Identity(identity): Identity,
) -> Result<Json<BalanceResponse>, TellerError> {
    let balance = state.bank.balance(&identity).map_err(|e| {
        warn!(account = %identity, "Balance lookup failed: {}", e);
        e
    })?;
    Ok(Json(BalanceResponse { balance }))
}

/// POST /deposit
#[debug_handler(state = RpcState)]
pub async fn handle_deposit(
    State(state): State<RpcState>,
    Identity(identity): Identity,
    body: Option<Json<AmountRequest>>,
) -> Result<Json<crate::account::Receipt>, TellerError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let receipt = state.bank.deposit(&identity, req.amount.as_ref())?;
    Ok(Json(receipt))
}

/// POST /withdraw
#[debug_handler(state = RpcState)]
pub async fn handle_withdraw(
    State(state): State<RpcState>,
    Identity(identity): Identity,
    body: Option<Json<AmountRequest>>,
) -> Result<Json<crate::account::Receipt>, TellerError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let receipt = state.bank.withdraw(&identity, req.amount.as_ref())?;
    Ok(Json(receipt))
}
