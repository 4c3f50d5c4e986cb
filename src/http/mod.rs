//! HTTP API for the coin ledger.
//!
//! Thin axum layer over the services: extract the caller identity, decode
//! the request, delegate, map errors to status codes. Wallet-scoped routes
//! read the authenticated user id from the `x-user-id` header supplied by
//! the identity provider in front of this service.

use crate::error::AppError;
use crate::identity::{UserContext, USER_ID_HEADER};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::error;

impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        UserContext::from_header_value(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Internal causes are logged, never leaked to the client
        let body = if status.is_server_error() {
            error!("Request failed: {}", self);
            json!({ "error": "Internal server error" })
        } else {
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FeedParams {
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WithdrawRequest {
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct ClaimAdRequest {
    ad_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DonationRequest {
    amount: Decimal,
    message: Option<String>,
    #[serde(default)]
    is_anonymous: bool,
}

async fn health() -> &'static str {
    "OK"
}

async fn wallet_summary(
    State(state): State<AppState>,
    ctx: UserContext,
) -> Result<impl IntoResponse, AppError> {
    let wallet = state.history.wallet_summary(ctx.user_id).await?;
    Ok(Json(wallet))
}

async fn wallet_transactions(
    State(state): State<AppState>,
    ctx: UserContext,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = state
        .history
        .transactions(ctx.user_id, params.limit, params.offset)
        .await?;
    Ok(Json(transactions))
}

async fn withdraw(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(req): Json<WithdrawRequest>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = state
        .ledger
        .debit(
            ctx.user_id,
            req.amount,
            "Withdrawal from wallet",
            crate::models::TransactionType::Withdraw,
            None,
        )
        .await?;
    Ok(Json(wallet))
}

async fn claim_ad_reward(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(req): Json<ClaimAdRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ad_type = req.ad_type.as_deref().unwrap_or("video");
    let receipt = state.ledger.claim_ad_reward(ctx.user_id, ad_type).await?;
    Ok(Json(receipt))
}

async fn create_donation(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(req): Json<DonationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let receipt = state
        .ledger
        .donate(ctx.user_id, req.amount, req.message, req.is_anonymous)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn donation_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<impl IntoResponse, AppError> {
    let feed = state.history.recent_donations(params.limit).await?;
    Ok(Json(feed))
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/wallet", get(wallet_summary))
        .route("/wallet/transactions", get(wallet_transactions))
        .route("/wallet/withdraw", post(withdraw))
        .route("/ads/claim", post(claim_ad_reward))
        .route("/donations", post(create_donation).get(donation_feed))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
