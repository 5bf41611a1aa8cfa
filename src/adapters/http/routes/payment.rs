use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::{
        payment::Payment, payment_status::PaymentStatus, payment_type::PaymentType,
    },
    use_cases::payment::UpsertPaymentInput,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_payment))
        .route("/{event_id}/{user_id}/status", put(update_status))
        .route("/event", get(list_by_event))
        .route("/user", get(list_by_user))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequest {
    user_id: Option<Uuid>,
    event_id: Option<Uuid>,
    username: Option<String>,
    event_name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    amount: Option<Decimal>,
    #[serde(rename = "type")]
    payment_type: Option<PaymentType>,
    status: Option<PaymentStatus>,
}

impl TryFrom<PaymentRequest> for UpsertPaymentInput {
    type Error = AppError;

    fn try_from(req: PaymentRequest) -> Result<Self, Self::Error> {
        let user_id = req
            .user_id
            .ok_or_else(|| AppError::InvalidInput("userId is required".into()))?;
        let event_id = req
            .event_id
            .ok_or_else(|| AppError::InvalidInput("eventId is required".into()))?;

        Ok(UpsertPaymentInput {
            user_id,
            event_id,
            username: req.username,
            event_name: req.event_name,
            amount: req.amount,
            payment_type: req.payment_type,
            status: req.status,
        })
    }
}

/// Outward view of a payment. Identity and timestamps stay internal.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    event_id: Uuid,
    user_id: Uuid,
    username: Option<String>,
    event_name: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    amount: Option<Decimal>,
    #[serde(rename = "type")]
    payment_type: PaymentType,
    status: PaymentStatus,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            event_id: payment.event_id,
            user_id: payment.user_id,
            username: payment.username,
            event_name: payment.event_name,
            amount: payment.amount,
            payment_type: payment.payment_type,
            status: payment.status,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventQuery {
    event_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/payments
async fn upsert_payment(
    State(app_state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let input = UpsertPaymentInput::try_from(payload)?;

    let payment = app_state.payment_use_cases.upsert_payment(input).await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// PUT /api/v1/payments/{event_id}/{user_id}/status
async fn update_status(
    State(app_state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path((event_id, user_id)) = path?;
    let payment = app_state
        .payment_use_cases
        .update_status(event_id, user_id)
        .await?;

    Ok(Json(PaymentResponse::from(payment)))
}

/// GET /api/v1/payments/event?eventId=...
async fn list_by_event(
    State(app_state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query?;
    let payments = app_state
        .payment_use_cases
        .list_by_event(query.event_id)
        .await?;

    Ok(Json(to_responses(payments)))
}

/// GET /api/v1/payments/user?userId=...
async fn list_by_user(
    State(app_state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query?;
    let payments = app_state
        .payment_use_cases
        .list_by_user(query.user_id)
        .await?;

    Ok(Json(to_responses(payments)))
}

fn to_responses(payments: Vec<Payment>) -> Vec<PaymentResponse> {
    payments.into_iter().map(PaymentResponse::from).collect()
}
