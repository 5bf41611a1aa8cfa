use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        payment::{NewPayment, Payment},
        payment_status::PaymentStatus,
        payment_type::PaymentType,
    },
};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait PaymentRepoTrait: Send + Sync {
    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Payment>>;

    /// Payments for an event in storage order. Empty when none match.
    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Payment>>;

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>>;

    /// Persist a payment without identity. The store assigns the id.
    async fn insert(&self, payment: NewPayment) -> AppResult<Payment>;

    /// Overwrite the mutable fields of an already stored payment.
    async fn update(&self, payment: &Payment) -> AppResult<Payment>;
}

// ============================================================================
// Input Types
// ============================================================================

#[derive(Debug, Clone)]
pub struct UpsertPaymentInput {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub username: Option<String>,
    pub event_name: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_type: Option<PaymentType>,
    pub status: Option<PaymentStatus>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct PaymentUseCases {
    repo: Arc<dyn PaymentRepoTrait>,
}

impl PaymentUseCases {
    pub fn new(repo: Arc<dyn PaymentRepoTrait>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        self.repo.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Payment>> {
        self.repo.list_by_event(event_id).await
    }

    /// Create the payment for `(event_id, user_id)` or update the existing one.
    ///
    /// An update only touches amount, type, status and `updated_on`; the
    /// identity, creation time and denormalized names stay as first stored.
    #[instrument(skip(self, input), fields(event_id = %input.event_id, user_id = %input.user_id))]
    pub async fn upsert_payment(&self, input: UpsertPaymentInput) -> AppResult<Payment> {
        let now = Utc::now().naive_utc();
        let payment_type = input.payment_type.unwrap_or_default();
        let status = input.status.unwrap_or_default();

        match self
            .repo
            .find_by_event_and_user(input.event_id, input.user_id)
            .await?
        {
            Some(mut payment) => {
                payment.amount = input.amount;
                payment.payment_type = payment_type;
                payment.status = status;
                payment.updated_on = now;

                let payment = self.repo.update(&payment).await?;
                tracing::info!(payment_id = %payment.id, status = %payment.status, "Payment updated");
                Ok(payment)
            }
            None => {
                let payment = self
                    .repo
                    .insert(NewPayment {
                        user_id: input.user_id,
                        username: input.username,
                        event_id: input.event_id,
                        event_name: input.event_name,
                        amount: input.amount,
                        payment_type,
                        status,
                        created_on: now,
                        updated_on: now,
                    })
                    .await?;
                tracing::info!(payment_id = %payment.id, status = %payment.status, "Payment created");
                Ok(payment)
            }
        }
    }

    /// Toggle the status between pending and paid.
    #[instrument(skip(self))]
    pub async fn update_status(&self, event_id: Uuid, user_id: Uuid) -> AppResult<Payment> {
        let mut payment = self.get_payment(event_id, user_id).await?;

        let previous = payment.status;
        payment.status = previous.flip();
        payment.updated_on = Utc::now().naive_utc();

        let payment = self.repo.update(&payment).await?;
        tracing::info!(
            payment_id = %payment.id,
            from = %previous,
            to = %payment.status,
            "Payment status toggled"
        );
        Ok(payment)
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    async fn get_payment(&self, event_id: Uuid, user_id: Uuid) -> AppResult<Payment> {
        self.repo
            .find_by_event_and_user(event_id, user_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
