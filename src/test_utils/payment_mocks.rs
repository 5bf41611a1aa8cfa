//! In-memory mock implementation of the payment repository.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::payment::PaymentRepoTrait,
    domain::entities::payment::{NewPayment, Payment},
};

/// In-memory implementation of PaymentRepoTrait for testing.
///
/// Rows are kept in insertion order, mirroring the ordering of the
/// PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryPaymentRepo {
    pub payments: Mutex<Vec<Payment>>,
    fail_writes: AtomicBool,
}

impl InMemoryPaymentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial payments for testing.
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        Self {
            payments: Mutex::new(payments),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Get all payments (for test assertions).
    pub fn get_all(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }

    /// Make every subsequent insert and update fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database("Database operation failed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentRepoTrait for InMemoryPaymentRepo {
    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.event_id == event_id && p.user_id == user_id)
            .cloned())
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, payment: NewPayment) -> AppResult<Payment> {
        self.check_writable()?;
        let mut payments = self.payments.lock().unwrap();

        // Same contract as the unique index on (event_id, user_id)
        if payments
            .iter()
            .any(|p| p.event_id == payment.event_id && p.user_id == payment.user_id)
        {
            return Err(AppError::Database("Database operation failed".into()));
        }

        let payment = payment.into_payment(Uuid::new_v4());
        payments.push(payment.clone());
        Ok(payment)
    }

    async fn update(&self, payment: &Payment) -> AppResult<Payment> {
        self.check_writable()?;
        let mut payments = self.payments.lock().unwrap();
        let stored = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or(AppError::NotFound)?;

        stored.amount = payment.amount;
        stored.payment_type = payment.payment_type;
        stored.status = payment.status;
        stored.updated_on = payment.updated_on;

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_payment;

    #[tokio::test]
    async fn insert_rejects_duplicate_natural_key() {
        let (event_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        let existing = create_test_payment(event_id, user_id, |_| {});
        let repo = InMemoryPaymentRepo::with_payments(vec![existing.clone()]);

        let result = repo
            .insert(NewPayment {
                user_id,
                username: None,
                event_id,
                event_name: None,
                amount: None,
                payment_type: existing.payment_type,
                status: existing.status,
                created_on: existing.created_on,
                updated_on: existing.updated_on,
            })
            .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(repo.get_all().len(), 1);
    }
}
