//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! backed by an in-memory payment repository.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::payment::{PaymentRepoTrait, PaymentUseCases},
    domain::entities::payment::Payment,
    infra::config::AppConfig,
    test_utils::InMemoryPaymentRepo,
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let builder = TestAppStateBuilder::new()
///     .with_payment(create_test_payment(event_id, user_id, |_| {}));
/// let repo = builder.repo();
/// let app_state = builder.build();
/// ```
pub struct TestAppStateBuilder {
    payments: Vec<Payment>,
    repo: Arc<InMemoryPaymentRepo>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            payments: Vec::new(),
            repo: Arc::new(InMemoryPaymentRepo::new()),
        }
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payments.push(payment);
        self
    }

    /// Handle to the repository the built state will use, for assertions.
    pub fn repo(&self) -> Arc<InMemoryPaymentRepo> {
        self.repo.clone()
    }

    pub fn build(self) -> AppState {
        self.repo.payments.lock().unwrap().extend(self.payments);

        let payment_use_cases =
            PaymentUseCases::new(self.repo.clone() as Arc<dyn PaymentRepoTrait>);

        AppState {
            config: Arc::new(test_config()),
            payment_use_cases: Arc::new(payment_use_cases),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/event_payments_test".to_string(),
        database_max_connections: 1,
        run_migrations: false,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        log_file: "test.log".to_string(),
    }
}
