use std::sync::Arc;

use crate::{infra::config::AppConfig, use_cases::payment::PaymentUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub payment_use_cases: Arc<PaymentUseCases>,
}
