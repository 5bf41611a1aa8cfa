//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{
    payment::Payment, payment_status::PaymentStatus, payment_type::PaymentType,
};

/// Create a test payment with sensible defaults.
pub fn create_test_payment(
    event_id: Uuid,
    user_id: Uuid,
    overrides: impl FnOnce(&mut Payment),
) -> Payment {
    let now = test_datetime();

    let mut payment = Payment {
        id: Uuid::new_v4(),
        user_id,
        username: Some("testUser".to_string()),
        event_id,
        event_name: Some("Test Event".to_string()),
        amount: Some(Decimal::TEN),
        payment_type: PaymentType::Single,
        status: PaymentStatus::Pending,
        created_on: now,
        updated_on: now,
    };
    overrides(&mut payment);
    payment
}

/// A fixed timestamp in the past, so anything stamped "now" compares later.
pub fn test_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}
