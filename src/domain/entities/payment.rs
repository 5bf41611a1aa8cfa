use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{payment_status::PaymentStatus, payment_type::PaymentType};

/// A stored payment for one user's registration to one event.
///
/// `(event_id, user_id)` is the natural key: the store never holds two
/// payments for the same pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: Option<String>,
    pub event_id: Uuid,
    pub event_name: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

/// A payment that has not been persisted yet and so has no identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub event_id: Uuid,
    pub event_name: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

impl NewPayment {
    pub fn into_payment(self, id: Uuid) -> Payment {
        Payment {
            id,
            user_id: self.user_id,
            username: self.username,
            event_id: self.event_id,
            event_name: self.event_name,
            amount: self.amount,
            payment_type: self.payment_type,
            status: self.status,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}
