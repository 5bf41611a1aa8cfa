use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::payment::PaymentRepoTrait,
    domain::entities::{
        payment::{NewPayment, Payment},
        payment_status::PaymentStatus,
        payment_type::PaymentType,
    },
};

const SELECT_COLS: &str = r#"
    id, user_id, username, event_id, event_name, amount,
    payment_type, status, created_on, updated_on
"#;

fn row_to_payment(row: sqlx::postgres::PgRow) -> AppResult<Payment> {
    let payment_type: String = row.get("payment_type");
    let status: String = row.get("status");

    Ok(Payment {
        id: row.get("id"),
        user_id: row.get("user_id"),
        username: row.get("username"),
        event_id: row.get("event_id"),
        event_name: row.get("event_name"),
        amount: row.get("amount"),
        payment_type: payment_type
            .parse::<PaymentType>()
            .map_err(AppError::Database)?,
        status: status.parse::<PaymentStatus>().map_err(AppError::Database)?,
        created_on: row.get("created_on"),
        updated_on: row.get("updated_on"),
    })
}

fn rows_to_payments(rows: Vec<sqlx::postgres::PgRow>) -> AppResult<Vec<Payment>> {
    rows.into_iter().map(row_to_payment).collect()
}

#[async_trait]
impl PaymentRepoTrait for PostgresPersistence {
    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE event_id = $1 AND user_id = $2",
            SELECT_COLS
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        row.map(row_to_payment).transpose()
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE event_id = $1 ORDER BY seq",
            SELECT_COLS
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        rows_to_payments(rows)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE user_id = $1 ORDER BY seq",
            SELECT_COLS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        rows_to_payments(rows)
    }

    async fn insert(&self, payment: NewPayment) -> AppResult<Payment> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payments (
                id, user_id, username, event_id, event_name, amount,
                payment_type, status, created_on, updated_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(id)
        .bind(payment.user_id)
        .bind(&payment.username)
        .bind(payment.event_id)
        .bind(&payment.event_name)
        .bind(payment.amount)
        .bind(payment.payment_type.as_str())
        .bind(payment.status.as_str())
        .bind(payment.created_on)
        .bind(payment.updated_on)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        row_to_payment(row)
    }

    async fn update(&self, payment: &Payment) -> AppResult<Payment> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE payments
            SET amount = $2, payment_type = $3, status = $4, updated_on = $5
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(payment.id)
        .bind(payment.amount)
        .bind(payment.payment_type.as_str())
        .bind(payment.status.as_str())
        .bind(payment.updated_on)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        // The row can only vanish through an out-of-band delete.
        row.map(row_to_payment).transpose()?.ok_or(AppError::NotFound)
    }
}
