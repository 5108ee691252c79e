//! Repository for the `notifications` table.

use sqlx::PgPool;
use writinghub_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, customer_id, notification_type, title, message, link, is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (customer_id, notification_type, title, message, link) \
             VALUES ($1, $2, $3, $4, COALESCE($5, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.customer_id)
            .bind(input.notification_type.as_str())
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.link)
            .fetch_one(pool)
            .await
    }

    /// List notifications for a customer.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE customer_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if an unread notification belonging to the customer
    /// was updated.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        customer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND customer_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(customer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
