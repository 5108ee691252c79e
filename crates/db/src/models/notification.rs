//! Notification entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::notification::NotificationType;
use writinghub_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub customer_id: DbId,
    #[sqlx(try_from = "String")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub customer_id: DbId,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

/// Query parameters for listing a customer's notifications.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationListParams {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
