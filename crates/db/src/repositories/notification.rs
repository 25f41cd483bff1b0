use crate::models::DbNotification;
use eyre::Result;
use shiftswap_core::models::notification::Notification;
use sqlx::{Pool, Postgres};

pub async fn insert_notification(pool: &Pool<Postgres>, notification: &Notification) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, message, kind, related_swap_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(notification.id)
    .bind(&notification.user_id)
    .bind(&notification.message)
    .bind(notification.kind.as_str())
    .bind(notification.related_swap_id)
    .bind(notification.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_notifications_for_user(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, message, kind, related_swap_id, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    notifications.into_iter().map(Notification::try_from).collect()
}
