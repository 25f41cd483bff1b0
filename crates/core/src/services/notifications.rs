use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    errors::{ShiftError, ShiftResult},
    models::{
        notification::{Notification, NotificationKind},
        principal::Principal,
    },
    store::ShiftStore,
};

/// Records a notification for the user signed in as `employee_code`.
///
/// Failures are logged and swallowed; a swap transition never depends on
/// its notification.
pub async fn notify_employee(
    store: &dyn ShiftStore,
    employee_code: &str,
    kind: NotificationKind,
    message: String,
    swap_id: Uuid,
) {
    let user_id = match store.principal_for_employee(employee_code).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            debug!(employee_code, %kind, "No user for employee; notification skipped");
            return;
        }
        Err(err) => {
            warn!(employee_code, %kind, error = %err, "Could not look up notification target");
            return;
        }
    };

    let notification = Notification::new(user_id, kind, message, Some(swap_id));
    if let Err(err) = store.insert_notification(&notification).await {
        warn!(employee_code, %kind, %swap_id, error = %err, "Could not store notification");
    }
}

pub async fn list_for_principal(
    store: &dyn ShiftStore,
    principal: &Principal,
) -> ShiftResult<Vec<Notification>> {
    store
        .list_notifications(&principal.id)
        .await
        .map_err(ShiftError::Database)
}
