//! Forwarding of swap table change notifications.

use eyre::Result;
use sqlx::postgres::PgListener;
use tracing::{info, warn};

use crate::{DbPool, schema::SWAP_CHANGES_CHANNEL};

/// Calls `on_change` with the operation name (`INSERT`, `UPDATE`, `DELETE`)
/// each time the swap table changes.
///
/// Runs until the listener connection fails for good. `PgListener`
/// reconnects on its own after transient drops; changes made while it was
/// disconnected are not replayed, so consumers should also poll.
pub async fn listen_for_swap_changes<F>(pool: &DbPool, on_change: F) -> Result<()>
where
    F: Fn(&str) + Send,
{
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(SWAP_CHANGES_CHANNEL).await?;
    info!("Listening for swap changes on {}", SWAP_CHANGES_CHANNEL);

    loop {
        match listener.try_recv().await? {
            Some(notification) => on_change(notification.payload()),
            None => {
                warn!("Swap change listener reconnected; changes may have been missed");
                on_change("RECONNECT");
            }
        }
    }
}
