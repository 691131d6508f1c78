//! Notification dispatch background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{services::NotificationKind, state::AppState};

/// Background task that delivers every tag notification to the log
pub async fn notification_log_task(state: Arc<AppState>) {
    info!("Starting notification task");

    let mut notification_rx = state.notification_tx.subscribe();

    loop {
        match notification_rx.recv().await {
            Ok(notification) => match notification.kind {
                NotificationKind::Tagged => info!("[{}] {}: {}",
                    notification.title, notification.field_name, notification.field_value),
                NotificationKind::Cooldown => warn!("[{}] {}: {}",
                    notification.title, notification.field_name, notification.field_value),
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification task lagged, {} notifications skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Notification channel closed, stopping notification task");
                break;
            }
        }
    }
}

