use std::sync::Arc;

use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::dto::notification_dto::{MarkReadResponse, NotificationListResponse};
use crate::error::{Error, Result};
use crate::models::notification::{NewNotification, Notification, NotificationType};
use crate::store::Store;

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn Store>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Records a notification for `user_id`. Failures are logged, not returned.
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationType,
        title: impl Into<String>,
        body: impl Into<String>,
        data: Option<JsonValue>,
    ) -> Option<Notification> {
        let notification = NewNotification {
            user_id,
            kind,
            title: title.into(),
            body: body.into(),
            data,
        };
        match self.store.insert_notification(notification).await {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(%user_id, kind = %kind, error = %e, "failed to store notification");
                None
            }
        }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<NotificationListResponse> {
        let items = self.store.list_notifications(user_id).await?;
        let unread = items.iter().filter(|n| !n.read).count() as i64;
        Ok(NotificationListResponse { items, unread })
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        self.store.count_unread_notifications(user_id).await
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<MarkReadResponse> {
        if !self.store.mark_notification_read(id, user_id).await? {
            return Err(Error::NotFound("Notificatie niet gevonden".into()));
        }
        Ok(MarkReadResponse { updated: 1 })
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<MarkReadResponse> {
        let updated = self.store.mark_all_notifications_read(user_id).await?;
        Ok(MarkReadResponse { updated })
    }
}
