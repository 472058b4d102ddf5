use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    NotificationType, "notification type" {
        ZorgverlenerGereageerd => "ZORGVERLENER_GEREAGEERD",
        MatchBevestigd => "MATCH_BEVESTIGD",
        MatchAfgewezen => "MATCH_AFGEWEZEN",
        MatchGeannuleerd => "MATCH_GEANNULEERD",
        AccountGoedgekeurd => "ACCOUNT_GOEDGEKEURD",
        AccountAfgekeurd => "ACCOUNT_AFGEKEURD",
        DocumentGoedgekeurd => "DOCUMENT_GOEDGEKEURD",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    pub data: Option<JsonValue>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    pub data: Option<JsonValue>,
}
