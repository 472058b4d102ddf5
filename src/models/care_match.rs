use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::payment::{NewPayment, Payment};
use super::wire_enum;

wire_enum! {
    MatchStatus, "match status" {
        Voorgesteld => "VOORGESTELD",
        Bevestigd => "BEVESTIGD",
        Afgerond => "AFGEROND",
    }
}

/// A provider's response to a care request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareMatch {
    pub id: Uuid,
    pub care_request_id: Uuid,
    pub provider_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub response_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewCareMatch {
    pub care_request_id: Uuid,
    pub provider_id: Uuid,
    pub response_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub care_request_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
    pub limit: Option<i64>,
}

/// Everything the confirmation step wrote, returned so callers can notify and audit.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub confirmed: CareMatch,
    pub discarded: Vec<CareMatch>,
    pub payment: Payment,
}

#[derive(Debug, Clone)]
pub struct ConfirmMatch {
    pub match_id: Uuid,
    pub care_request_id: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub payment: NewPayment,
}
