use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    DocumentStatus, "document status" {
        InBehandeling => "IN_BEHANDELING",
        Goedgekeurd => "GOEDGEKEURD",
        Afgekeurd => "AFGEKEURD",
    }
}

pub const DEFAULT_SERVICE_RADIUS_KM: i32 = 25;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProviderProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub big_registration: Option<String>,
    pub kvk_number: Option<String>,
    pub care_types: Vec<String>,
    pub service_radius_km: i32,
    pub hourly_rate: Option<Decimal>,
    pub bio: Option<String>,
    pub iban: Option<String>,
    pub approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    #[sqlx(try_from = "String")]
    pub document_status: DocumentStatus,
}

#[derive(Debug, Clone)]
pub struct NewProviderProfile {
    pub user_id: Uuid,
    pub big_registration: Option<String>,
    pub kvk_number: Option<String>,
    pub care_types: Vec<String>,
    pub service_radius_km: i32,
    pub hourly_rate: Option<Decimal>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderProfileUpdate {
    pub big_registration: Option<String>,
    pub kvk_number: Option<String>,
    pub care_types: Option<Vec<String>>,
    pub service_radius_km: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub bio: Option<String>,
    pub iban: Option<String>,
}

/// Outcome of an admin review of a provider's credentials.
#[derive(Debug, Clone)]
pub enum ProviderReview {
    Approve { reviewer: Uuid, at: DateTime<Utc> },
    Reject { reason: String },
}
