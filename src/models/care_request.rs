use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    RequestStatus, "request status" {
        Open => "OPEN",
        Gekoppeld => "GEKOPPELD",
        Afgerond => "AFGEROND",
        Geannuleerd => "GEANNULEERD",
    }
}

wire_enum! {
    CareType, "care type" {
        PersoonlijkeVerzorging => "persoonlijke_verzorging",
        Verpleging => "verpleging",
        Begeleiding => "begeleiding",
        HuishoudelijkeHulp => "huishoudelijke_hulp",
        Dagbesteding => "dagbesteding",
        Nachtzorg => "nachtzorg",
        Respijtzorg => "respijtzorg",
        GeestelijkeGezondheidszorg => "geestelijke_gezondheidszorg",
    }
}

impl CareType {
    pub fn label(&self) -> &'static str {
        match self {
            CareType::PersoonlijkeVerzorging => "Persoonlijke verzorging",
            CareType::Verpleging => "Verpleging",
            CareType::Begeleiding => "Begeleiding",
            CareType::HuishoudelijkeHulp => "Huishoudelijke hulp",
            CareType::Dagbesteding => "Dagbesteding",
            CareType::Nachtzorg => "Nachtzorg",
            CareType::Respijtzorg => "Respijtzorg",
            CareType::GeestelijkeGezondheidszorg => "Geestelijke gezondheidszorg",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareRequest {
    pub id: Uuid,
    pub seeker_id: Uuid,
    #[sqlx(try_from = "String")]
    pub care_type: CareType,
    pub description: String,
    pub rate: Decimal,
    pub hours_per_week: Option<i32>,
    pub start_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCareRequest {
    pub seeker_id: Uuid,
    pub care_type: CareType,
    pub description: String,
    pub rate: Decimal,
    pub hours_per_week: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CareRequestFilter {
    pub seeker_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
    pub care_type: Option<CareType>,
    pub limit: Option<i64>,
}
