use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    PaymentStatus, "payment status" {
        Open => "OPEN",
        Betaald => "BETAALD",
        Mislukt => "MISLUKT",
        Terugbetaald => "TERUGBETAALD",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub match_id: Uuid,
    pub care_request_id: Uuid,
    pub seeker_id: Uuid,
    pub provider_id: Uuid,
    pub amount: Decimal,
    pub commission: Decimal,
    pub processor_reference: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Amount that reaches the provider after commission.
    pub fn net(&self) -> Decimal {
        self.amount - self.commission
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub match_id: Uuid,
    pub care_request_id: Uuid,
    pub seeker_id: Uuid,
    pub provider_id: Uuid,
    pub amount: Decimal,
    pub commission: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub seeker_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub status: Option<PaymentStatus>,
}
