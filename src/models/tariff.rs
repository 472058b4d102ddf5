use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::care_request::CareType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TariffBand {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub care_type: CareType,
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    pub default_rate: Decimal,
    pub commission_percentage: Decimal,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TariffUpdate {
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub default_rate: Option<Decimal>,
    pub commission_percentage: Option<Decimal>,
    pub active: Option<bool>,
}

impl TariffBand {
    /// Applies a partial update, returning the band as it would be stored.
    pub fn merged(&self, update: &TariffUpdate) -> TariffBand {
        TariffBand {
            min_rate: update.min_rate.unwrap_or(self.min_rate),
            max_rate: update.max_rate.unwrap_or(self.max_rate),
            default_rate: update.default_rate.unwrap_or(self.default_rate),
            commission_percentage: update
                .commission_percentage
                .unwrap_or(self.commission_percentage),
            active: update.active.unwrap_or(self.active),
            ..self.clone()
        }
    }
}
