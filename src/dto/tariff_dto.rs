use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::tariff::{TariffBand, TariffUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTariffPayload {
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub default_rate: Option<Decimal>,
    pub commission_percentage: Option<Decimal>,
    pub active: Option<bool>,
}

impl From<UpdateTariffPayload> for TariffUpdate {
    fn from(value: UpdateTariffPayload) -> Self {
        Self {
            min_rate: value.min_rate,
            max_rate: value.max_rate,
            default_rate: value.default_rate,
            commission_percentage: value.commission_percentage,
            active: value.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffListResponse {
    pub items: Vec<TariffBand>,
}
