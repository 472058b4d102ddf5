use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::payment::Payment;

/// Payments visible to the caller; providers also get their earnings split by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOverview {
    pub items: Vec<Payment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<Decimal>,
}
