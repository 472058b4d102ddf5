use std::sync::Arc;

use rust_decimal::Decimal;

use crate::dto::payment_dto::PaymentOverview;
use crate::error::Result;
use crate::models::{
    payment::{Payment, PaymentFilter, PaymentStatus},
    user::{Role, User},
};
use crate::store::Store;

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn Store>,
}

fn net_total(payments: &[Payment], status: PaymentStatus) -> Decimal {
    payments
        .iter()
        .filter(|p| p.status == status)
        .map(Payment::net)
        .sum()
}

impl PaymentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn overview(&self, user: &User) -> Result<PaymentOverview> {
        let filter = match user.role {
            Role::Zorgvrager => PaymentFilter {
                seeker_id: Some(user.id),
                ..Default::default()
            },
            Role::Zorgverlener => PaymentFilter {
                provider_id: Some(user.id),
                ..Default::default()
            },
            Role::Beheer => PaymentFilter::default(),
        };
        let items = self.store.list_payments(&filter).await?;

        if user.role == Role::Zorgverlener {
            let earned = net_total(&items, PaymentStatus::Betaald);
            let pending = net_total(&items, PaymentStatus::Open);
            return Ok(PaymentOverview {
                items,
                earned: Some(earned),
                pending: Some(pending),
            });
        }
        Ok(PaymentOverview {
            items,
            earned: None,
            pending: None,
        })
    }
}
