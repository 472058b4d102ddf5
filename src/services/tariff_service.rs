use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    care_request::CareType,
    tariff::{TariffBand, TariffUpdate},
    user::User,
};
use crate::services::audit_service::AuditService;
use crate::store::Store;

/// Hourly rate used at intake when no band exists for the care type.
pub const FALLBACK_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Clone)]
pub struct TariffService {
    store: Arc<dyn Store>,
    audit: AuditService,
}

impl TariffService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService) -> Self {
        Self { store, audit }
    }

    pub async fn list(&self) -> Result<Vec<TariffBand>> {
        self.store.list_tariffs().await
    }

    /// Rate a new care request starts at.
    pub async fn intake_rate(&self, care_type: CareType) -> Result<Decimal> {
        match self.store.find_tariff(care_type).await? {
            Some(band) if !band.active => Err(Error::BadRequest(format!(
                "Zorgtype '{}' is momenteel niet beschikbaar",
                care_type.label()
            ))),
            Some(band) => Ok(band.default_rate),
            None => Ok(FALLBACK_RATE),
        }
    }

    pub async fn update(
        &self,
        admin: &User,
        id: Uuid,
        update: TariffUpdate,
        ip: Option<String>,
    ) -> Result<TariffBand> {
        let current = self
            .store
            .get_tariff(id)
            .await?
            .ok_or_else(|| Error::NotFound("Tarief niet gevonden".into()))?;

        let next = current.merged(&update);
        validate_band(&next)?;
        let saved = self.store.save_tariff(&next).await?;

        tracing::info!(tariff_id = %saved.id, care_type = %saved.care_type, "tariff band updated");
        self.audit
            .log(
                Some(admin.id),
                AuditAction::TariefGewijzigd,
                format!(
                    "Tarief {}: {} - {} (standaard {}), commissie {}%, actief: {}",
                    saved.care_type,
                    saved.min_rate,
                    saved.max_rate,
                    saved.default_rate,
                    saved.commission_percentage,
                    saved.active
                ),
                ip,
            )
            .await;
        Ok(saved)
    }
}

pub fn validate_band(band: &TariffBand) -> Result<()> {
    if band.min_rate < Decimal::ZERO {
        return Err(Error::BadRequest("Minimumtarief mag niet negatief zijn".into()));
    }
    if band.min_rate > band.default_rate || band.default_rate > band.max_rate {
        return Err(Error::BadRequest(
            "Standaardtarief moet tussen minimum- en maximumtarief liggen".into(),
        ));
    }
    if band.commission_percentage < Decimal::ZERO
        || band.commission_percentage > Decimal::ONE_HUNDRED
    {
        return Err(Error::BadRequest(
            "Commissiepercentage moet tussen 0 en 100 liggen".into(),
        ));
    }
    Ok(())
}
