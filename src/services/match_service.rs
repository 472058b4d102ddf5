use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use crate::dto::match_dto::{
    AdminMatchOverview, CreateMatchPayload, MatchAction, MatchActionPayload, MatchActionResponse,
    MatchWithRequest,
};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    care_match::{CareMatch, ConfirmMatch, MatchFilter, MatchStatus, NewCareMatch},
    care_request::{CareRequest, RequestStatus},
    notification::NotificationType,
    payment::{NewPayment, PaymentFilter},
    user::{Role, User},
};
use crate::services::{
    audit_service::AuditService, notification_service::NotificationService,
    provider_service::approved_profile,
};
use crate::store::{ConfirmOutcome, Store};

const ADMIN_MATCH_LIMIT: i64 = 200;

/// Commission on a confirmed match, rounded to cents.
pub fn commission_for(rate: Decimal, percentage: Decimal) -> Decimal {
    (rate * percentage / Decimal::ONE_HUNDRED).round_dp(2)
}

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn Store>,
    notifications: NotificationService,
    audit: AuditService,
    commission_percentage: Decimal,
}

impl MatchService {
    pub fn new(
        store: Arc<dyn Store>,
        notifications: NotificationService,
        audit: AuditService,
        commission_percentage: Decimal,
    ) -> Self {
        Self {
            store,
            notifications,
            audit,
            commission_percentage,
        }
    }

    /// Registers a provider's response to an open care request.
    pub async fn respond(
        &self,
        provider: &User,
        payload: CreateMatchPayload,
        ip: Option<String>,
    ) -> Result<CareMatch> {
        let care_request_id = payload
            .care_request_id
            .ok_or_else(|| Error::BadRequest("zorgvraag_id is verplicht".into()))?;
        if provider.role != Role::Zorgverlener {
            return Err(Error::Forbidden("Alleen zorgverleners kunnen reageren".into()));
        }
        approved_profile(self.store.as_ref(), provider).await?;

        let request = match self.store.get_care_request(care_request_id).await? {
            Some(request) if request.status == RequestStatus::Open => request,
            _ => return Err(Error::BadRequest("Zorgvraag niet beschikbaar".into())),
        };

        let response_text = payload
            .response_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        // The store re-checks that the request is still open inside the insert.
        let created = self
            .store
            .insert_match(NewCareMatch {
                care_request_id: request.id,
                provider_id: provider.id,
                response_text,
            })
            .await
            .map_err(|e| match e {
                Error::UniqueViolation(_) => {
                    Error::Conflict("U heeft al gereageerd op deze aanvraag".into())
                }
                other => other,
            })?;

        tracing::info!(match_id = %created.id, care_request_id = %request.id, provider_id = %provider.id, "provider responded");
        self.notifications
            .notify(
                request.seeker_id,
                NotificationType::ZorgverlenerGereageerd,
                "Nieuwe reactie op uw zorgvraag",
                format!(
                    "{} heeft gereageerd op uw zorgvraag ({}).",
                    provider.name,
                    request.care_type.label()
                ),
                Some(json!({ "care_request_id": request.id, "match_id": created.id })),
            )
            .await;
        self.audit
            .log(
                Some(provider.id),
                AuditAction::MatchAangemaakt,
                format!("Reactie {} op zorgvraag {}", created.id, request.id),
                ip,
            )
            .await;
        Ok(created)
    }

    /// Applies the seeker's decision on one response to their request.
    pub async fn act(
        &self,
        seeker: &User,
        payload: MatchActionPayload,
        ip: Option<String>,
    ) -> Result<MatchActionResponse> {
        let match_id = payload
            .match_id
            .ok_or_else(|| Error::BadRequest("match_id is verplicht".into()))?;
        let action: MatchAction = payload
            .action
            .as_deref()
            .ok_or_else(|| Error::BadRequest("actie is verplicht".into()))?
            .parse()?;

        let care_match = self
            .store
            .get_match(match_id)
            .await?
            .ok_or_else(|| Error::NotFound("Match niet gevonden".into()))?;
        let request = self
            .store
            .get_care_request(care_match.care_request_id)
            .await?
            .ok_or_else(|| Error::NotFound("Zorgvraag niet gevonden".into()))?;
        if request.seeker_id != seeker.id {
            return Err(Error::Forbidden("Geen toegang".into()));
        }

        match action {
            MatchAction::Confirm => self.confirm(seeker, care_match, request, ip).await,
            MatchAction::Reject => self.reject(care_match, request).await,
        }
    }

    async fn confirm(
        &self,
        seeker: &User,
        care_match: CareMatch,
        request: CareRequest,
        ip: Option<String>,
    ) -> Result<MatchActionResponse> {
        let commission = commission_for(request.rate, self.commission_percentage);
        let outcome = self
            .store
            .confirm_match(ConfirmMatch {
                match_id: care_match.id,
                care_request_id: request.id,
                confirmed_at: Utc::now(),
                payment: NewPayment {
                    match_id: care_match.id,
                    care_request_id: request.id,
                    seeker_id: request.seeker_id,
                    provider_id: care_match.provider_id,
                    amount: request.rate,
                    commission,
                },
            })
            .await?;

        let confirmation = match outcome {
            ConfirmOutcome::Confirmed(confirmation) => confirmation,
            ConfirmOutcome::RequestNotOpen(status) => {
                tracing::warn!(care_request_id = %request.id, status = %status, "confirm on closed request");
                return Err(Error::BadRequest("Zorgvraag is niet meer open".into()));
            }
            ConfirmOutcome::MatchUnavailable => {
                return Err(Error::BadRequest(
                    "Deze reactie kan niet meer worden bevestigd".into(),
                ))
            }
        };

        tracing::info!(
            match_id = %confirmation.confirmed.id,
            care_request_id = %request.id,
            discarded = confirmation.discarded.len(),
            payment_id = %confirmation.payment.id,
            "match confirmed"
        );
        self.notifications
            .notify(
                confirmation.confirmed.provider_id,
                NotificationType::MatchBevestigd,
                "Match bevestigd",
                format!(
                    "{} heeft uw reactie op de zorgvraag ({}) bevestigd.",
                    seeker.name,
                    request.care_type.label()
                ),
                Some(json!({
                    "care_request_id": request.id,
                    "match_id": confirmation.confirmed.id,
                })),
            )
            .await;
        self.audit
            .log(
                Some(seeker.id),
                AuditAction::MatchBevestigd,
                format!(
                    "Match {} bevestigd; betaling {} van {} (commissie {})",
                    confirmation.confirmed.id,
                    confirmation.payment.id,
                    confirmation.payment.amount,
                    confirmation.payment.commission
                ),
                ip,
            )
            .await;

        Ok(MatchActionResponse {
            success: true,
            match_id: confirmation.confirmed.id,
            action: "bevestigen".into(),
            payment: Some(confirmation.payment),
        })
    }

    async fn reject(&self, care_match: CareMatch, request: CareRequest) -> Result<MatchActionResponse> {
        if care_match.status != MatchStatus::Voorgesteld
            || !self.store.delete_proposed_match(care_match.id).await?
        {
            return Err(Error::BadRequest(
                "Alleen voorgestelde reacties kunnen worden afgewezen".into(),
            ));
        }

        tracing::info!(match_id = %care_match.id, care_request_id = %request.id, "match rejected");
        self.notifications
            .notify(
                care_match.provider_id,
                NotificationType::MatchAfgewezen,
                "Reactie afgewezen",
                format!(
                    "Uw reactie op de zorgvraag ({}) is niet gekozen.",
                    request.care_type.label()
                ),
                Some(json!({ "care_request_id": request.id })),
            )
            .await;

        Ok(MatchActionResponse {
            success: true,
            match_id: care_match.id,
            action: "afwijzen".into(),
            payment: None,
        })
    }

    pub async fn mine(&self, provider: &User) -> Result<Vec<MatchWithRequest>> {
        if provider.role != Role::Zorgverlener {
            return Err(Error::Forbidden("Geen toegang".into()));
        }
        let matches = self
            .store
            .list_matches(&MatchFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            })
            .await?;

        let mut items = Vec::with_capacity(matches.len());
        for care_match in matches {
            let care_request = self.store.get_care_request(care_match.care_request_id).await?;
            items.push(MatchWithRequest {
                care_match,
                care_request,
            });
        }
        Ok(items)
    }

    pub async fn admin_overview(&self) -> Result<AdminMatchOverview> {
        let items = self
            .store
            .list_matches(&MatchFilter {
                limit: Some(ADMIN_MATCH_LIMIT),
                ..Default::default()
            })
            .await?;
        let total = self.store.count_matches(None).await?;
        let confirmed = self.store.count_matches(Some(MatchStatus::Bevestigd)).await?;
        let completed = self.store.count_matches(Some(MatchStatus::Afgerond)).await?;

        // Payments are only created on confirmation, so each one belongs to a
        // confirmed or completed match.
        let commission_total: Decimal = self
            .store
            .list_payments(&PaymentFilter::default())
            .await?
            .iter()
            .map(|p| p.commission)
            .sum();

        Ok(AdminMatchOverview {
            items,
            total,
            confirmed,
            completed,
            commission_total,
        })
    }
}
