use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::dto::care_request_dto::{
    AdminCareRequestList, CareRequestDetail, CareRequestWithMatches, CreateCareRequestPayload,
    OpenCareRequest, OpenRequestsQuery,
};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    care_match::MatchFilter,
    care_request::{CareRequest, CareRequestFilter, NewCareRequest, RequestStatus},
    notification::NotificationType,
    user::{Role, User},
};
use crate::services::{
    audit_service::AuditService, notification_service::NotificationService,
    provider_service::approved_profile, tariff_service::TariffService,
};
use crate::store::{CloseOutcome, Store};
use crate::utils::geo;

#[derive(Clone)]
pub struct CareRequestService {
    store: Arc<dyn Store>,
    tariffs: TariffService,
    notifications: NotificationService,
    audit: AuditService,
}

impl CareRequestService {
    pub fn new(
        store: Arc<dyn Store>,
        tariffs: TariffService,
        notifications: NotificationService,
        audit: AuditService,
    ) -> Self {
        Self {
            store,
            tariffs,
            notifications,
            audit,
        }
    }

    pub async fn create(
        &self,
        seeker: &User,
        payload: CreateCareRequestPayload,
        ip: Option<String>,
    ) -> Result<CareRequest> {
        if seeker.role != Role::Zorgvrager {
            return Err(Error::Forbidden(
                "Alleen zorgvragers kunnen een zorgvraag plaatsen".into(),
            ));
        }

        let rate = self.tariffs.intake_rate(payload.care_type).await?;
        let city = payload.city.trim().to_string();
        let (lat, lng) = geo::city_coordinates(&city);

        let request = self
            .store
            .insert_care_request(NewCareRequest {
                seeker_id: seeker.id,
                care_type: payload.care_type,
                description: payload.description.trim().to_string(),
                rate,
                hours_per_week: payload.hours_per_week,
                start_date: payload.start_date,
                lat,
                lng,
                city,
                address: payload.address,
            })
            .await?;

        tracing::info!(
            care_request_id = %request.id,
            care_type = %request.care_type,
            rate = %request.rate,
            "care request created"
        );
        self.audit
            .log(
                Some(seeker.id),
                AuditAction::ZorgvraagAangemaakt,
                format!(
                    "Zorgvraag {} ({}) in {}",
                    request.id,
                    request.care_type.label(),
                    request.city
                ),
                ip,
            )
            .await;
        Ok(request)
    }

    pub async fn mine(&self, seeker: &User) -> Result<Vec<CareRequestWithMatches>> {
        if seeker.role != Role::Zorgvrager {
            return Err(Error::Forbidden("Geen toegang".into()));
        }
        let requests = self
            .store
            .list_care_requests(&CareRequestFilter {
                seeker_id: Some(seeker.id),
                ..Default::default()
            })
            .await?;

        let mut items = Vec::with_capacity(requests.len());
        for request in requests {
            let matches = self
                .store
                .list_matches(&MatchFilter {
                    care_request_id: Some(request.id),
                    ..Default::default()
                })
                .await?;
            items.push(CareRequestWithMatches { request, matches });
        }
        Ok(items)
    }

    pub async fn open(
        &self,
        provider: &User,
        query: OpenRequestsQuery,
    ) -> Result<Vec<OpenCareRequest>> {
        if provider.role != Role::Zorgverlener {
            return Err(Error::Forbidden(
                "Alleen zorgverleners kunnen open zorgvragen bekijken".into(),
            ));
        }
        let profile = approved_profile(self.store.as_ref(), provider).await?;

        let requests = self
            .store
            .list_care_requests(&CareRequestFilter {
                status: Some(RequestStatus::Open),
                care_type: query.care_type,
                ..Default::default()
            })
            .await?;
        let responded: HashSet<Uuid> = self
            .store
            .list_matches(&MatchFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|m| m.care_request_id)
            .collect();

        let origin = provider.lat.zip(provider.lng);
        let nearby_only = query.nearby.unwrap_or(false) && origin.is_some();
        let radius = f64::from(profile.service_radius_km);

        Ok(requests
            .into_iter()
            .map(|request| {
                let distance_km =
                    origin.map(|from| geo::distance_km(from, (request.lat, request.lng)));
                OpenCareRequest {
                    already_responded: responded.contains(&request.id),
                    distance_km,
                    request,
                }
            })
            .filter(|item| !nearby_only || item.distance_km.is_some_and(|d| d <= radius))
            .collect())
    }

    async fn load(&self, id: Uuid) -> Result<CareRequest> {
        self.store
            .get_care_request(id)
            .await?
            .ok_or_else(|| Error::NotFound("Zorgvraag niet gevonden".into()))
    }

    pub async fn get(&self, user: &User, id: Uuid) -> Result<CareRequestDetail> {
        let request = self.load(id).await?;
        let all_matches = MatchFilter {
            care_request_id: Some(request.id),
            ..Default::default()
        };

        match user.role {
            Role::Beheer => {
                let matches = self.store.list_matches(&all_matches).await?;
                Ok(CareRequestDetail {
                    request,
                    matches: Some(matches),
                })
            }
            Role::Zorgvrager if request.seeker_id == user.id => {
                let matches = self.store.list_matches(&all_matches).await?;
                Ok(CareRequestDetail {
                    request,
                    matches: Some(matches),
                })
            }
            Role::Zorgverlener => {
                approved_profile(self.store.as_ref(), user).await?;
                let own = self
                    .store
                    .list_matches(&MatchFilter {
                        care_request_id: Some(request.id),
                        provider_id: Some(user.id),
                        ..Default::default()
                    })
                    .await?;
                if request.status != RequestStatus::Open && own.is_empty() {
                    return Err(Error::Forbidden("Geen toegang".into()));
                }
                Ok(CareRequestDetail {
                    request,
                    matches: Some(own),
                })
            }
            _ => Err(Error::Forbidden("Geen toegang".into())),
        }
    }

    async fn load_owned(&self, seeker: &User, id: Uuid) -> Result<CareRequest> {
        let request = self.load(id).await?;
        if request.seeker_id != seeker.id {
            return Err(Error::Forbidden("Geen toegang".into()));
        }
        Ok(request)
    }

    pub async fn cancel(&self, seeker: &User, id: Uuid) -> Result<CareRequest> {
        self.load_owned(seeker, id).await?;

        match self.store.cancel_care_request(id).await? {
            CloseOutcome::Closed { request, matches } => {
                for m in &matches {
                    self.notifications
                        .notify(
                            m.provider_id,
                            NotificationType::MatchGeannuleerd,
                            "Zorgvraag geannuleerd",
                            format!(
                                "De zorgvraag ({}) waarop u reageerde is geannuleerd.",
                                request.care_type.label()
                            ),
                            Some(json!({ "care_request_id": request.id })),
                        )
                        .await;
                }
                tracing::info!(care_request_id = %request.id, removed = matches.len(), "care request cancelled");
                Ok(request)
            }
            CloseOutcome::WrongStatus(_) => Err(Error::BadRequest(
                "Alleen open zorgvragen kunnen worden geannuleerd".into(),
            )),
            CloseOutcome::NotFound => Err(Error::NotFound("Zorgvraag niet gevonden".into())),
        }
    }

    pub async fn complete(&self, seeker: &User, id: Uuid) -> Result<CareRequest> {
        self.load_owned(seeker, id).await?;

        match self.store.complete_care_request(id, Utc::now()).await? {
            CloseOutcome::Closed { request, .. } => {
                tracing::info!(care_request_id = %request.id, "care request completed");
                Ok(request)
            }
            CloseOutcome::WrongStatus(_) => Err(Error::BadRequest(
                "Alleen gekoppelde zorgvragen kunnen worden afgerond".into(),
            )),
            CloseOutcome::NotFound => Err(Error::NotFound("Zorgvraag niet gevonden".into())),
        }
    }

    pub async fn admin_list(&self, status: Option<RequestStatus>) -> Result<AdminCareRequestList> {
        let items = self
            .store
            .list_care_requests(&CareRequestFilter {
                status,
                ..Default::default()
            })
            .await?;

        let mut counts = BTreeMap::new();
        for status in RequestStatus::ALL {
            let count = self.store.count_care_requests(Some(*status)).await?;
            counts.insert(status.as_str().to_string(), count);
        }
        let total = self.store.count_care_requests(None).await?;

        Ok(AdminCareRequestList {
            items,
            total,
            counts,
        })
    }
}
