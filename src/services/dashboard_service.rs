use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::dto::dashboard_dto::{
    AnalyticsResponse, BeheerDashboard, CareTypeCount, DashboardResponse, ProviderDashboard,
    SeekerDashboard,
};
use crate::error::{Error, Result};
use crate::models::{
    care_match::{MatchFilter, MatchStatus},
    care_request::{CareRequestFilter, RequestStatus},
    payment::{PaymentFilter, PaymentStatus},
    user::{Role, User, UserFilter},
};
use crate::store::Store;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn Store>,
}

/// `part / whole` as a percentage with one decimal; zero when `whole` is zero.
pub fn percentage(part: i64, whole: i64) -> Decimal {
    if whole <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)).round_dp(1)
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn for_user(&self, user: &User) -> Result<DashboardResponse> {
        match user.role {
            Role::Zorgvrager => self.seeker(user).await.map(DashboardResponse::Zorgvrager),
            Role::Zorgverlener => self.provider(user).await.map(DashboardResponse::Zorgverlener),
            Role::Beheer => self.beheer().await.map(DashboardResponse::Beheer),
        }
    }

    async fn seeker(&self, user: &User) -> Result<SeekerDashboard> {
        let requests = self
            .store
            .list_care_requests(&CareRequestFilter {
                seeker_id: Some(user.id),
                ..Default::default()
            })
            .await?;
        let count = |status| requests.iter().filter(|r| r.status == status).count();

        Ok(SeekerDashboard {
            open: count(RequestStatus::Open),
            linked: count(RequestStatus::Gekoppeld),
            completed: count(RequestStatus::Afgerond),
            unread_notifications: self.store.count_unread_notifications(user.id).await?,
            recent_requests: requests.iter().take(10).cloned().collect(),
        })
    }

    async fn provider(&self, user: &User) -> Result<ProviderDashboard> {
        let profile = self
            .store
            .get_provider_profile(user.id)
            .await?
            .ok_or_else(|| Error::NotFound("Zorgverlenersprofiel niet gevonden".into()))?;

        let open_requests = if profile.approved {
            self.store
                .list_care_requests(&CareRequestFilter {
                    status: Some(RequestStatus::Open),
                    limit: Some(5),
                    ..Default::default()
                })
                .await?
        } else {
            Vec::new()
        };
        let matches = self
            .store
            .list_matches(&MatchFilter {
                provider_id: Some(user.id),
                ..Default::default()
            })
            .await?;
        let count = |status| matches.iter().filter(|m| m.status == status).count();

        Ok(ProviderDashboard {
            approved: profile.approved,
            document_status: profile.document_status,
            open_requests,
            confirmed: count(MatchStatus::Bevestigd),
            completed: count(MatchStatus::Afgerond),
            recent_matches: matches.iter().take(5).cloned().collect(),
            unread_notifications: self.store.count_unread_notifications(user.id).await?,
        })
    }

    async fn beheer(&self) -> Result<BeheerDashboard> {
        let all = UserFilter::default();
        let by_role = |role| UserFilter {
            role: Some(role),
            registered_since: None,
        };

        Ok(BeheerDashboard {
            total_users: self.store.count_users(&all).await?,
            providers: self.store.count_users(&by_role(Role::Zorgverlener)).await?,
            seekers: self.store.count_users(&by_role(Role::Zorgvrager)).await?,
            pending_approvals: self.store.count_unapproved_profiles().await?,
            open_requests: self
                .store
                .count_care_requests(Some(RequestStatus::Open))
                .await?,
            total_matches: self.store.count_matches(None).await?,
            newest_users: self.store.list_users(&all, 5, 0).await?,
            newest_requests: self
                .store
                .list_care_requests(&CareRequestFilter {
                    limit: Some(5),
                    ..Default::default()
                })
                .await?,
        })
    }

    pub async fn analytics(&self) -> Result<AnalyticsResponse> {
        let total_users = self.store.count_users(&UserFilter::default()).await?;
        let new_users_30d = self
            .store
            .count_users(&UserFilter {
                role: None,
                registered_since: Some(Utc::now() - Duration::days(30)),
            })
            .await?;
        let total_requests = self.store.count_care_requests(None).await?;
        let total_matches = self.store.count_matches(None).await?;
        let confirmed_matches = self.store.count_matches(Some(MatchStatus::Bevestigd)).await?
            + self.store.count_matches(Some(MatchStatus::Afgerond)).await?;

        let payments = self.store.list_payments(&PaymentFilter::default()).await?;
        let paid: Vec<_> = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Betaald)
            .collect();
        let revenue: Decimal = paid.iter().map(|p| p.amount).sum();
        let commission: Decimal = paid.iter().map(|p| p.commission).sum();

        let requests_per_care_type = self
            .store
            .count_care_requests_by_type()
            .await?
            .into_iter()
            .map(|(care_type, count)| CareTypeCount {
                care_type: care_type.as_str().to_string(),
                label: care_type.label().to_string(),
                count,
            })
            .collect();

        Ok(AnalyticsResponse {
            total_users,
            new_users_30d,
            total_requests,
            total_matches,
            confirmed_matches,
            match_conversion_pct: percentage(confirmed_matches, total_matches),
            revenue,
            commission,
            payment_success_pct: percentage(paid.len() as i64, payments.len() as i64),
            requests_per_care_type,
        })
    }
}
