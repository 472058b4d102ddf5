use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CloseOutcome, ConfirmOutcome, Store};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::{AuditLogEntry, NewAuditLogEntry},
    care_match::{CareMatch, ConfirmMatch, Confirmation, MatchFilter, MatchStatus, NewCareMatch},
    care_request::{CareRequest, CareRequestFilter, CareType, NewCareRequest, RequestStatus},
    document::{Document, NewDocument},
    notification::{NewNotification, Notification},
    payment::{Payment, PaymentFilter, PaymentStatus},
    provider_profile::{
        DocumentStatus, NewProviderProfile, ProviderProfile, ProviderProfileUpdate,
        ProviderReview,
    },
    tariff::TariffBand,
    user::{NewUser, User, UserContactUpdate, UserFilter},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<ProviderProfile>,
    documents: Vec<Document>,
    care_requests: Vec<CareRequest>,
    matches: Vec<CareMatch>,
    payments: Vec<Payment>,
    tariffs: Vec<TariffBand>,
    notifications: Vec<Notification>,
    audit_log: Vec<AuditLogEntry>,
}

/// Thread-safe in-process store.
///
/// Rows live in insertion order, so iterating in reverse yields newest first. All
/// writes of a multi-row operation happen under one write lock.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the same tariff bands the initial migration seeds.
    pub fn seeded() -> Self {
        let tables = Tables {
            tariffs: default_tariff_bands(),
            ..Tables::default()
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Test hook for moving payments along, the way the payment processor would.
    pub async fn set_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment> {
        let mut tables = self.tables.write().await;
        let payment = tables
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound("Betaling niet gevonden".into()))?;
        payment.status = status;
        Ok(payment.clone())
    }
}

pub fn default_tariff_bands() -> Vec<TariffBand> {
    let now = Utc::now();
    let band = |care_type, min: i64, max: i64, default: i64| TariffBand {
        id: Uuid::new_v4(),
        care_type,
        min_rate: Decimal::new(min, 0),
        max_rate: Decimal::new(max, 0),
        default_rate: Decimal::new(default, 0),
        commission_percentage: Decimal::TEN,
        active: true,
        updated_at: now,
    };
    vec![
        band(CareType::PersoonlijkeVerzorging, 25, 40, 30),
        band(CareType::Verpleging, 28, 45, 34),
        band(CareType::Begeleiding, 22, 35, 28),
        band(CareType::HuishoudelijkeHulp, 18, 28, 22),
        band(CareType::Dagbesteding, 20, 32, 26),
        band(CareType::Nachtzorg, 28, 45, 35),
        band(CareType::Respijtzorg, 22, 36, 29),
        band(CareType::GeestelijkeGezondheidszorg, 30, 50, 38),
    ]
}

fn user_matches(user: &User, filter: &UserFilter) -> bool {
    filter.role.map_or(true, |role| user.role == role)
        && filter
            .registered_since
            .map_or(true, |since| user.registered_at >= since)
}

fn not_found(what: &str) -> Error {
    Error::NotFound(format!("{} not found", what))
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(Error::UniqueViolation("users_email_key".into()));
        }
        let row = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            name: user.name,
            phone: user.phone,
            address: user.address,
            city: user.city,
            lat: user.lat,
            lng: user.lng,
            registered_at: Utc::now(),
            active: true,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, filter: &UserFilter, limit: i64, offset: i64) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .rev()
            .filter(|u| user_matches(u, filter))
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| user_matches(u, filter))
            .count() as i64)
    }

    async fn update_user_contact(&self, id: Uuid, update: &UserContactUpdate) -> Result<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User"))?;
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if update.phone.is_some() {
            user.phone = update.phone.clone();
        }
        if update.address.is_some() {
            user.address = update.address.clone();
        }
        if update.city.is_some() {
            user.city = update.city.clone();
        }
        if update.lat.is_some() {
            user.lat = update.lat;
        }
        if update.lng.is_some() {
            user.lng = update.lng;
        }
        Ok(user.clone())
    }

    async fn set_user_active(&self, id: Uuid, active: bool) -> Result<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User"))?;
        user.active = active;
        Ok(user.clone())
    }

    async fn insert_provider_profile(
        &self,
        profile: NewProviderProfile,
    ) -> Result<ProviderProfile> {
        let mut tables = self.tables.write().await;
        if tables.profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(Error::UniqueViolation("provider_profiles_user_id_key".into()));
        }
        let row = ProviderProfile {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            big_registration: profile.big_registration,
            kvk_number: profile.kvk_number,
            care_types: profile.care_types,
            service_radius_km: profile.service_radius_km,
            hourly_rate: profile.hourly_rate,
            bio: profile.bio,
            iban: None,
            approved: false,
            approved_at: None,
            approved_by: None,
            rejection_reason: None,
            document_status: DocumentStatus::InBehandeling,
        };
        tables.profiles.push(row.clone());
        Ok(row)
    }

    async fn get_provider_profile(&self, user_id: Uuid) -> Result<Option<ProviderProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_provider_profiles(
        &self,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<ProviderProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .rev()
            .filter(|p| status.map_or(true, |s| p.document_status == s))
            .cloned()
            .collect())
    }

    async fn count_unapproved_profiles(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().filter(|p| !p.approved).count() as i64)
    }

    async fn update_provider_profile(
        &self,
        user_id: Uuid,
        update: &ProviderProfileUpdate,
    ) -> Result<ProviderProfile> {
        let mut tables = self.tables.write().await;
        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or_else(|| not_found("Provider profile"))?;
        if update.big_registration.is_some() {
            profile.big_registration = update.big_registration.clone();
        }
        if update.kvk_number.is_some() {
            profile.kvk_number = update.kvk_number.clone();
        }
        if let Some(care_types) = &update.care_types {
            profile.care_types = care_types.clone();
        }
        if let Some(radius) = update.service_radius_km {
            profile.service_radius_km = radius;
        }
        if update.hourly_rate.is_some() {
            profile.hourly_rate = update.hourly_rate;
        }
        if update.bio.is_some() {
            profile.bio = update.bio.clone();
        }
        if update.iban.is_some() {
            profile.iban = update.iban.clone();
        }
        Ok(profile.clone())
    }

    async fn review_provider_profile(
        &self,
        user_id: Uuid,
        review: &ProviderReview,
    ) -> Result<ProviderProfile> {
        let mut tables = self.tables.write().await;
        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or_else(|| not_found("Provider profile"))?;
        match review {
            ProviderReview::Approve { reviewer, at } => {
                profile.approved = true;
                profile.approved_at = Some(*at);
                profile.approved_by = Some(*reviewer);
                profile.rejection_reason = None;
                profile.document_status = DocumentStatus::Goedgekeurd;
            }
            ProviderReview::Reject { reason } => {
                profile.document_status = DocumentStatus::Afgekeurd;
                profile.rejection_reason = Some(reason.clone());
            }
        }
        Ok(profile.clone())
    }

    async fn insert_document(&self, document: NewDocument) -> Result<Document> {
        let mut tables = self.tables.write().await;
        let row = Document {
            id: Uuid::new_v4(),
            user_id: document.user_id,
            doc_type: document.doc_type,
            name: document.name,
            storage_path: document.storage_path,
            uploaded_at: Utc::now(),
            verified: false,
        };
        tables.documents.push(row.clone());
        Ok(row)
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>> {
        let tables = self.tables.read().await;
        Ok(tables.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<Document>> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .iter()
            .rev()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_unverified_document(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.documents.len();
        tables.documents.retain(|d| !(d.id == id && !d.verified));
        Ok(tables.documents.len() < before)
    }

    async fn mark_document_verified(&self, id: Uuid) -> Result<Document> {
        let mut tables = self.tables.write().await;
        let document = tables
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found("Document"))?;
        document.verified = true;
        Ok(document.clone())
    }

    async fn insert_care_request(&self, request: NewCareRequest) -> Result<CareRequest> {
        let mut tables = self.tables.write().await;
        let row = CareRequest {
            id: Uuid::new_v4(),
            seeker_id: request.seeker_id,
            care_type: request.care_type,
            description: request.description,
            rate: request.rate,
            hours_per_week: request.hours_per_week,
            start_date: request.start_date,
            status: RequestStatus::Open,
            lat: request.lat,
            lng: request.lng,
            city: request.city,
            address: request.address,
            created_at: Utc::now(),
        };
        tables.care_requests.push(row.clone());
        Ok(row)
    }

    async fn get_care_request(&self, id: Uuid) -> Result<Option<CareRequest>> {
        let tables = self.tables.read().await;
        Ok(tables.care_requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list_care_requests(&self, filter: &CareRequestFilter) -> Result<Vec<CareRequest>> {
        let tables = self.tables.read().await;
        let limit = filter.limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(tables
            .care_requests
            .iter()
            .rev()
            .filter(|r| filter.seeker_id.map_or(true, |id| r.seeker_id == id))
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| filter.care_type.map_or(true, |t| r.care_type == t))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_care_requests(&self, status: Option<RequestStatus>) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .care_requests
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .count() as i64)
    }

    async fn count_care_requests_by_type(&self) -> Result<Vec<(CareType, i64)>> {
        let tables = self.tables.read().await;
        let mut counts: Vec<(CareType, i64)> = Vec::new();
        for request in &tables.care_requests {
            match counts.iter_mut().find(|(t, _)| *t == request.care_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((request.care_type, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        Ok(counts)
    }

    async fn cancel_care_request(&self, id: Uuid) -> Result<CloseOutcome> {
        let mut tables = self.tables.write().await;
        let Some(request) = tables.care_requests.iter_mut().find(|r| r.id == id) else {
            return Ok(CloseOutcome::NotFound);
        };
        if request.status != RequestStatus::Open {
            return Ok(CloseOutcome::WrongStatus(request.status));
        }
        request.status = RequestStatus::Geannuleerd;
        let request = request.clone();

        let (removed, kept): (Vec<CareMatch>, Vec<CareMatch>) =
            std::mem::take(&mut tables.matches)
                .into_iter()
                .partition(|m| m.care_request_id == id && m.status == MatchStatus::Voorgesteld);
        tables.matches = kept;
        Ok(CloseOutcome::Closed {
            request,
            matches: removed,
        })
    }

    async fn complete_care_request(&self, id: Uuid, at: DateTime<Utc>) -> Result<CloseOutcome> {
        let mut tables = self.tables.write().await;
        let Some(request) = tables.care_requests.iter_mut().find(|r| r.id == id) else {
            return Ok(CloseOutcome::NotFound);
        };
        if request.status != RequestStatus::Gekoppeld {
            return Ok(CloseOutcome::WrongStatus(request.status));
        }
        request.status = RequestStatus::Afgerond;
        let request = request.clone();

        let mut completed = Vec::new();
        for m in tables
            .matches
            .iter_mut()
            .filter(|m| m.care_request_id == id && m.status == MatchStatus::Bevestigd)
        {
            m.status = MatchStatus::Afgerond;
            m.completed_at = Some(at);
            completed.push(m.clone());
        }
        Ok(CloseOutcome::Closed {
            request,
            matches: completed,
        })
    }

    async fn insert_match(&self, care_match: NewCareMatch) -> Result<CareMatch> {
        let mut tables = self.tables.write().await;
        let open = tables.care_requests.iter().any(|r| {
            r.id == care_match.care_request_id && r.status == RequestStatus::Open
        });
        if !open {
            return Err(Error::BadRequest("Zorgvraag niet beschikbaar".into()));
        }
        let duplicate = tables.matches.iter().any(|m| {
            m.care_request_id == care_match.care_request_id
                && m.provider_id == care_match.provider_id
        });
        if duplicate {
            return Err(Error::UniqueViolation(
                "matches_care_request_id_provider_id_key".into(),
            ));
        }
        let row = CareMatch {
            id: Uuid::new_v4(),
            care_request_id: care_match.care_request_id,
            provider_id: care_match.provider_id,
            status: MatchStatus::Voorgesteld,
            response_text: care_match.response_text,
            created_at: Utc::now(),
            confirmed_at: None,
            completed_at: None,
        };
        tables.matches.push(row.clone());
        Ok(row)
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<CareMatch>> {
        let tables = self.tables.read().await;
        Ok(tables.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<CareMatch>> {
        let tables = self.tables.read().await;
        let limit = filter.limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(tables
            .matches
            .iter()
            .rev()
            .filter(|m| filter.care_request_id.map_or(true, |id| m.care_request_id == id))
            .filter(|m| filter.provider_id.map_or(true, |id| m.provider_id == id))
            .filter(|m| filter.status.map_or(true, |s| m.status == s))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_matches(&self, status: Option<MatchStatus>) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .iter()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .count() as i64)
    }

    async fn delete_proposed_match(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.matches.len();
        tables
            .matches
            .retain(|m| !(m.id == id && m.status == MatchStatus::Voorgesteld));
        Ok(tables.matches.len() < before)
    }

    async fn confirm_match(&self, confirm: ConfirmMatch) -> Result<ConfirmOutcome> {
        let mut tables = self.tables.write().await;

        let Some(status) = tables
            .care_requests
            .iter()
            .find(|r| r.id == confirm.care_request_id)
            .map(|r| r.status)
        else {
            return Ok(ConfirmOutcome::MatchUnavailable);
        };
        if status != RequestStatus::Open {
            return Ok(ConfirmOutcome::RequestNotOpen(status));
        }
        let proposal_exists = tables.matches.iter().any(|m| {
            m.id == confirm.match_id
                && m.care_request_id == confirm.care_request_id
                && m.status == MatchStatus::Voorgesteld
        });
        if !proposal_exists {
            return Ok(ConfirmOutcome::MatchUnavailable);
        }

        if let Some(request) = tables
            .care_requests
            .iter_mut()
            .find(|r| r.id == confirm.care_request_id)
        {
            request.status = RequestStatus::Gekoppeld;
        }

        let mut confirmed = None;
        let mut discarded = Vec::new();
        let mut kept = Vec::with_capacity(tables.matches.len());
        for mut m in std::mem::take(&mut tables.matches) {
            if m.id == confirm.match_id {
                m.status = MatchStatus::Bevestigd;
                m.confirmed_at = Some(confirm.confirmed_at);
                confirmed = Some(m.clone());
                kept.push(m);
            } else if m.care_request_id == confirm.care_request_id {
                discarded.push(m);
            } else {
                kept.push(m);
            }
        }
        tables.matches = kept;
        let confirmed = confirmed.ok_or_else(|| not_found("Match"))?;

        let payment = Payment {
            id: Uuid::new_v4(),
            match_id: confirm.payment.match_id,
            care_request_id: confirm.payment.care_request_id,
            seeker_id: confirm.payment.seeker_id,
            provider_id: confirm.payment.provider_id,
            amount: confirm.payment.amount,
            commission: confirm.payment.commission,
            processor_reference: None,
            status: PaymentStatus::Open,
            created_at: Utc::now(),
        };
        tables.payments.push(payment.clone());

        Ok(ConfirmOutcome::Confirmed(Confirmation {
            confirmed,
            discarded,
            payment,
        }))
    }

    async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .iter()
            .rev()
            .filter(|p| filter.seeker_id.map_or(true, |id| p.seeker_id == id))
            .filter(|p| filter.provider_id.map_or(true, |id| p.provider_id == id))
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }

    async fn list_tariffs(&self) -> Result<Vec<TariffBand>> {
        let tables = self.tables.read().await;
        let mut tariffs = tables.tariffs.clone();
        tariffs.sort_by(|a, b| a.care_type.as_str().cmp(b.care_type.as_str()));
        Ok(tariffs)
    }

    async fn get_tariff(&self, id: Uuid) -> Result<Option<TariffBand>> {
        let tables = self.tables.read().await;
        Ok(tables.tariffs.iter().find(|t| t.id == id).cloned())
    }

    async fn find_tariff(&self, care_type: CareType) -> Result<Option<TariffBand>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tariffs
            .iter()
            .find(|t| t.care_type == care_type)
            .cloned())
    }

    async fn save_tariff(&self, band: &TariffBand) -> Result<TariffBand> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .tariffs
            .iter_mut()
            .find(|t| t.id == band.id)
            .ok_or_else(|| not_found("Tariff"))?;
        stored.min_rate = band.min_rate;
        stored.max_rate = band.max_rate;
        stored.default_rate = band.default_rate;
        stored.commission_percentage = band.commission_percentage;
        stored.active = band.active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        let mut tables = self.tables.write().await;
        let row = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            data: notification.data,
            read: false,
            created_at: Utc::now(),
        };
        tables.notifications.push(row.clone());
        Ok(row)
    }

    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as i64)
    }

    async fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let mut updated = 0;
        for n in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn insert_audit_entry(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry> {
        let mut tables = self.tables.write().await;
        let row = AuditLogEntry {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action,
            detail: entry.detail,
            ip: entry.ip,
            created_at: Utc::now(),
        };
        tables.audit_log.push(row.clone());
        Ok(row)
    }

    async fn list_audit_entries(&self, limit: i64) -> Result<Vec<AuditLogEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .audit_log
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_audit_entries_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .audit_log
            .iter()
            .filter(|e| e.created_at >= since)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".into(),
            role,
            name: "Test".into(),
            phone: None,
            address: None,
            city: None,
            lat: None,
            lng: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store
            .insert_user(new_user("a@example.nl", Role::Zorgvrager))
            .await
            .unwrap();
        let err = store
            .insert_user(new_user("a@example.nl", Role::Zorgverlener))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(c) if c == "users_email_key"));
    }

    #[tokio::test]
    async fn lists_are_newest_first() {
        let store = MemoryStore::new();
        let first = store
            .insert_user(new_user("first@example.nl", Role::Zorgvrager))
            .await
            .unwrap();
        let second = store
            .insert_user(new_user("second@example.nl", Role::Zorgvrager))
            .await
            .unwrap();
        let users = store
            .list_users(&UserFilter::default(), 10, 0)
            .await
            .unwrap();
        assert_eq!(users[0].id, second.id);
        assert_eq!(users[1].id, first.id);
    }

    #[tokio::test]
    async fn seeded_store_has_a_band_per_care_type() {
        let store = MemoryStore::seeded();
        let tariffs = store.list_tariffs().await.unwrap();
        assert_eq!(tariffs.len(), CareType::ALL.len());
        let nachtzorg = store.find_tariff(CareType::Nachtzorg).await.unwrap().unwrap();
        assert_eq!(nachtzorg.default_rate, Decimal::new(35, 0));
    }

    #[tokio::test]
    async fn verified_documents_survive_conditional_delete() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let doc = store
            .insert_document(NewDocument {
                user_id: owner,
                doc_type: crate::models::document::DocumentType::Vog,
                name: "vog.pdf".into(),
                storage_path: "x".into(),
            })
            .await
            .unwrap();
        store.mark_document_verified(doc.id).await.unwrap();
        assert!(!store.delete_unverified_document(doc.id).await.unwrap());
        assert_eq!(store.list_documents(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn responses_need_an_open_request() {
        let store = MemoryStore::new();
        let request = store
            .insert_care_request(NewCareRequest {
                seeker_id: Uuid::new_v4(),
                care_type: CareType::Begeleiding,
                description: "Hulp bij boodschappen".into(),
                rate: Decimal::new(30, 0),
                hours_per_week: None,
                start_date: None,
                lat: 52.37,
                lng: 4.9,
                city: "Amsterdam".into(),
                address: None,
            })
            .await
            .unwrap();
        store.cancel_care_request(request.id).await.unwrap();

        let err = store
            .insert_match(NewCareMatch {
                care_request_id: request.id,
                provider_id: Uuid::new_v4(),
                response_text: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(m) if m == "Zorgvraag niet beschikbaar"));

        let missing = store
            .insert_match(NewCareMatch {
                care_request_id: Uuid::new_v4(),
                provider_id: Uuid::new_v4(),
                response_text: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(missing, Error::BadRequest(_)));
        assert!(store.list_matches(&MatchFilter::default()).await.unwrap().is_empty());
    }
}
