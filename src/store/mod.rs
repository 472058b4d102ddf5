//! The relational store every service reads and writes through.
//!
//! Production runs against Postgres (`crate::database::pg_store::PgStore`); the
//! in-process [`memory::MemoryStore`] backs tests and the demo mode.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    audit_log::{AuditLogEntry, NewAuditLogEntry},
    care_match::{CareMatch, ConfirmMatch, Confirmation, MatchFilter, MatchStatus, NewCareMatch},
    care_request::{CareRequest, CareRequestFilter, CareType, NewCareRequest, RequestStatus},
    document::{Document, NewDocument},
    notification::{NewNotification, Notification},
    payment::{Payment, PaymentFilter},
    provider_profile::{
        DocumentStatus, NewProviderProfile, ProviderProfile, ProviderProfileUpdate,
        ProviderReview,
    },
    tariff::TariffBand,
    user::{NewUser, User, UserContactUpdate, UserFilter},
};

/// Result of the atomic confirmation write.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    Confirmed(Confirmation),
    /// The request was no longer OPEN when the write started.
    RequestNotOpen(RequestStatus),
    /// The match disappeared or is no longer a proposal.
    MatchUnavailable,
}

/// Result of closing a request (cancel or complete).
#[derive(Debug, Clone)]
pub enum CloseOutcome {
    /// The request moved to its new status; carries the matches that were affected.
    Closed {
        request: CareRequest,
        matches: Vec<CareMatch>,
    },
    WrongStatus(RequestStatus),
    NotFound,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self, filter: &UserFilter, limit: i64, offset: i64) -> Result<Vec<User>>;
    async fn count_users(&self, filter: &UserFilter) -> Result<i64>;
    async fn update_user_contact(&self, id: Uuid, update: &UserContactUpdate) -> Result<User>;
    async fn set_user_active(&self, id: Uuid, active: bool) -> Result<User>;

    async fn insert_provider_profile(&self, profile: NewProviderProfile)
        -> Result<ProviderProfile>;
    async fn get_provider_profile(&self, user_id: Uuid) -> Result<Option<ProviderProfile>>;
    async fn list_provider_profiles(
        &self,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<ProviderProfile>>;
    async fn count_unapproved_profiles(&self) -> Result<i64>;
    async fn update_provider_profile(
        &self,
        user_id: Uuid,
        update: &ProviderProfileUpdate,
    ) -> Result<ProviderProfile>;
    async fn review_provider_profile(
        &self,
        user_id: Uuid,
        review: &ProviderReview,
    ) -> Result<ProviderProfile>;

    async fn insert_document(&self, document: NewDocument) -> Result<Document>;
    async fn get_document(&self, id: Uuid) -> Result<Option<Document>>;
    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<Document>>;
    /// Deletes the document only while it is unverified; returns whether a row went away.
    async fn delete_unverified_document(&self, id: Uuid) -> Result<bool>;
    async fn mark_document_verified(&self, id: Uuid) -> Result<Document>;

    async fn insert_care_request(&self, request: NewCareRequest) -> Result<CareRequest>;
    async fn get_care_request(&self, id: Uuid) -> Result<Option<CareRequest>>;
    async fn list_care_requests(&self, filter: &CareRequestFilter) -> Result<Vec<CareRequest>>;
    async fn count_care_requests(&self, status: Option<RequestStatus>) -> Result<i64>;
    async fn count_care_requests_by_type(&self) -> Result<Vec<(CareType, i64)>>;
    /// OPEN → GEANNULEERD, removing proposals; returned matches are the removed ones.
    async fn cancel_care_request(&self, id: Uuid) -> Result<CloseOutcome>;
    /// GEKOPPELD → AFGEROND, completing the confirmed match.
    async fn complete_care_request(&self, id: Uuid, at: DateTime<Utc>) -> Result<CloseOutcome>;

    async fn insert_match(&self, care_match: NewCareMatch) -> Result<CareMatch>;
    async fn get_match(&self, id: Uuid) -> Result<Option<CareMatch>>;
    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<CareMatch>>;
    async fn count_matches(&self, status: Option<MatchStatus>) -> Result<i64>;
    /// Deletes the match only while it is still a proposal.
    async fn delete_proposed_match(&self, id: Uuid) -> Result<bool>;
    /// Confirms one match, links its request, discards the competing matches and
    /// records the payment as a single unit.
    async fn confirm_match(&self, confirm: ConfirmMatch) -> Result<ConfirmOutcome>;

    async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>>;

    async fn list_tariffs(&self) -> Result<Vec<TariffBand>>;
    async fn get_tariff(&self, id: Uuid) -> Result<Option<TariffBand>>;
    async fn find_tariff(&self, care_type: CareType) -> Result<Option<TariffBand>>;
    /// Overwrites the editable columns of a band with the given values.
    async fn save_tariff(&self, band: &TariffBand) -> Result<TariffBand>;

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>>;
    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64>;
    async fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64>;

    async fn insert_audit_entry(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry>;
    async fn list_audit_entries(&self, limit: i64) -> Result<Vec<AuditLogEntry>>;
    async fn count_audit_entries_since(&self, since: DateTime<Utc>) -> Result<i64>;
}
