use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
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
use crate::store::{CloseOutcome, ConfirmOutcome, Store};

const USER_COLUMNS: &str =
    "id, email, password_hash, role, name, phone, address, city, lat, lng, registered_at, active";
const PROFILE_COLUMNS: &str = "id, user_id, big_registration, kvk_number, care_types, service_radius_km, hourly_rate, bio, iban, approved, approved_at, approved_by, rejection_reason, document_status";
const DOCUMENT_COLUMNS: &str = "id, user_id, doc_type, name, storage_path, uploaded_at, verified";
const REQUEST_COLUMNS: &str = "id, seeker_id, care_type, description, rate, hours_per_week, start_date, status, lat, lng, city, address, created_at";
const MATCH_COLUMNS: &str =
    "id, care_request_id, provider_id, status, response_text, created_at, confirmed_at, completed_at";
const PAYMENT_COLUMNS: &str = "id, match_id, care_request_id, seeker_id, provider_id, amount, commission, processor_reference, status, created_at";
const TARIFF_COLUMNS: &str = "id, care_type, min_rate, max_rate, default_rate, commission_percentage, active, updated_at";
const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, title, body, data, read, created_at";
const AUDIT_COLUMNS: &str = "id, actor_id, action, detail, ip, created_at";

/// Postgres-backed store. Multi-row transitions run in one transaction with the
/// care request row locked.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn stored_status(raw: String) -> Result<RequestStatus> {
    raw.parse()
        .map_err(|e: crate::models::UnknownVariant| Error::Internal(e.to_string()))
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, role, name, phone, address, city, lat, lng)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.name)
            .bind(&user.phone)
            .bind(&user.address)
            .bind(&user.city)
            .bind(user.lat)
            .bind(user.lng)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_users(&self, filter: &UserFilter, limit: i64, offset: i64) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR role = $1)
               AND ($2::timestamptz IS NULL OR registered_at >= $2)
             ORDER BY registered_at DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(filter.role.map(|r| r.as_str()))
            .bind(filter.registered_since)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM users
               WHERE ($1::text IS NULL OR role = $1)
                 AND ($2::timestamptz IS NULL OR registered_at >= $2)"#,
        )
        .bind(filter.role.map(|r| r.as_str()))
        .bind(filter.registered_since)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn update_user_contact(&self, id: Uuid, update: &UserContactUpdate) -> Result<User> {
        let sql = format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 phone = COALESCE($3, phone),
                 address = COALESCE($4, address),
                 city = COALESCE($5, city),
                 lat = COALESCE($6, lat),
                 lng = COALESCE($7, lng)
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.phone)
            .bind(&update.address)
            .bind(&update.city)
            .bind(update.lat)
            .bind(update.lng)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_user_active(&self, id: Uuid, active: bool) -> Result<User> {
        let sql = format!("UPDATE users SET active = $2 WHERE id = $1 RETURNING {USER_COLUMNS}");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(active)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_provider_profile(
        &self,
        profile: NewProviderProfile,
    ) -> Result<ProviderProfile> {
        let sql = format!(
            "INSERT INTO provider_profiles
                (user_id, big_registration, kvk_number, care_types, service_radius_km, hourly_rate, bio)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PROFILE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProviderProfile>(&sql)
            .bind(profile.user_id)
            .bind(&profile.big_registration)
            .bind(&profile.kvk_number)
            .bind(&profile.care_types)
            .bind(profile.service_radius_km)
            .bind(profile.hourly_rate)
            .bind(&profile.bio)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_provider_profile(&self, user_id: Uuid) -> Result<Option<ProviderProfile>> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM provider_profiles WHERE user_id = $1");
        let row = sqlx::query_as::<_, ProviderProfile>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_provider_profiles(
        &self,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<ProviderProfile>> {
        let sql = format!(
            "SELECT p.{} FROM provider_profiles p
             JOIN users u ON u.id = p.user_id
             WHERE ($1::text IS NULL OR p.document_status = $1)
             ORDER BY u.registered_at DESC",
            PROFILE_COLUMNS.replace(", ", ", p.")
        );
        let rows = sqlx::query_as::<_, ProviderProfile>(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_unapproved_profiles(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM provider_profiles WHERE approved = FALSE",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn update_provider_profile(
        &self,
        user_id: Uuid,
        update: &ProviderProfileUpdate,
    ) -> Result<ProviderProfile> {
        let sql = format!(
            "UPDATE provider_profiles
             SET big_registration = COALESCE($2, big_registration),
                 kvk_number = COALESCE($3, kvk_number),
                 care_types = COALESCE($4, care_types),
                 service_radius_km = COALESCE($5, service_radius_km),
                 hourly_rate = COALESCE($6, hourly_rate),
                 bio = COALESCE($7, bio),
                 iban = COALESCE($8, iban)
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProviderProfile>(&sql)
            .bind(user_id)
            .bind(&update.big_registration)
            .bind(&update.kvk_number)
            .bind(&update.care_types)
            .bind(update.service_radius_km)
            .bind(update.hourly_rate)
            .bind(&update.bio)
            .bind(&update.iban)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn review_provider_profile(
        &self,
        user_id: Uuid,
        review: &ProviderReview,
    ) -> Result<ProviderProfile> {
        let row = match review {
            ProviderReview::Approve { reviewer, at } => {
                let sql = format!(
                    "UPDATE provider_profiles
                     SET approved = TRUE, approved_at = $2, approved_by = $3,
                         rejection_reason = NULL, document_status = 'GOEDGEKEURD'
                     WHERE user_id = $1
                     RETURNING {PROFILE_COLUMNS}"
                );
                sqlx::query_as::<_, ProviderProfile>(&sql)
                    .bind(user_id)
                    .bind(at)
                    .bind(reviewer)
                    .fetch_one(&self.pool)
                    .await?
            }
            ProviderReview::Reject { reason } => {
                let sql = format!(
                    "UPDATE provider_profiles
                     SET document_status = 'AFGEKEURD', rejection_reason = $2
                     WHERE user_id = $1
                     RETURNING {PROFILE_COLUMNS}"
                );
                sqlx::query_as::<_, ProviderProfile>(&sql)
                    .bind(user_id)
                    .bind(reason)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(row)
    }

    async fn insert_document(&self, document: NewDocument) -> Result<Document> {
        let sql = format!(
            "INSERT INTO documents (user_id, doc_type, name, storage_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {DOCUMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Document>(&sql)
            .bind(document.user_id)
            .bind(document.doc_type.as_str())
            .bind(&document.name)
            .bind(&document.storage_path)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1");
        let row = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_documents(&self, user_id: Uuid) -> Result<Vec<Document>> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC"
        );
        let rows = sqlx::query_as::<_, Document>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_unverified_document(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM documents WHERE id = $1 AND verified = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn mark_document_verified(&self, id: Uuid) -> Result<Document> {
        let sql = format!(
            "UPDATE documents SET verified = TRUE WHERE id = $1 RETURNING {DOCUMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_care_request(&self, request: NewCareRequest) -> Result<CareRequest> {
        let sql = format!(
            "INSERT INTO care_requests
                (seeker_id, care_type, description, rate, hours_per_week, start_date, lat, lng, city, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {REQUEST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CareRequest>(&sql)
            .bind(request.seeker_id)
            .bind(request.care_type.as_str())
            .bind(&request.description)
            .bind(request.rate)
            .bind(request.hours_per_week)
            .bind(request.start_date)
            .bind(request.lat)
            .bind(request.lng)
            .bind(&request.city)
            .bind(&request.address)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_care_request(&self, id: Uuid) -> Result<Option<CareRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM care_requests WHERE id = $1");
        let row = sqlx::query_as::<_, CareRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_care_requests(&self, filter: &CareRequestFilter) -> Result<Vec<CareRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM care_requests
             WHERE ($1::uuid IS NULL OR seeker_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR care_type = $3)
             ORDER BY created_at DESC
             LIMIT $4"
        );
        let rows = sqlx::query_as::<_, CareRequest>(&sql)
            .bind(filter.seeker_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.care_type.map(|t| t.as_str()))
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_care_requests(&self, status: Option<RequestStatus>) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM care_requests WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn count_care_requests_by_type(&self) -> Result<Vec<(CareType, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"SELECT care_type, COUNT(*) AS total FROM care_requests
               GROUP BY care_type
               ORDER BY total DESC, care_type"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(care_type, total)| {
                care_type
                    .parse::<CareType>()
                    .map(|t| (t, total))
                    .map_err(|e| Error::Internal(e.to_string()))
            })
            .collect()
    }

    async fn cancel_care_request(&self, id: Uuid) -> Result<CloseOutcome> {
        let mut tx = self.pool.begin().await?;

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM care_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(status) = status else {
            return Ok(CloseOutcome::NotFound);
        };
        let status = stored_status(status)?;
        if status != RequestStatus::Open {
            return Ok(CloseOutcome::WrongStatus(status));
        }

        let sql = format!(
            "UPDATE care_requests SET status = 'GEANNULEERD' WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, CareRequest>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let sql = format!(
            "DELETE FROM matches WHERE care_request_id = $1 AND status = 'VOORGESTELD'
             RETURNING {MATCH_COLUMNS}"
        );
        let matches = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CloseOutcome::Closed { request, matches })
    }

    async fn complete_care_request(&self, id: Uuid, at: DateTime<Utc>) -> Result<CloseOutcome> {
        let mut tx = self.pool.begin().await?;

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM care_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(status) = status else {
            return Ok(CloseOutcome::NotFound);
        };
        let status = stored_status(status)?;
        if status != RequestStatus::Gekoppeld {
            return Ok(CloseOutcome::WrongStatus(status));
        }

        let sql = format!(
            "UPDATE care_requests SET status = 'AFGEROND' WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, CareRequest>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let sql = format!(
            "UPDATE matches SET status = 'AFGEROND', completed_at = $2
             WHERE care_request_id = $1 AND status = 'BEVESTIGD'
             RETURNING {MATCH_COLUMNS}"
        );
        let matches = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(id)
            .bind(at)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CloseOutcome::Closed { request, matches })
    }

    async fn insert_match(&self, care_match: NewCareMatch) -> Result<CareMatch> {
        let sql = format!(
            "INSERT INTO matches (care_request_id, provider_id, response_text)
             SELECT $1, $2, $3
             WHERE EXISTS (
                 SELECT 1 FROM care_requests WHERE id = $1 AND status = 'OPEN' FOR SHARE
             )
             RETURNING {MATCH_COLUMNS}"
        );
        sqlx::query_as::<_, CareMatch>(&sql)
            .bind(care_match.care_request_id)
            .bind(care_match.provider_id)
            .bind(&care_match.response_text)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::BadRequest("Zorgvraag niet beschikbaar".into()))
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<CareMatch>> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1");
        let row = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<CareMatch>> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM matches
             WHERE ($1::uuid IS NULL OR care_request_id = $1)
               AND ($2::uuid IS NULL OR provider_id = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY created_at DESC
             LIMIT $4"
        );
        let rows = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(filter.care_request_id)
            .bind(filter.provider_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_matches(&self, status: Option<MatchStatus>) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn delete_proposed_match(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM matches WHERE id = $1 AND status = 'VOORGESTELD'")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn confirm_match(&self, confirm: ConfirmMatch) -> Result<ConfirmOutcome> {
        let mut tx = self.pool.begin().await?;

        // The row lock serialises concurrent confirmations of the same request.
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM care_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(confirm.care_request_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(status) = status else {
            return Ok(ConfirmOutcome::MatchUnavailable);
        };
        let status = stored_status(status)?;
        if status != RequestStatus::Open {
            return Ok(ConfirmOutcome::RequestNotOpen(status));
        }

        let sql = format!(
            "UPDATE matches SET status = 'BEVESTIGD', confirmed_at = $3
             WHERE id = $1 AND care_request_id = $2 AND status = 'VOORGESTELD'
             RETURNING {MATCH_COLUMNS}"
        );
        let confirmed = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(confirm.match_id)
            .bind(confirm.care_request_id)
            .bind(confirm.confirmed_at)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(confirmed) = confirmed else {
            return Ok(ConfirmOutcome::MatchUnavailable);
        };

        sqlx::query("UPDATE care_requests SET status = 'GEKOPPELD' WHERE id = $1")
            .bind(confirm.care_request_id)
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "DELETE FROM matches WHERE care_request_id = $1 AND id <> $2 RETURNING {MATCH_COLUMNS}"
        );
        let discarded = sqlx::query_as::<_, CareMatch>(&sql)
            .bind(confirm.care_request_id)
            .bind(confirm.match_id)
            .fetch_all(&mut *tx)
            .await?;

        let sql = format!(
            "INSERT INTO payments (match_id, care_request_id, seeker_id, provider_id, amount, commission)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PAYMENT_COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(confirm.payment.match_id)
            .bind(confirm.payment.care_request_id)
            .bind(confirm.payment.seeker_id)
            .bind(confirm.payment.provider_id)
            .bind(confirm.payment.amount)
            .bind(confirm.payment.commission)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ConfirmOutcome::Confirmed(Confirmation {
            confirmed,
            discarded,
            payment,
        }))
    }

    async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments
             WHERE ($1::uuid IS NULL OR seeker_id = $1)
               AND ($2::uuid IS NULL OR provider_id = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Payment>(&sql)
            .bind(filter.seeker_id)
            .bind(filter.provider_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_tariffs(&self) -> Result<Vec<TariffBand>> {
        let sql = format!("SELECT {TARIFF_COLUMNS} FROM tariff_bands ORDER BY care_type");
        let rows = sqlx::query_as::<_, TariffBand>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_tariff(&self, id: Uuid) -> Result<Option<TariffBand>> {
        let sql = format!("SELECT {TARIFF_COLUMNS} FROM tariff_bands WHERE id = $1");
        let row = sqlx::query_as::<_, TariffBand>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_tariff(&self, care_type: CareType) -> Result<Option<TariffBand>> {
        let sql = format!("SELECT {TARIFF_COLUMNS} FROM tariff_bands WHERE care_type = $1");
        let row = sqlx::query_as::<_, TariffBand>(&sql)
            .bind(care_type.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save_tariff(&self, band: &TariffBand) -> Result<TariffBand> {
        let sql = format!(
            "UPDATE tariff_bands
             SET min_rate = $2, max_rate = $3, default_rate = $4,
                 commission_percentage = $5, active = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING {TARIFF_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TariffBand>(&sql)
            .bind(band.id)
            .bind(band.min_rate)
            .bind(band.max_rate)
            .bind(band.default_rate)
            .bind(band.commission_percentage)
            .bind(band.active)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        let sql = format!(
            "INSERT INTO notifications (user_id, kind, title, body, data)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Notification>(&sql)
            .bind(notification.user_id)
            .bind(notification.kind.as_str())
            .bind(&notification.title)
            .bind(&notification.body)
            .bind(&notification.data)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let res = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64> {
        let res = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn insert_audit_entry(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry> {
        let sql = format!(
            "INSERT INTO audit_log (actor_id, action, detail, ip)
             VALUES ($1, $2, $3, $4)
             RETURNING {AUDIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AuditLogEntry>(&sql)
            .bind(entry.actor_id)
            .bind(entry.action.as_str())
            .bind(&entry.detail)
            .bind(&entry.ip)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_audit_entries(&self, limit: i64) -> Result<Vec<AuditLogEntry>> {
        let sql = format!("SELECT {AUDIT_COLUMNS} FROM audit_log ORDER BY created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, AuditLogEntry>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_audit_entries_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_log WHERE created_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }
}
