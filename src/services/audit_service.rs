use std::sync::Arc;

use chrono::{Timelike, Utc};
use uuid::Uuid;

use crate::dto::admin_dto::AuditLogResponse;
use crate::error::Result;
use crate::models::audit_log::{AuditAction, NewAuditLogEntry};
use crate::store::Store;

pub const DEFAULT_AUDIT_LIMIT: i64 = 50;
pub const MAX_AUDIT_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn Store>,
}

impl AuditService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Appends an entry; a failed write is logged but never fails the audited action.
    pub async fn log(
        &self,
        actor_id: Option<Uuid>,
        action: AuditAction,
        detail: impl Into<String>,
        ip: Option<String>,
    ) {
        let entry = NewAuditLogEntry {
            actor_id,
            action,
            detail: detail.into(),
            ip,
        };
        if let Err(e) = self.store.insert_audit_entry(entry).await {
            tracing::error!(action = %action, error = %e, "failed to write audit log entry");
        }
    }

    pub async fn recent(&self, limit: Option<i64>) -> Result<AuditLogResponse> {
        let limit = limit.unwrap_or(DEFAULT_AUDIT_LIMIT).clamp(1, MAX_AUDIT_LIMIT);
        let entries = self.store.list_audit_entries(limit).await?;

        let now = Utc::now();
        let midnight = now
            .with_hour(0)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        let today = self.store.count_audit_entries_since(midnight).await?;

        Ok(AuditLogResponse { entries, today })
    }
}
