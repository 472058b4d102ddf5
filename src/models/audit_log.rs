use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    AuditAction, "audit action" {
        Aanmelden => "AANMELDEN",
        Inloggen => "INLOGGEN",
        ZorgvraagAangemaakt => "ZORGVRAAG_AANGEMAAKT",
        MatchAangemaakt => "MATCH_AANGEMAAKT",
        MatchBevestigd => "MATCH_BEVESTIGD",
        DocumentGoedgekeurd => "DOCUMENT_GOEDGEKEURD",
        ProfielGoedgekeurd => "PROFIEL_GOEDGEKEURD",
        ProfielAfgekeurd => "PROFIEL_AFGEKEURD",
        TariefGewijzigd => "TARIEF_GEWIJZIGD",
        GebruikerGedeactiveerd => "GEBRUIKER_GEDEACTIVEERD",
        GebruikerGeactiveerd => "GEBRUIKER_GEACTIVEERD",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub action: AuditAction,
    pub detail: String,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLogEntry {
    pub actor_id: Option<Uuid>,
    pub action: AuditAction,
    pub detail: String,
    pub ip: Option<String>,
}
