use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    DocumentType, "document type" {
        Vog => "VOG",
        Big => "BIG",
        Diploma => "DIPLOMA",
        Kvk => "KVK",
        Overig => "OVERIG",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub name: String,
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub verified: bool,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: Uuid,
    pub doc_type: DocumentType,
    pub name: String,
    pub storage_path: String,
}
