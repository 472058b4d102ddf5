use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wire_enum;

wire_enum! {
    Role, "role" {
        Zorgvrager => "ZORGVRAGER",
        Zorgverlener => "ZORGVERLENER",
        Beheer => "BEHEER",
    }
}

impl Role {
    /// Landing page a freshly authenticated session is sent to.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Beheer => "/beheer/dashboard",
            Role::Zorgverlener => "/zorgverlener/dashboard",
            Role::Zorgvrager => "/zorgvrager/dashboard",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct UserContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub registered_since: Option<DateTime<Utc>>,
}
