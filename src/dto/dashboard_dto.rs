use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    care_match::CareMatch,
    care_request::CareRequest,
    provider_profile::DocumentStatus,
    user::User,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerDashboard {
    pub recent_requests: Vec<CareRequest>,
    pub open: usize,
    pub linked: usize,
    pub completed: usize,
    pub unread_notifications: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDashboard {
    pub approved: bool,
    pub document_status: DocumentStatus,
    pub open_requests: Vec<CareRequest>,
    pub recent_matches: Vec<CareMatch>,
    pub confirmed: usize,
    pub completed: usize,
    pub unread_notifications: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeheerDashboard {
    pub total_users: i64,
    pub providers: i64,
    pub seekers: i64,
    pub pending_approvals: i64,
    pub open_requests: i64,
    pub total_matches: i64,
    pub newest_users: Vec<User>,
    pub newest_requests: Vec<CareRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum DashboardResponse {
    #[serde(rename = "ZORGVRAGER")]
    Zorgvrager(SeekerDashboard),
    #[serde(rename = "ZORGVERLENER")]
    Zorgverlener(ProviderDashboard),
    #[serde(rename = "BEHEER")]
    Beheer(BeheerDashboard),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareTypeCount {
    pub care_type: String,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub total_users: i64,
    pub new_users_30d: i64,
    pub total_requests: i64,
    pub total_matches: i64,
    pub confirmed_matches: i64,
    pub match_conversion_pct: Decimal,
    pub revenue: Decimal,
    pub commission: Decimal,
    pub payment_success_pct: Decimal,
    pub requests_per_care_type: Vec<CareTypeCount>,
}
