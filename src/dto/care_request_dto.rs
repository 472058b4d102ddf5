use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    care_match::CareMatch,
    care_request::{CareRequest, CareType, RequestStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCareRequestPayload {
    pub care_type: CareType,
    #[validate(length(min = 20, message = "Beschrijving moet minimaal 20 tekens bevatten"))]
    pub description: String,
    #[validate(length(min = 2, message = "Plaats is verplicht"))]
    pub city: String,
    pub address: Option<String>,
    #[validate(range(min = 1, max = 168))]
    pub hours_per_week: Option<i32>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpenRequestsQuery {
    pub care_type: Option<CareType>,
    pub nearby: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminCareRequestQuery {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareRequestWithMatches {
    #[serde(flatten)]
    pub request: CareRequest,
    pub matches: Vec<CareMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCareRequest {
    #[serde(flatten)]
    pub request: CareRequest,
    pub distance_km: Option<f64>,
    pub already_responded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareRequestListResponse<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCareRequestList {
    pub items: Vec<CareRequest>,
    pub total: i64,
    pub counts: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareRequestDetail {
    #[serde(flatten)]
    pub request: CareRequest,
    /// Only the owner and administrators see every response.
    pub matches: Option<Vec<CareMatch>>,
}
