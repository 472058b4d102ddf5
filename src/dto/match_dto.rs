use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Error;
use crate::models::{
    care_match::CareMatch, care_request::CareRequest, payment::Payment,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchPayload {
    #[serde(alias = "zorgvraag_id")]
    pub care_request_id: Option<Uuid>,
    #[serde(alias = "reactie_tekst")]
    #[validate(length(max = 2000))]
    pub response_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchActionPayload {
    pub match_id: Option<Uuid>,
    #[serde(alias = "actie")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Confirm,
    Reject,
}

impl std::str::FromStr for MatchAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bevestigen" | "confirm" => Ok(MatchAction::Confirm),
            "afwijzen" | "reject" => Ok(MatchAction::Reject),
            other => Err(Error::BadRequest(format!("Onbekende actie '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchResponse {
    #[serde(rename = "match")]
    pub care_match: CareMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchActionResponse {
    pub success: bool,
    pub match_id: Uuid,
    pub action: String,
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWithRequest {
    #[serde(flatten)]
    pub care_match: CareMatch,
    pub care_request: Option<CareRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMatchOverview {
    pub items: Vec<CareMatch>,
    pub total: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub commission_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub items: Vec<MatchWithRequest>,
}
