use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    care_request::CareType,
    document::Document,
    provider_profile::{DocumentStatus, ProviderProfile},
    user::User,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 2))]
    pub city: Option<String>,
    pub big_registration: Option<String>,
    pub kvk_number: Option<String>,
    pub care_types: Option<Vec<CareType>>,
    #[validate(range(min = 1, max = 250))]
    pub service_radius_km: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(custom(function = "crate::utils::validation::dutch_iban"))]
    pub iban: Option<String>,
}

impl UpdateProfilePayload {
    pub fn touches_provider_fields(&self) -> bool {
        self.big_registration.is_some()
            || self.kvk_number.is_some()
            || self.care_types.is_some()
            || self.service_radius_km.is_some()
            || self.hourly_rate.is_some()
            || self.bio.is_some()
            || self.iban.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
    pub profile: Option<ProviderProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStep {
    pub key: &'static str,
    pub label: &'static str,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingResponse {
    pub steps: Vec<OnboardingStep>,
    pub completed: usize,
    pub total: usize,
    pub approved: bool,
    pub document_status: DocumentStatus,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderApplicationQuery {
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderApplication {
    pub user: User,
    pub profile: ProviderProfile,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderApplicationList {
    pub items: Vec<ProviderApplication>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectProviderPayload {
    #[validate(
        custom(function = "crate::utils::validation::not_blank"),
        length(max = 1000)
    )]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub items: Vec<Document>,
}
