use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    care_request::CareType,
    provider_profile::ProviderProfile,
    user::{Role, User},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupPayload {
    #[validate(email(message = "Ongeldig e-mailadres"))]
    pub email: String,
    #[validate(length(min = 8, message = "Wachtwoord moet minimaal 8 tekens bevatten"))]
    pub password: String,
    #[validate(length(min = 2, max = 120, message = "Naam is verplicht"))]
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub big_registration: Option<String>,
    pub kvk_number: Option<String>,
    #[serde(default)]
    pub care_types: Vec<CareType>,
    #[validate(range(min = 1, max = 250))]
    pub service_radius_km: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "E-mailadres is verplicht"))]
    pub email: String,
    #[validate(length(min = 1, message = "Wachtwoord is verplicht"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub redirect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub profile: Option<ProviderProfile>,
    pub redirect: String,
}
