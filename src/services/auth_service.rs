use std::sync::Arc;

use crate::config::Config;
use crate::dto::auth_dto::{AuthResponse, LoginPayload, SessionResponse, SignupPayload};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    provider_profile::{NewProviderProfile, DEFAULT_SERVICE_RADIUS_KM},
    user::{NewUser, Role, User},
};
use crate::services::audit_service::AuditService;
use crate::store::Store;
use crate::utils::{crypto, geo, token};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    audit: AuditService,
    jwt_secret: String,
    jwt_ttl_hours: i64,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService, config: &Config) -> Self {
        Self {
            store,
            audit,
            jwt_secret: config.jwt_secret.clone(),
            jwt_ttl_hours: config.jwt_ttl_hours,
        }
    }

    pub async fn signup(&self, payload: SignupPayload, ip: Option<String>) -> Result<User> {
        if payload.role == Role::Beheer {
            return Err(Error::Forbidden(
                "Beheerdersaccounts kunnen niet zelf worden aangemaakt".into(),
            ));
        }

        let email = normalize_email(&payload.email);
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("E-mailadres is al in gebruik".into()));
        }

        let coordinates = payload.city.as_deref().map(geo::city_coordinates);
        let new_user = NewUser {
            email,
            password_hash: crypto::hash_password(&payload.password)?,
            role: payload.role,
            name: payload.name.trim().to_string(),
            phone: payload.phone,
            address: payload.address,
            city: payload.city,
            lat: coordinates.map(|c| c.0),
            lng: coordinates.map(|c| c.1),
        };
        let user = self.store.insert_user(new_user).await.map_err(|e| match e {
            Error::UniqueViolation(_) => Error::Conflict("E-mailadres is al in gebruik".into()),
            other => other,
        })?;

        if user.role == Role::Zorgverlener {
            self.store
                .insert_provider_profile(NewProviderProfile {
                    user_id: user.id,
                    big_registration: payload.big_registration,
                    kvk_number: payload.kvk_number,
                    care_types: payload
                        .care_types
                        .iter()
                        .map(|t| t.as_str().to_string())
                        .collect(),
                    service_radius_km: payload
                        .service_radius_km
                        .unwrap_or(DEFAULT_SERVICE_RADIUS_KM),
                    hourly_rate: payload.hourly_rate,
                    bio: payload.bio,
                })
                .await?;
        }

        tracing::info!(user_id = %user.id, role = %user.role, "user signed up");
        self.audit
            .log(
                Some(user.id),
                AuditAction::Aanmelden,
                format!("Nieuwe {} aangemeld: {}", user.role, user.email),
                ip,
            )
            .await;
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload, ip: Option<String>) -> Result<AuthResponse> {
        let email = normalize_email(&payload.email);
        let invalid = || Error::Unauthorized("Onjuist e-mailadres of wachtwoord".into());

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !crypto::verify_password(&payload.password, &user.password_hash) {
            return Err(invalid());
        }
        if !user.active {
            return Err(Error::Forbidden("Uw account is gedeactiveerd".into()));
        }

        let token = token::issue_token(user.id, user.role, &self.jwt_secret, self.jwt_ttl_hours)?;
        self.audit
            .log(
                Some(user.id),
                AuditAction::Inloggen,
                format!("{} ingelogd", user.email),
                ip,
            )
            .await;

        Ok(AuthResponse {
            token,
            redirect: user.role.dashboard_path().to_string(),
            user,
        })
    }

    pub async fn session(&self, user: User) -> Result<SessionResponse> {
        let profile = match user.role {
            Role::Zorgverlener => self.store.get_provider_profile(user.id).await?,
            _ => None,
        };
        Ok(SessionResponse {
            redirect: user.role.dashboard_path().to_string(),
            profile,
            user,
        })
    }
}
