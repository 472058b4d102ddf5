use std::sync::Arc;

use crate::dto::{admin_dto::UserListQuery, profile_dto::{ProfileResponse, UpdateProfilePayload}};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    provider_profile::ProviderProfileUpdate,
    user::{Role, User, UserContactUpdate, UserFilter},
};
use crate::services::audit_service::AuditService;
use crate::store::Store;
use crate::utils::geo;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
    audit: AuditService,
}

pub struct UserPage {
    pub items: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, audit: AuditService) -> Self {
        Self { store, audit }
    }

    pub async fn list(&self, query: UserListQuery) -> Result<UserPage> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);

        let filter = UserFilter {
            role: query.role,
            registered_since: None,
        };
        let items = self.store.list_users(&filter, per_page, offset).await?;
        let total = self.store.count_users(&filter).await?;
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(UserPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn set_active(
        &self,
        admin: &User,
        user_id: uuid::Uuid,
        active: bool,
        ip: Option<String>,
    ) -> Result<User> {
        if !active && admin.id == user_id {
            return Err(Error::BadRequest(
                "U kunt uw eigen account niet deactiveren".into(),
            ));
        }
        if self.store.get_user(user_id).await?.is_none() {
            return Err(Error::NotFound("Gebruiker niet gevonden".into()));
        }

        let user = self.store.set_user_active(user_id, active).await?;
        let (action, verb) = if active {
            (AuditAction::GebruikerGeactiveerd, "geactiveerd")
        } else {
            (AuditAction::GebruikerGedeactiveerd, "gedeactiveerd")
        };
        tracing::info!(user_id = %user.id, admin_id = %admin.id, active, "user activation changed");
        self.audit
            .log(Some(admin.id), action, format!("Gebruiker {} {}", user.email, verb), ip)
            .await;
        Ok(user)
    }

    pub async fn profile(&self, user: User) -> Result<ProfileResponse> {
        let profile = match user.role {
            Role::Zorgverlener => self.store.get_provider_profile(user.id).await?,
            _ => None,
        };
        Ok(ProfileResponse { user, profile })
    }

    pub async fn update_profile(
        &self,
        user: &User,
        payload: UpdateProfilePayload,
    ) -> Result<ProfileResponse> {
        if payload.touches_provider_fields() && user.role != Role::Zorgverlener {
            return Err(Error::Forbidden(
                "Alleen zorgverleners hebben profielgegevens".into(),
            ));
        }

        let coordinates = payload.city.as_deref().map(geo::city_coordinates);
        let contact = UserContactUpdate {
            name: payload.name.as_ref().map(|n| n.trim().to_string()),
            phone: payload.phone.clone(),
            address: payload.address.clone(),
            city: payload.city.clone(),
            lat: coordinates.map(|c| c.0),
            lng: coordinates.map(|c| c.1),
        };
        let updated_user = self.store.update_user_contact(user.id, &contact).await?;

        let profile = if user.role == Role::Zorgverlener {
            let update = ProviderProfileUpdate {
                big_registration: payload.big_registration,
                kvk_number: payload.kvk_number,
                care_types: payload
                    .care_types
                    .map(|types| types.iter().map(|t| t.as_str().to_string()).collect()),
                service_radius_km: payload.service_radius_km,
                hourly_rate: payload.hourly_rate,
                bio: payload.bio,
                iban: payload
                    .iban
                    .map(|iban| iban.split_whitespace().collect::<String>().to_uppercase()),
            };
            Some(self.store.update_provider_profile(user.id, &update).await?)
        } else {
            None
        };

        Ok(ProfileResponse {
            user: updated_user,
            profile,
        })
    }
}
