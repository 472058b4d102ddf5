use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::dto::profile_dto::{
    OnboardingResponse, OnboardingStep, ProviderApplication, ProviderApplicationList,
};
use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    document::{Document, DocumentType},
    notification::NotificationType,
    provider_profile::{DocumentStatus, ProviderProfile, ProviderReview},
    user::{Role, User},
};
use crate::services::{audit_service::AuditService, notification_service::NotificationService};
use crate::store::Store;

/// Loads the caller's provider profile and requires it to be approved.
pub async fn approved_profile(store: &dyn Store, provider: &User) -> Result<ProviderProfile> {
    match store.get_provider_profile(provider.id).await? {
        Some(profile) if profile.approved => Ok(profile),
        _ => Err(Error::Forbidden("Uw account is nog niet goedgekeurd".into())),
    }
}

#[derive(Clone)]
pub struct ProviderService {
    store: Arc<dyn Store>,
    notifications: NotificationService,
    audit: AuditService,
}

impl ProviderService {
    pub fn new(
        store: Arc<dyn Store>,
        notifications: NotificationService,
        audit: AuditService,
    ) -> Self {
        Self {
            store,
            notifications,
            audit,
        }
    }

    async fn profile_of(&self, user: &User) -> Result<ProviderProfile> {
        if user.role != Role::Zorgverlener {
            return Err(Error::Forbidden(
                "Alleen zorgverleners hebben een onboarding".into(),
            ));
        }
        self.store
            .get_provider_profile(user.id)
            .await?
            .ok_or_else(|| Error::NotFound("Zorgverlenersprofiel niet gevonden".into()))
    }

    pub async fn onboarding(&self, user: &User) -> Result<OnboardingResponse> {
        let profile = self.profile_of(user).await?;
        let documents = self.store.list_documents(user.id).await?;
        Ok(onboarding_checklist(&profile, &documents))
    }

    pub async fn applications(
        &self,
        status: Option<DocumentStatus>,
    ) -> Result<ProviderApplicationList> {
        let profiles = self.store.list_provider_profiles(status).await?;
        let mut items = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let Some(user) = self.store.get_user(profile.user_id).await? else {
                tracing::warn!(user_id = %profile.user_id, "provider profile without user");
                continue;
            };
            let documents = self.store.list_documents(user.id).await?;
            items.push(ProviderApplication {
                user,
                profile,
                documents,
            });
        }
        Ok(ProviderApplicationList { items })
    }

    async fn provider_user(&self, user_id: uuid::Uuid) -> Result<User> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Gebruiker niet gevonden".into()))?;
        if user.role != Role::Zorgverlener {
            return Err(Error::BadRequest("Gebruiker is geen zorgverlener".into()));
        }
        Ok(user)
    }

    pub async fn approve(
        &self,
        admin: &User,
        user_id: uuid::Uuid,
        ip: Option<String>,
    ) -> Result<ProviderProfile> {
        let provider = self.provider_user(user_id).await?;
        let review = ProviderReview::Approve {
            reviewer: admin.id,
            at: Utc::now(),
        };
        let profile = self
            .store
            .review_provider_profile(provider.id, &review)
            .await?;

        tracing::info!(provider_id = %provider.id, admin_id = %admin.id, "provider approved");
        self.notifications
            .notify(
                provider.id,
                NotificationType::AccountGoedgekeurd,
                "Account goedgekeurd",
                "Uw account is goedgekeurd. U kunt nu reageren op zorgvragen.",
                None,
            )
            .await;
        self.audit
            .log(
                Some(admin.id),
                AuditAction::ProfielGoedgekeurd,
                format!("Zorgverlener {} ({}) goedgekeurd", provider.name, provider.email),
                ip,
            )
            .await;
        Ok(profile)
    }

    pub async fn reject(
        &self,
        admin: &User,
        user_id: uuid::Uuid,
        reason: String,
        ip: Option<String>,
    ) -> Result<ProviderProfile> {
        let provider = self.provider_user(user_id).await?;
        let reason = reason.trim().to_string();
        let review = ProviderReview::Reject {
            reason: reason.clone(),
        };
        let profile = self
            .store
            .review_provider_profile(provider.id, &review)
            .await?;

        tracing::info!(provider_id = %provider.id, admin_id = %admin.id, "provider rejected");
        self.notifications
            .notify(
                provider.id,
                NotificationType::AccountAfgekeurd,
                "Account afgekeurd",
                format!("Uw aanmelding is afgekeurd: {}", reason),
                Some(json!({ "reason": reason })),
            )
            .await;
        self.audit
            .log(
                Some(admin.id),
                AuditAction::ProfielAfgekeurd,
                format!("Zorgverlener {} afgekeurd: {}", provider.email, reason),
                ip,
            )
            .await;
        Ok(profile)
    }
}

fn has_document(documents: &[Document], doc_type: DocumentType) -> bool {
    documents.iter().any(|d| d.doc_type == doc_type)
}

pub fn onboarding_checklist(profile: &ProviderProfile, documents: &[Document]) -> OnboardingResponse {
    let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    let steps = vec![
        OnboardingStep {
            key: "profiel",
            label: "Profiel aanvullen",
            done: filled(&profile.bio) || !profile.care_types.is_empty(),
        },
        OnboardingStep {
            key: "big",
            label: "BIG-registratie",
            done: profile.approved
                || filled(&profile.big_registration)
                || has_document(documents, DocumentType::Big),
        },
        OnboardingStep {
            key: "vog",
            label: "VOG uploaden",
            done: profile.approved || has_document(documents, DocumentType::Vog),
        },
        OnboardingStep {
            key: "kvk",
            label: "KvK-inschrijving",
            done: profile.approved
                || filled(&profile.kvk_number)
                || has_document(documents, DocumentType::Kvk),
        },
        OnboardingStep {
            key: "betaling",
            label: "Betaalgegevens",
            done: filled(&profile.iban),
        },
        OnboardingStep {
            key: "goedkeuring",
            label: "Goedkeuring door ZorgMatch",
            done: profile.approved,
        },
    ];

    OnboardingResponse {
        completed: steps.iter().filter(|s| s.done).count(),
        total: steps.len(),
        steps,
        approved: profile.approved,
        document_status: profile.document_status,
        rejection_reason: profile.rejection_reason.clone(),
    }
}
