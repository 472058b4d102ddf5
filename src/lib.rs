pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    audit_service::AuditService, auth_service::AuthService,
    care_request_service::CareRequestService, dashboard_service::DashboardService,
    document_service::DocumentService, match_service::MatchService,
    notification_service::NotificationService, payment_service::PaymentService,
    provider_service::ProviderService, tariff_service::TariffService, user_service::UserService,
};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub provider_service: ProviderService,
    pub document_service: DocumentService,
    pub care_request_service: CareRequestService,
    pub match_service: MatchService,
    pub payment_service: PaymentService,
    pub tariff_service: TariffService,
    pub notification_service: NotificationService,
    pub audit_service: AuditService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let audit_service = AuditService::new(store.clone());
        let notification_service = NotificationService::new(store.clone());
        let tariff_service = TariffService::new(store.clone(), audit_service.clone());

        let auth_service = AuthService::new(store.clone(), audit_service.clone(), &config);
        let user_service = UserService::new(store.clone(), audit_service.clone());
        let provider_service = ProviderService::new(
            store.clone(),
            notification_service.clone(),
            audit_service.clone(),
        );
        let document_service = DocumentService::new(
            store.clone(),
            notification_service.clone(),
            audit_service.clone(),
            config.uploads_dir.clone(),
        );
        let care_request_service = CareRequestService::new(
            store.clone(),
            tariff_service.clone(),
            notification_service.clone(),
            audit_service.clone(),
        );
        let match_service = MatchService::new(
            store.clone(),
            notification_service.clone(),
            audit_service.clone(),
            config.commission_percentage,
        );
        let payment_service = PaymentService::new(store.clone());
        let dashboard_service = DashboardService::new(store.clone());

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            user_service,
            provider_service,
            document_service,
            care_request_service,
            match_service,
            payment_service,
            tariff_service,
            notification_service,
            audit_service,
            dashboard_service,
        }
    }
}
