pub mod audit_service;
pub mod auth_service;
pub mod care_request_service;
pub mod dashboard_service;
pub mod document_service;
pub mod match_service;
pub mod notification_service;
pub mod payment_service;
pub mod provider_service;
pub mod tariff_service;
pub mod user_service;
