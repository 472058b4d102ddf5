pub mod admin_dto;
pub mod auth_dto;
pub mod care_request_dto;
pub mod dashboard_dto;
pub mod match_dto;
pub mod notification_dto;
pub mod payment_dto;
pub mod profile_dto;
pub mod tariff_dto;
