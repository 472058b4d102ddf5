use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        admin_dto::{AuditLogQuery, AuditLogResponse, UserListQuery, UserListResponse},
        profile_dto::{ProviderApplicationList, ProviderApplicationQuery, RejectProviderPayload},
    },
    error::Result,
    models::{provider_profile::ProviderProfile, user::User},
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/beheer/goedkeuring",
    params(
        ("status" = Option<String>, Query, description = "PENDING, APPROVED or REJECTED")
    ),
    responses(
        (status = 200, description = "Provider applications", body = Json<ProviderApplicationList>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ProviderApplicationQuery>,
) -> Result<impl IntoResponse> {
    let list = state.provider_service.applications(query.status).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post,
    path = "/api/beheer/goedkeuring/{user_id}/approve",
    params(
        ("user_id" = Uuid, Path, description = "Provider user ID")
    ),
    responses(
        (status = 200, description = "Provider approved", body = Json<ProviderProfile>),
        (status = 404, description = "Provider profile not found")
    )
)]
#[axum::debug_handler]
pub async fn approve_provider(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state
        .provider_service
        .approve(&admin, user_id, client_ip(&headers))
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/beheer/goedkeuring/{user_id}/reject",
    params(
        ("user_id" = Uuid, Path, description = "Provider user ID")
    ),
    request_body = RejectProviderPayload,
    responses(
        (status = 200, description = "Provider rejected", body = Json<ProviderProfile>),
        (status = 400, description = "Reason is required"),
        (status = 404, description = "Provider profile not found")
    )
)]
#[axum::debug_handler]
pub async fn reject_provider(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RejectProviderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .provider_service
        .reject(&admin, user_id, payload.reason, client_ip(&headers))
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/beheer/gebruikers",
    params(
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Paged user list", body = Json<UserListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.user_service.list(query).await?;
    Ok(Json(UserListResponse::from(page)))
}

#[utoipa::path(
    post,
    path = "/api/beheer/gebruikers/{id}/activate",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User activated", body = Json<User>),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn activate_user(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .set_active(&admin, id, true, client_ip(&headers))
        .await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/beheer/gebruikers/{id}/deactivate",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated", body = Json<User>),
        (status = 400, description = "Admins cannot deactivate themselves"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .set_active(&admin, id, false, client_ip(&headers))
        .await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/beheer/audit-log",
    params(
        ("limit" = Option<i64>, Query, description = "Entries to return (default 50, max 200)")
    ),
    responses(
        (status = 200, description = "Recent audit entries", body = Json<AuditLogResponse>)
    )
)]
#[axum::debug_handler]
pub async fn audit_log(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<impl IntoResponse> {
    let log = state.audit_service.recent(query.limit).await?;
    Ok(Json(log))
}
