use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::notification_dto::{MarkReadResponse, NotificationListResponse},
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/notificaties",
    responses(
        (status = 200, description = "Own notifications, newest first", body = Json<NotificationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let list = state.notification_service.list(user.id).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post,
    path = "/api/notificaties/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = Json<MarkReadResponse>),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let response = state.notification_service.mark_read(user.id, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/notificaties/read-all",
    responses(
        (status = 200, description = "All notifications marked as read", body = Json<MarkReadResponse>)
    )
)]
#[axum::debug_handler]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let response = state.notification_service.mark_all_read(user.id).await?;
    Ok(Json(response))
}
