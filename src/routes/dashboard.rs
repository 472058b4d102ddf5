use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::dashboard_dto::{AnalyticsResponse, DashboardResponse},
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Role-specific dashboard", body = Json<DashboardResponse>)
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let dashboard = state.dashboard_service.for_user(&user).await?;
    Ok(Json(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/beheer/analytics",
    responses(
        (status = 200, description = "Platform analytics", body = Json<AnalyticsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn analytics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let analytics = state.dashboard_service.analytics().await?;
    Ok(Json(analytics))
}
