use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{OnboardingResponse, ProfileResponse, UpdateProfilePayload},
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profiel",
    responses(
        (status = 200, description = "Own account and provider profile", body = Json<ProfileResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.profile(user).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    patch,
    path = "/api/profiel",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = Json<ProfileResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Provider fields sent by a non-provider")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.user_service.update_profile(&user, payload).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/zorgverlener/onboarding",
    responses(
        (status = 200, description = "Onboarding checklist", body = Json<OnboardingResponse>),
        (status = 403, description = "Caller is not a provider")
    )
)]
#[axum::debug_handler]
pub async fn onboarding(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let checklist = state.provider_service.onboarding(&user).await?;
    Ok(Json(checklist))
}
