use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, SessionResponse, SignupPayload},
    error::Result,
    models::user::User,
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Account created", body = Json<User>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Role cannot self-register"),
        (status = 409, description = "Email already in use")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth_service
        .signup(payload, client_ip(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session token issued", body = Json<AuthResponse>),
        (status = 401, description = "Wrong credentials"),
        (status = 403, description = "Account deactivated")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state
        .auth_service
        .login(payload, client_ip(&headers))
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = Json<SessionResponse>),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let session = state.auth_service.session(user).await?;
    Ok(Json(session))
}
