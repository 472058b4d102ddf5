use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::match_dto::{
        AdminMatchOverview, CreateMatchPayload, CreateMatchResponse, MatchActionPayload,
        MatchActionResponse, MatchListResponse,
    },
    error::Result,
    models::user::User,
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchPayload,
    responses(
        (status = 201, description = "Response registered", body = Json<CreateMatchResponse>),
        (status = 400, description = "Care request missing or not open"),
        (status = 403, description = "Caller is not an approved provider"),
        (status = 409, description = "Already responded")
    )
)]
#[axum::debug_handler]
pub async fn create_match(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
    Json(payload): Json<CreateMatchPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let care_match = state
        .match_service
        .respond(&user, payload, client_ip(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(CreateMatchResponse { care_match })))
}

#[utoipa::path(
    patch,
    path = "/api/matches",
    request_body = MatchActionPayload,
    responses(
        (status = 200, description = "Match confirmed or rejected", body = Json<MatchActionResponse>),
        (status = 400, description = "Unknown action or request no longer open"),
        (status = 403, description = "Not the owner of the care request"),
        (status = 404, description = "Match not found")
    )
)]
#[axum::debug_handler]
pub async fn act_on_match(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
    Json(payload): Json<MatchActionPayload>,
) -> Result<impl IntoResponse> {
    let response = state
        .match_service
        .act(&user, payload, client_ip(&headers))
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/matches/mine",
    responses(
        (status = 200, description = "The provider's own responses", body = Json<MatchListResponse>),
        (status = 403, description = "Caller is not a provider")
    )
)]
#[axum::debug_handler]
pub async fn my_matches(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let items = state.match_service.mine(&user).await?;
    Ok(Json(MatchListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/beheer/matches",
    responses(
        (status = 200, description = "All matches with commission totals", body = Json<AdminMatchOverview>)
    )
)]
#[axum::debug_handler]
pub async fn admin_matches(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let overview = state.match_service.admin_overview().await?;
    Ok(Json(overview))
}
