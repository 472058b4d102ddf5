use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::care_request_dto::{
        AdminCareRequestList, AdminCareRequestQuery, CareRequestDetail, CareRequestListResponse,
        CreateCareRequestPayload, OpenRequestsQuery,
    },
    error::Result,
    models::{care_request::CareRequest, user::User},
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/zorgvragen",
    request_body = CreateCareRequestPayload,
    responses(
        (status = 201, description = "Care request created", body = Json<CareRequest>),
        (status = 400, description = "Invalid payload or unavailable care type"),
        (status = 403, description = "Caller is not a care seeker")
    )
)]
#[axum::debug_handler]
pub async fn create_care_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
    Json(payload): Json<CreateCareRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = state
        .care_request_service
        .create(&user, payload, client_ip(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/zorgvragen/mine",
    responses(
        (status = 200, description = "Own care requests with their responses")
    )
)]
#[axum::debug_handler]
pub async fn my_care_requests(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let items = state.care_request_service.mine(&user).await?;
    Ok(Json(CareRequestListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/zorgvragen/open",
    params(
        ("care_type" = Option<String>, Query, description = "Filter by care type"),
        ("nearby" = Option<bool>, Query, description = "Only requests within the service radius")
    ),
    responses(
        (status = 200, description = "Open care requests"),
        (status = 403, description = "Caller is not an approved provider")
    )
)]
#[axum::debug_handler]
pub async fn open_care_requests(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<OpenRequestsQuery>,
) -> Result<impl IntoResponse> {
    let items = state.care_request_service.open(&user, query).await?;
    Ok(Json(CareRequestListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/zorgvragen/{id}",
    params(
        ("id" = Uuid, Path, description = "Care request ID")
    ),
    responses(
        (status = 200, description = "Care request", body = Json<CareRequestDetail>),
        (status = 403, description = "No access"),
        (status = 404, description = "Care request not found")
    )
)]
#[axum::debug_handler]
pub async fn get_care_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.care_request_service.get(&user, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/zorgvragen/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Care request ID")
    ),
    responses(
        (status = 200, description = "Care request cancelled", body = Json<CareRequest>),
        (status = 400, description = "Care request is not open"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn cancel_care_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let request = state.care_request_service.cancel(&user, id).await?;
    Ok(Json(request))
}

#[utoipa::path(
    post,
    path = "/api/zorgvragen/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Care request ID")
    ),
    responses(
        (status = 200, description = "Care request completed", body = Json<CareRequest>),
        (status = 400, description = "Care request is not linked"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn complete_care_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let request = state.care_request_service.complete(&user, id).await?;
    Ok(Json(request))
}

#[utoipa::path(
    get,
    path = "/api/beheer/zorgvragen",
    params(
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "All care requests with per-status counts", body = Json<AdminCareRequestList>)
    )
)]
#[axum::debug_handler]
pub async fn admin_care_requests(
    State(state): State<AppState>,
    Query(query): Query<AdminCareRequestQuery>,
) -> Result<impl IntoResponse> {
    let list = state.care_request_service.admin_list(query.status).await?;
    Ok(Json(list))
}
