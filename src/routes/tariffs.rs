use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::tariff_dto::{TariffListResponse, UpdateTariffPayload},
    error::Result,
    models::{tariff::TariffBand, user::User},
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/tarieven",
    responses(
        (status = 200, description = "Tariff bands per care type", body = Json<TariffListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_tariffs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.tariff_service.list().await?;
    Ok(Json(TariffListResponse { items }))
}

#[utoipa::path(
    patch,
    path = "/api/beheer/tarieven/{id}",
    params(
        ("id" = Uuid, Path, description = "Tariff band ID")
    ),
    request_body = UpdateTariffPayload,
    responses(
        (status = 200, description = "Tariff band updated", body = Json<TariffBand>),
        (status = 400, description = "Band would become inconsistent"),
        (status = 404, description = "Tariff band not found")
    )
)]
#[axum::debug_handler]
pub async fn update_tariff(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTariffPayload>,
) -> Result<impl IntoResponse> {
    let band = state
        .tariff_service
        .update(&admin, id, payload.into(), client_ip(&headers))
        .await?;
    Ok(Json(band))
}
