use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{dto::payment_dto::PaymentOverview, error::Result, models::user::User, AppState};

#[utoipa::path(
    get,
    path = "/api/betalingen",
    responses(
        (status = 200, description = "Payments visible to the caller", body = Json<PaymentOverview>)
    )
)]
#[axum::debug_handler]
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let overview = state.payment_service.overview(&user).await?;
    Ok(Json(overview))
}
