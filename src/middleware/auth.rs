use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::models::user::{Role, User};
use crate::utils::token::decode_token;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Role,
}

/// Resolves the bearer token to an active user and stores the user in the request
/// extensions.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Error::Unauthorized("Niet ingelogd".into()).into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Error::Unauthorized("Ongeldige autorisatieheader".into()).into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Error::Unauthorized("Alleen Bearer-tokens worden ondersteund".into())
            .into_response();
    };

    let claims = match decode_token(token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(_) => return Error::Unauthorized("Ongeldige of verlopen sessie".into()).into_response(),
    };
    let Ok(user_id) = claims.sub.parse::<Uuid>() else {
        return Error::Unauthorized("Ongeldige of verlopen sessie".into()).into_response();
    };

    let user = match state.store.get_user(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Error::Unauthorized("Gebruiker bestaat niet meer".into()).into_response()
        }
        Err(err) => return err.into_response(),
    };
    if !user.active {
        return Error::Forbidden("Uw account is gedeactiveerd".into()).into_response();
    }

    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Role gate layered inside [`require_bearer_auth`].
pub async fn require_roles(req: Request, next: Next, allowed: &[Role]) -> Response {
    let Some(user) = req.extensions().get::<User>() else {
        return Error::Unauthorized("Niet ingelogd".into()).into_response();
    };
    if !allowed.contains(&user.role) {
        tracing::debug!(user_id = %user.id, role = %user.role, "role not allowed for route");
        return Error::Forbidden("Geen toegang".into()).into_response();
    }
    next.run(req).await
}

pub async fn require_beheer(req: Request, next: Next) -> Response {
    require_roles(req, next, &[Role::Beheer]).await
}
