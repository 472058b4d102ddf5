use axum::{
    http::HeaderMap,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::middleware::{
    auth::{require_bearer_auth, require_beheer},
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

pub mod auth;
pub mod beheer;
pub mod care_requests;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod matches;
pub mod notifications;
pub mod payments;
pub mod profile;
pub mod tariffs;

/// Best-effort client address from the proxy headers, used for audit entries.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Full HTTP surface without the outer CORS/trace/body-limit layers, which `main` adds.
pub fn router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login));

    let beheer_api = Router::new()
        .route("/api/beheer/goedkeuring", get(beheer::list_applications))
        .route(
            "/api/beheer/goedkeuring/:user_id/approve",
            post(beheer::approve_provider),
        )
        .route(
            "/api/beheer/goedkeuring/:user_id/reject",
            post(beheer::reject_provider),
        )
        .route(
            "/api/beheer/documenten/:id/verify",
            post(documents::verify_document),
        )
        .route("/api/beheer/matches", get(matches::admin_matches))
        .route("/api/beheer/gebruikers", get(beheer::list_users))
        .route(
            "/api/beheer/gebruikers/:id/activate",
            post(beheer::activate_user),
        )
        .route(
            "/api/beheer/gebruikers/:id/deactivate",
            post(beheer::deactivate_user),
        )
        .route(
            "/api/beheer/zorgvragen",
            get(care_requests::admin_care_requests),
        )
        .route("/api/beheer/tarieven/:id", patch(tariffs::update_tariff))
        .route("/api/beheer/audit-log", get(beheer::audit_log))
        .route("/api/beheer/analytics", get(dashboard::analytics))
        .nest_service(
            "/api/beheer/uploads",
            ServeDir::new(state.config.uploads_dir.clone()),
        )
        .route_layer(from_fn(require_beheer));

    let authed_api = Router::new()
        .route("/api/auth/session", get(auth::session))
        .route(
            "/api/zorgvragen",
            post(care_requests::create_care_request),
        )
        .route("/api/zorgvragen/mine", get(care_requests::my_care_requests))
        .route("/api/zorgvragen/open", get(care_requests::open_care_requests))
        .route("/api/zorgvragen/:id", get(care_requests::get_care_request))
        .route(
            "/api/zorgvragen/:id/cancel",
            post(care_requests::cancel_care_request),
        )
        .route(
            "/api/zorgvragen/:id/complete",
            post(care_requests::complete_care_request),
        )
        .route(
            "/api/matches",
            post(matches::create_match).patch(matches::act_on_match),
        )
        .route("/api/matches/mine", get(matches::my_matches))
        .route(
            "/api/documenten",
            post(documents::upload_document).get(documents::list_documents),
        )
        .route("/api/documenten/:id", delete(documents::delete_document))
        .route(
            "/api/profiel",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/api/zorgverlener/onboarding", get(profile::onboarding))
        .route("/api/tarieven", get(tariffs::list_tariffs))
        .route("/api/betalingen", get(payments::list_payments))
        .route("/api/notificaties", get(notifications::list_notifications))
        .route(
            "/api/notificaties/read-all",
            post(notifications::mark_all_read),
        )
        .route("/api/notificaties/:id/read", post(notifications::mark_read))
        .route("/api/dashboard", get(dashboard::dashboard))
        .merge(beheer_api)
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth));

    let api = public_api
        .merge(authed_api)
        .layer(from_fn_with_state(
            RateLimiter::new(state.config.api_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_ip(&headers).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(client_ip(&headers).as_deref(), Some("198.51.100.4"));
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
