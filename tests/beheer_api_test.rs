mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::{json, Value as JsonValue};

use common::{decimal, spawn_app};
use zorgmatch_backend::models::payment::PaymentStatus;

async fn tariff_id(app: &common::TestApp, token: &str, care_type: &str) -> String {
    let (status, body) = app.get("/api/tarieven", token).await;
    assert_eq!(status, StatusCode::OK);
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["care_type"] == care_type)
        .map(|b| b["id"].as_str().unwrap().to_string())
        .unwrap()
}

#[tokio::test]
async fn beheer_routes_require_the_admin_role() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    for token in [&seeker, &provider] {
        for uri in [
            "/api/beheer/goedkeuring",
            "/api/beheer/gebruikers",
            "/api/beheer/matches",
            "/api/beheer/zorgvragen",
            "/api/beheer/audit-log",
            "/api/beheer/analytics",
        ] {
            let (status, body) = app.get(uri, token).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(body["error"], "Geen toegang");
        }
    }
}

#[tokio::test]
async fn approving_a_provider_unlocks_open_requests() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;
    let (provider_id, provider) = app.pending_provider("nieuw@example.nl").await;

    let (status, list) = app
        .get("/api/beheer/goedkeuring?status=IN_BEHANDELING", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user"]["id"], provider_id.to_string());

    let (status, _) = app.get("/api/zorgvragen/open", &provider).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, profile) = app
        .post(
            &format!("/api/beheer/goedkeuring/{}/approve", provider_id),
            &admin,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["approved"], true);
    assert_eq!(profile["document_status"], "GOEDGEKEURD");
    assert!(!profile["approved_by"].is_null());

    let (status, _) = app.get("/api/zorgvragen/open", &provider).await;
    assert_eq!(status, StatusCode::OK);

    let (_, notifications) = app.get("/api/notificaties", &provider).await;
    assert_eq!(notifications["items"][0]["type"], "ACCOUNT_GOEDGEKEURD");

    let (_, onboarding) = app.get("/api/zorgverlener/onboarding", &provider).await;
    assert_eq!(onboarding["approved"], true);
    assert_eq!(onboarding["total"], 6);

    let (_, log) = app.get("/api/beheer/audit-log", &admin).await;
    let actions: Vec<&str> = log["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"PROFIEL_GOEDGEKEURD"));
    assert!(log["today"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn rejecting_a_provider_needs_a_reason() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;
    let (provider_id, provider) = app.pending_provider("nieuw@example.nl").await;
    let uri = format!("/api/beheer/goedkeuring/{}/reject", provider_id);

    let (status, _) = app.post(&uri, &admin, json!({ "reason": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, profile) = app
        .post(&uri, &admin, json!({ "reason": "VOG ontbreekt" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["document_status"], "AFGEKEURD");
    assert_eq!(profile["rejection_reason"], "VOG ontbreekt");
    assert_eq!(profile["approved"], false);

    let (_, onboarding) = app.get("/api/zorgverlener/onboarding", &provider).await;
    assert_eq!(onboarding["rejection_reason"], "VOG ontbreekt");
    let (_, notifications) = app.get("/api/notificaties", &provider).await;
    assert_eq!(notifications["items"][0]["type"], "ACCOUNT_AFGEKEURD");

    // Seekers are not providers.
    let (seeker_id, _) = app.seeker("zoeker@example.nl").await;
    let (status, _) = app
        .post(
            &format!("/api/beheer/goedkeuring/{}/approve", seeker_id),
            &admin,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tariff_updates_are_validated_and_applied_to_intake() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let id = tariff_id(&app, &seeker, "begeleiding").await;
    let uri = format!("/api/beheer/tarieven/{}", id);

    let (status, _) = app.patch(&uri, &seeker, json!({ "default_rate": "30" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.patch(&uri, &admin, json!({ "min_rate": "40" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, _) = app
        .patch(&uri, &admin, json!({ "commission_percentage": "120" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, band) = app.patch(&uri, &admin, json!({ "default_rate": "31.50" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&band["default_rate"]), dec!(31.50));
    assert_eq!(decimal(&band["min_rate"]), dec!(22));

    let request = app.create_request(&seeker, "begeleiding", "Utrecht").await;
    assert_eq!(decimal(&request["rate"]), dec!(31.50));

    let (status, _) = app.patch(&uri, &admin, json!({ "active": false })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post(
            "/api/zorgvragen",
            &seeker,
            json!({
                "care_type": "begeleiding",
                "description": "Begeleiding bij dagelijkse structuur gezocht",
                "city": "Utrecht",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_listing_is_paged_and_filterable() {
    let app = spawn_app();
    let (admin_id, admin) = app.admin("beheer@example.nl").await;
    for i in 0..3 {
        app.signup(&format!("zoeker{}@example.nl", i), "ZORGVRAGER", "Utrecht")
            .await;
    }
    app.signup("zorg@example.nl", "ZORGVERLENER", "Utrecht").await;

    let (status, page) = app
        .get("/api/beheer/gebruikers?role=ZORGVRAGER&page=1&per_page=2", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    let (_, page) = app
        .get("/api/beheer/gebruikers?page=0&per_page=500", &admin)
        .await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["per_page"], 100);
    assert_eq!(page["total"], 5);

    let (status, body) = app
        .post(
            &format!("/api/beheer/gebruikers/{}/deactivate", admin_id),
            &admin,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "U kunt uw eigen account niet deactiveren");
}

#[tokio::test]
async fn user_listing_survives_an_enormous_page_number() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;

    let (status, page) = app
        .get(
            "/api/beheer/gebruikers?page=9223372036854775807&per_page=100",
            &admin,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 9223372036854775807i64);
    assert!(page["items"].as_array().unwrap().is_empty());
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn overviews_count_requests_matches_and_commission() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let linked = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    app.create_request(&seeker, "nachtzorg", "Amsterdam").await;
    let (_, created) = app.respond(&provider, linked["id"].as_str().unwrap()).await;
    let match_id = created["match"]["id"].as_str().unwrap().to_string();
    let (_, confirmed) = app.act(&seeker, &match_id, "bevestigen").await;
    let payment_id = confirmed["payment"]["id"].as_str().unwrap().parse().unwrap();

    let (status, requests) = app.get("/api/beheer/zorgvragen", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requests["total"], 2);
    assert_eq!(requests["counts"]["OPEN"], 1);
    assert_eq!(requests["counts"]["GEKOPPELD"], 1);
    assert_eq!(requests["counts"]["AFGEROND"], 0);

    let (_, open_only) = app.get("/api/beheer/zorgvragen?status=OPEN", &admin).await;
    assert_eq!(open_only["items"].as_array().unwrap().len(), 1);

    let (status, matches) = app.get("/api/beheer/matches", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(matches["total"], 1);
    assert_eq!(matches["confirmed"], 1);
    assert_eq!(decimal(&matches["commission_total"]), dec!(3));

    // Only settled payments count towards revenue.
    let (status, analytics) = app.get("/api/beheer/analytics", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["total_requests"], 2);
    assert_eq!(analytics["confirmed_matches"], 1);
    assert_eq!(decimal(&analytics["revenue"]), dec!(0));

    app.store
        .set_payment_status(payment_id, PaymentStatus::Betaald)
        .await
        .unwrap();
    let (_, analytics) = app.get("/api/beheer/analytics", &admin).await;
    assert_eq!(decimal(&analytics["revenue"]), dec!(30));
    assert_eq!(decimal(&analytics["commission"]), dec!(3));

    let (_, earnings) = app.get("/api/betalingen", &provider).await;
    assert_eq!(decimal(&earnings["earned"]), dec!(27));

    let (_, payments) = app.get("/api/betalingen", &admin).await;
    assert_eq!(payments["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboards_follow_the_role() {
    let app = spawn_app();
    let (_, admin) = app.admin("beheer@example.nl").await;
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;
    app.create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;

    let expectations: [(&String, &str); 3] = [
        (&seeker, "ZORGVRAGER"),
        (&provider, "ZORGVERLENER"),
        (&admin, "BEHEER"),
    ];
    for (token, role) in expectations {
        let (status, body): (StatusCode, JsonValue) = app.get("/api/dashboard", token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], role);
    }

    let (_, seeker_view) = app.get("/api/dashboard", &seeker).await;
    assert_eq!(seeker_view["open"], 1);
    let (_, provider_view) = app.get("/api/dashboard", &provider).await;
    assert_eq!(provider_view["open_requests"].as_array().unwrap().len(), 1);
    let (_, admin_view) = app.get("/api/dashboard", &admin).await;
    assert_eq!(admin_view["seekers"], 1);
    assert_eq!(admin_view["providers"], 1);
}

#[tokio::test]
async fn profile_updates_respect_the_role() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.pending_provider("zorg@example.nl").await;

    let (status, body) = app
        .patch("/api/profiel", &seeker, json!({ "phone": "0612345678" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["phone"], "0612345678");

    let (status, _) = app
        .patch("/api/profiel", &seeker, json!({ "bio": "Geen zorgverlener" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .patch("/api/profiel", &provider, json!({ "iban": "DE89370400440532013000" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .patch(
            "/api/profiel",
            &provider,
            json!({ "iban": "NL91ABNA0417164300", "service_radius_km": 40 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["service_radius_km"], 40);

    let (_, onboarding) = app.get("/api/zorgverlener/onboarding", &provider).await;
    let betaling = onboarding["steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["key"] == "betaling")
        .unwrap();
    assert_eq!(betaling["done"], true);
}
