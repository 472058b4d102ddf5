mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::{json, Value as JsonValue};

use common::{decimal, spawn_app};

fn ids(items: &JsonValue) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn intake_uses_default_rate_of_the_tariff_band() {
    let app = spawn_app();
    let (seeker_id, token) = app.seeker("zoeker@example.nl").await;

    let request = app.create_request(&token, "verpleging", "Rotterdam").await;
    assert_eq!(request["status"], "OPEN");
    assert_eq!(request["seeker_id"], seeker_id.to_string());
    assert_eq!(decimal(&request["rate"]), dec!(34));
    assert_eq!(request["city"], "Rotterdam");

    let (status, _) = app
        .post(
            "/api/zorgvragen",
            &token,
            json!({ "care_type": "verpleging", "description": "te kort", "city": "Rotterdam" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_seekers_create_requests_and_only_approved_providers_see_them() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, pending) = app.pending_provider("nieuw@example.nl").await;
    let (_, approved) = app.approved_provider("ervaren@example.nl", "Amsterdam").await;

    let (status, _) = app
        .post(
            "/api/zorgvragen",
            &approved,
            json!({
                "care_type": "begeleiding",
                "description": "Zorgverleners mogen geen zorgvraag plaatsen",
                "city": "Amsterdam",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();

    let (status, body) = app.get("/api/zorgvragen/open", &pending).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Uw account is nog niet goedgekeurd");

    let (status, _) = app.respond(&pending, request_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/api/zorgvragen/open", &approved).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec![request_id.to_string()]);
    assert_eq!(body["items"][0]["already_responded"], false);
}

#[tokio::test]
async fn nearby_filter_uses_the_service_radius() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("amsterdam@example.nl", "Amsterdam").await;

    let close = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let far = app
        .create_request(&seeker, "persoonlijke_verzorging", "Groningen")
        .await;

    let (status, all) = app.get("/api/zorgvragen/open", &provider).await;
    assert_eq!(status, StatusCode::OK);
    // Newest first.
    assert_eq!(
        ids(&all["items"]),
        vec![
            far["id"].as_str().unwrap().to_string(),
            close["id"].as_str().unwrap().to_string()
        ]
    );

    let (status, nearby) = app.get("/api/zorgvragen/open?nearby=true", &provider).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&nearby["items"]), vec![close["id"].as_str().unwrap().to_string()]);

    let (_, filtered) = app
        .get("/api/zorgvragen/open?care_type=verpleging", &provider)
        .await;
    assert!(filtered["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn responding_twice_is_a_conflict() {
    let app = spawn_app();
    let (seeker_id, seeker) = app.seeker("zoeker@example.nl").await;
    let (provider_id, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();

    let (status, body) = app.respond(&provider, request_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["match"]["status"], "VOORGESTELD");
    assert_eq!(body["match"]["provider_id"], provider_id.to_string());
    assert_eq!(body["match"]["response_text"], "Ik help graag");

    let (status, body) = app.respond(&provider, request_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "U heeft al gereageerd op deze aanvraag");

    let (status, body) = app
        .post("/api/matches", &provider, json!({ "reactie_tekst": "zonder id" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "zorgvraag_id is verplicht");

    let (_, open) = app.get("/api/zorgvragen/open", &provider).await;
    assert_eq!(open["items"][0]["already_responded"], true);

    // The seeker was told about the response.
    let (_, notifications) = app.get("/api/notificaties", &seeker).await;
    assert_eq!(notifications["unread"], 1);
    assert_eq!(notifications["items"][0]["type"], "ZORGVERLENER_GEREAGEERD");
    assert_eq!(notifications["items"][0]["user_id"], seeker_id.to_string());
}

#[tokio::test]
async fn confirming_links_the_request_and_discards_competitors() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (first_id, first) = app.approved_provider("eerste@example.nl", "Amsterdam").await;
    let (_, second) = app.approved_provider("tweede@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();

    let (_, chosen) = app.respond(&first, request_id).await;
    let chosen_id = chosen["match"]["id"].as_str().unwrap().to_string();
    let (_, other) = app.respond(&second, request_id).await;
    let other_id = other["match"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.act(&seeker, &chosen_id, "bevestigen").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["match_id"], chosen_id);
    let payment = &body["payment"];
    assert_eq!(decimal(&payment["amount"]), dec!(30));
    assert_eq!(decimal(&payment["commission"]), dec!(3));
    assert_eq!(payment["status"], "OPEN");
    assert_eq!(payment["provider_id"], first_id.to_string());

    let (_, detail) = app.get(&format!("/api/zorgvragen/{}", request_id), &seeker).await;
    assert_eq!(detail["status"], "GEKOPPELD");
    let matches = detail["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], chosen_id);
    assert_eq!(matches[0]["status"], "BEVESTIGD");
    assert!(!matches[0]["confirmed_at"].is_null());

    // The discarded response is gone and the request is no longer open.
    let (status, _) = app.act(&seeker, &other_id, "bevestigen").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = app.act(&seeker, &chosen_id, "bevestigen").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Zorgvraag is niet meer open");

    let (_, open) = app.get("/api/zorgvragen/open", &second).await;
    assert!(open["items"].as_array().unwrap().is_empty());
    let (_, mine) = app.get("/api/matches/mine", &second).await;
    assert!(mine["items"].as_array().unwrap().is_empty());

    let (_, mine) = app.get("/api/matches/mine", &first).await;
    assert_eq!(mine["items"][0]["care_request"]["id"], request_id);

    let (_, notifications) = app.get("/api/notificaties", &first).await;
    assert_eq!(notifications["items"][0]["type"], "MATCH_BEVESTIGD");

    let (_, payments) = app.get("/api/betalingen", &first).await;
    assert_eq!(payments["items"].as_array().unwrap().len(), 1);
    assert_eq!(decimal(&payments["pending"]), dec!(27));
    assert_eq!(decimal(&payments["earned"]), dec!(0));

    let (_, payments) = app.get("/api/betalingen", &seeker).await;
    assert_eq!(payments["items"].as_array().unwrap().len(), 1);
    assert!(payments.get("earned").is_none());
}

#[tokio::test]
async fn completing_a_linked_request() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();

    // Open requests cannot be completed yet.
    let (status, _) = app
        .post(&format!("/api/zorgvragen/{}/complete", request_id), &seeker, json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, created) = app.respond(&provider, request_id).await;
    let match_id = created["match"]["id"].as_str().unwrap().to_string();
    let (status, _) = app.act(&seeker, &match_id, "confirm").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(&format!("/api/zorgvragen/{}/complete", request_id), &seeker, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "AFGEROND");

    let (_, mine) = app.get("/api/matches/mine", &provider).await;
    assert_eq!(mine["items"][0]["status"], "AFGEROND");
    assert!(!mine["items"][0]["completed_at"].is_null());
}

#[tokio::test]
async fn rejecting_removes_the_response_and_tells_the_provider() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();
    let (_, created) = app.respond(&provider, request_id).await;
    let match_id = created["match"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.act(&seeker, &match_id, "onbekend").await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = app.act(&seeker, &match_id, "afwijzen").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["payment"].is_null());

    let (_, detail) = app.get(&format!("/api/zorgvragen/{}", request_id), &seeker).await;
    assert_eq!(detail["status"], "OPEN");
    assert!(detail["matches"].as_array().unwrap().is_empty());

    let (_, notifications) = app.get("/api/notificaties", &provider).await;
    assert_eq!(notifications["items"][0]["type"], "MATCH_AFGEWEZEN");

    // The request is open again for a fresh response.
    let (status, _) = app.respond(&provider, request_id).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn only_the_owner_decides_on_responses() {
    let app = spawn_app();
    let (_, owner) = app.seeker("eigenaar@example.nl").await;
    let (_, stranger) = app.seeker("vreemde@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&owner, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();
    let (_, created) = app.respond(&provider, request_id).await;
    let match_id = created["match"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.act(&stranger, &match_id, "bevestigen").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Geen toegang");

    let (status, _) = app
        .get(&format!("/api/zorgvragen/{}", request_id), &stranger)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .act(&owner, "00000000-0000-0000-0000-000000000000", "bevestigen")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Match niet gevonden");
}

#[tokio::test]
async fn cancelling_drops_proposals_and_notifies_providers() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let request = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let request_id = request["id"].as_str().unwrap();
    app.respond(&provider, request_id).await;

    let (status, body) = app
        .post(&format!("/api/zorgvragen/{}/cancel", request_id), &seeker, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "GEANNULEERD");

    let (status, _) = app
        .post(&format!("/api/zorgvragen/{}/cancel", request_id), &seeker, json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, mine) = app.get("/api/matches/mine", &provider).await;
    assert!(mine["items"].as_array().unwrap().is_empty());
    let (_, notifications) = app.get("/api/notificaties", &provider).await;
    assert_eq!(notifications["items"][0]["type"], "MATCH_GEANNULEERD");

    let (status, _) = app.respond(&provider, request_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seeker_sees_own_requests_with_responses() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    let older = app
        .create_request(&seeker, "persoonlijke_verzorging", "Amsterdam")
        .await;
    let newer = app.create_request(&seeker, "nachtzorg", "Utrecht").await;
    app.respond(&provider, older["id"].as_str().unwrap()).await;

    let (status, body) = app.get("/api/zorgvragen/mine", &seeker).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], newer["id"]);
    assert!(items[0]["matches"].as_array().unwrap().is_empty());
    assert_eq!(items[1]["matches"].as_array().unwrap().len(), 1);

    let (status, _) = app.get("/api/zorgvragen/mine", &provider).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, provider) = app.approved_provider("zorg@example.nl", "Amsterdam").await;

    for care_type in ["persoonlijke_verzorging", "begeleiding"] {
        let request = app.create_request(&seeker, care_type, "Amsterdam").await;
        app.respond(&provider, request["id"].as_str().unwrap()).await;
    }

    let (_, list) = app.get("/api/notificaties", &seeker).await;
    assert_eq!(list["unread"], 2);
    let first = list["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(&format!("/api/notificaties/{}/read", first), &seeker, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    // Someone else's notification is invisible.
    let (status, _) = app
        .post(&format!("/api/notificaties/{}/read", first), &provider, json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.post("/api/notificaties/read-all", &seeker, json!({})).await;
    assert_eq!(body["updated"], 1);
    let (_, list) = app.get("/api/notificaties", &seeker).await;
    assert_eq!(list["unread"], 0);
}

#[tokio::test]
async fn missing_request_id_is_reported_before_the_role_check() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;

    let (status, body) = app
        .post("/api/matches", &seeker, json!({ "reactie_tekst": "zonder id" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "zorgvraag_id is verplicht");

    let request = app.create_request(&seeker, "begeleiding", "Utrecht").await;
    let (status, body) = app
        .respond(&seeker, request["id"].as_str().unwrap())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Alleen zorgverleners kunnen reageren");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_confirms_link_one_match_and_create_one_payment() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, first) = app.approved_provider("eerste@example.nl", "Amsterdam").await;
    let (_, second) = app.approved_provider("tweede@example.nl", "Amsterdam").await;

    let request = app.create_request(&seeker, "nachtzorg", "Amsterdam").await;
    let request_id = request["id"].as_str().unwrap();
    let (_, a) = app.respond(&first, request_id).await;
    let (_, b) = app.respond(&second, request_id).await;
    let a_id = a["match"]["id"].as_str().unwrap().to_string();
    let b_id = b["match"]["id"].as_str().unwrap().to_string();

    let ((a_status, _), (b_status, _)) = tokio::join!(
        app.act(&seeker, &a_id, "bevestigen"),
        app.act(&seeker, &b_id, "bevestigen"),
    );
    let statuses = [a_status, b_status];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "{statuses:?}"
    );
    assert!(statuses.iter().all(|s| matches!(
        *s,
        StatusCode::OK | StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND
    )));

    let (_, payments) = app.get("/api/betalingen", &seeker).await;
    assert_eq!(payments["items"].as_array().unwrap().len(), 1);

    let (_, detail) = app.get(&format!("/api/zorgvragen/{}", request_id), &seeker).await;
    assert_eq!(detail["status"], "GEKOPPELD");
    let matches = detail["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["status"], "BEVESTIGD");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_response_racing_a_confirm_never_outlives_it() {
    let app = spawn_app();
    let (_, seeker) = app.seeker("zoeker@example.nl").await;
    let (_, chosen) = app.approved_provider("eerste@example.nl", "Amsterdam").await;
    let (_, late) = app.approved_provider("laat@example.nl", "Amsterdam").await;

    let request = app.create_request(&seeker, "begeleiding", "Amsterdam").await;
    let request_id = request["id"].as_str().unwrap();
    let (_, proposal) = app.respond(&chosen, request_id).await;
    let proposal_id = proposal["match"]["id"].as_str().unwrap().to_string();

    let ((confirm_status, _), (respond_status, respond_body)) = tokio::join!(
        app.act(&seeker, &proposal_id, "bevestigen"),
        app.respond(&late, request_id),
    );
    assert_eq!(confirm_status, StatusCode::OK);
    if respond_status == StatusCode::BAD_REQUEST {
        assert_eq!(respond_body["error"], "Zorgvraag niet beschikbaar");
    } else {
        assert_eq!(respond_status, StatusCode::CREATED);
    }

    let (_, detail) = app.get(&format!("/api/zorgvragen/{}", request_id), &seeker).await;
    assert_eq!(detail["status"], "GEKOPPELD");
    let matches = detail["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], proposal_id);

    let (_, mine) = app.get("/api/matches/mine", &late).await;
    assert!(mine["items"].as_array().unwrap().is_empty());

    // Once linked, a fresh response is turned away by the store.
    let (status, body) = app.respond(&late, request_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Zorgvraag niet beschikbaar");
}
