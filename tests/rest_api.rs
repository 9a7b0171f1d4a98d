//! REST endpoints driven through the router without a socket.

#![allow(clippy::panic)]

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use arena_gateway::api;

async fn call(
    app: axum::Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("bad request for {uri}");
    };
    let Ok(response) = app.oneshot(request).await else {
        panic!("router failed for {uri}");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body read failed for {uri}");
    };
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_and_channel_catalog() {
    let app = api::build_app(common::app_state());

    let (status, body) = call(app.clone(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = call(app, Method::GET, "/config/channels", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(channels) = body.as_array() else {
        panic!("catalog is not an array: {body}");
    };
    assert_eq!(channels.len(), 16);
    assert!(
        channels
            .iter()
            .any(|c| c["name"] == "sccStatus" && c["has_generator"] == true)
    );
    assert!(
        channels
            .iter()
            .any(|c| c["name"] == "reload" && c["has_generator"] == false)
    );
}

#[tokio::test]
async fn settings_are_created_then_updated() {
    let app = api::build_app(common::app_state());

    let (status, body) = call(app.clone(), Method::GET, "/api/v1/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Untitled Event");
    assert_eq!(body["num_elim_alliances"], 8);

    let mut updated = body.clone();
    updated["name"] = "Chezy Champs".into();
    updated["teleop_duration_sec"] = 120.into();
    let (status, _) = call(app.clone(), Method::PUT, "/api/v1/settings", Some(updated)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(app.clone(), Method::GET, "/api/v1/settings", None).await;
    assert_eq!(body["name"], "Chezy Champs");
    assert_eq!(body["teleop_duration_sec"], 120);

    let bad = serde_json::json!({"num_elim_alliances": 0});
    let (status, body) = call(app, Method::PUT, "/api/v1/settings", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn alliances_and_off_field_roster() {
    let app = api::build_app(common::app_state());

    for (id, teams) in [(2, vec![500, 600, 700]), (1, vec![100, 200, 300, 400])] {
        let alliance = serde_json::json!({"id": id, "team_ids": teams, "lineup": [0, 0, 0]});
        let (status, _) = call(app.clone(), Method::POST, "/api/v1/alliances", Some(alliance)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let duplicate = serde_json::json!({"id": 1, "team_ids": [], "lineup": [0, 0, 0]});
    let (status, _) = call(app.clone(), Method::POST, "/api/v1/alliances", Some(duplicate)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let stray = serde_json::json!({"id": 3, "team_ids": [1], "lineup": [2, 0, 0]});
    let (status, _) = call(app.clone(), Method::POST, "/api/v1/alliances", Some(stray)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(app.clone(), Method::GET, "/api/v1/alliances", None).await;
    let ids: Vec<i64> = body
        .as_array()
        .map(|all| all.iter().filter_map(|a| a["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![1, 2]);

    let (status, body) = call(
        app.clone(),
        Method::GET,
        "/api/v1/alliances/1/off-field-teams?team1=100&team2=200&team3=300",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["off_field"], serde_json::json!([400]));

    let (_, body) = call(
        app.clone(),
        Method::GET,
        "/api/v1/alliances/1/off-field-teams?team1=100&team2=200&team3=999",
        None,
    )
    .await;
    assert_eq!(body["off_field"], serde_json::json!([300, 400]));

    let (_, body) = call(app.clone(), Method::GET, "/api/v1/alliances/0/off-field-teams", None).await;
    assert_eq!(body["off_field"], serde_json::json!([]));

    let (status, body) = call(app.clone(), Method::GET, "/api/v1/alliances/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);

    let (status, _) = call(app, Method::GET, "/api/v1/alliances/9/off-field-teams", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn display_endpoints_update_the_arena() {
    let state = common::app_state();
    let arena = std::sync::Arc::clone(&state.arena);
    let app = api::build_app(state);

    let (status, _) = call(
        app.clone(),
        Method::PUT,
        "/api/v1/displays/audience",
        Some(serde_json::json!({"mode": "alliance_selection"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let mode = arena.read_state(|s| s.audience_display_mode).await;
    assert_eq!(mode, arena_gateway::arena::AudienceDisplayMode::AllianceSelection);

    let (status, body) = call(
        app.clone(),
        Method::PUT,
        "/api/v1/displays/100",
        Some(serde_json::json!({"id": "ignored", "nickname": "Red wall", "display_type": "alliance_station"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "100");
    assert!(arena.display("100").await.is_some());

    let (status, body) = call(app.clone(), Method::POST, "/api/v1/displays/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["delivered"], 0);

    let (status, _) = call(
        app,
        Method::POST,
        "/api/v1/sounds",
        Some(serde_json::json!({"sound": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn teams_and_rankings() {
    let state = common::app_state();
    let app = api::build_app(state.clone());

    let team = serde_json::json!({"id": 254, "nickname": "Poofs", "city": "San Jose"});
    let (status, _) = call(app.clone(), Method::POST, "/api/v1/teams", Some(team.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(app.clone(), Method::POST, "/api/v1/teams", Some(team)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let rename = serde_json::json!({"id": 1, "nickname": "Cheesy Poofs"});
    let (status, body) = call(app.clone(), Method::PUT, "/api/v1/teams/254", Some(rename)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 254);

    let (status, body) = call(app.clone(), Method::GET, "/api/v1/teams/254", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "Cheesy Poofs");
    let (status, _) = call(app.clone(), Method::GET, "/api/v1/teams/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let rankings = [
        arena_gateway::game::Ranking {
            team_id: 254,
            rank: 2,
            ..Default::default()
        },
        arena_gateway::game::Ranking {
            team_id: 1114,
            rank: 1,
            ..Default::default()
        },
    ];
    let saved = state
        .arena
        .post_score(arena_gateway::game::MatchResult::default(), rankings.to_vec())
        .await;
    assert!(saved.is_ok());

    let (status, body) = call(app, Method::GET, "/api/v1/rankings", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .map(|all| all.iter().filter_map(|r| r["team_id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![1114, 254]);
}
