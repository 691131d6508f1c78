use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tag_keeper::{
    create_router,
    services::{Member, MemoryStore, RecordStore, Roster},
    state::{AppState, TAGBACK_COOLDOWN},
};

fn app_with_store(store: Arc<MemoryStore>) -> Router {
    let roster = Roster::from_members([
        Member { id: 1, name: "alice".to_string(), nick: None },
        Member { id: 2, name: "bob".to_string(), nick: Some("Bobby".to_string()) },
        Member { id: 3, name: "carol".to_string(), nick: None },
    ]);
    let state = AppState::new(0, "127.0.0.1".to_string(), store, Arc::new(roster));
    create_router(Arc::new(state))
}

fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn tag(app: &Router, tagger: u64, target: u64) -> (StatusCode, Value) {
    let body = json!({ "tagger_id": tagger, "target_id": target }).to_string();
    let request = Request::post("/tag")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

#[tokio::test(start_paused = true)]
async fn tag_then_tagback_is_refused() {
    let app = app();

    let (status, body) = tag(&app, 1, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "tagged");
    assert_eq!(body["holder"], 2);
    assert_eq!(body["notification"]["title"], "Bobby has been tagged!");

    let (status, body) = tag(&app, 3, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cooldown");
    assert_eq!(body["holder"], 2);
    assert_eq!(body["notification"]["title"], "Tagback Cooldown in Effect");
    assert_eq!(body["notification"]["field_value"], "carol tried to tag Bobby");
}

#[tokio::test(start_paused = true)]
async fn same_target_taggable_after_cooldown() {
    let app = app();
    tag(&app, 1, 2).await;

    tokio::time::sleep(TAGBACK_COOLDOWN + Duration::from_secs(1)).await;

    let (_, body) = get(&app, "/cooldown").await;
    assert_eq!(body["active"], false);
    assert_eq!(body["message"], "The cooldown has expired.");

    let (_, body) = tag(&app, 3, 2).await;
    assert_eq!(body["status"], "tagged");
    assert_eq!(body["previous_holder"], 2);
}

#[tokio::test(start_paused = true)]
async fn unknown_target_is_a_visible_failure() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(Arc::clone(&store));

    let (status, body) = tag(&app, 1, 42).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "There was an internal error while tagging this person.");
    assert!(store.load().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn successful_tag_is_persisted() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(Arc::clone(&store));

    tag(&app, 1, 2).await;
    tag(&app, 2, 3).await;

    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.tagged_id, 3);
    assert_eq!(saved.prev_tagged_id, 2);
    assert!(!saved.tagged_datetime.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cooldown_and_timetagged_messages() {
    let app = app();

    let (_, body) = get(&app, "/timetagged").await;
    assert_eq!(body["message"], "Nobody is it yet.");
    assert_eq!(body["holder"], Value::Null);

    tag(&app, 1, 3).await;

    let (_, body) = get(&app, "/cooldown").await;
    assert_eq!(body["active"], true);
    let remaining = body["remaining_seconds"].as_u64().unwrap();
    assert!((299..=300).contains(&remaining));
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("The cooldown has ") && message.ends_with(" remaining."));

    let (_, body) = get(&app, "/timetagged").await;
    assert_eq!(body["holder"], 3);
    assert!(body["message"].as_str().unwrap().starts_with("carol has been it for "));
}

#[tokio::test(start_paused = true)]
async fn options_hide_current_holder() {
    let app = app();
    let (_, body) = get(&app, "/tag/options").await;
    assert_eq!(body["options"].as_array().unwrap().len(), 3);

    tag(&app, 1, 2).await;
    let (_, body) = get(&app, "/tag/options").await;
    let ids: Vec<u64> = body["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|member| member["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test(start_paused = true)]
async fn status_and_health() {
    let app = app();
    tag(&app, 1, 2).await;

    let (status, body) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holder"], 2);
    assert_eq!(body["holder_name"], "Bobby");
    assert_eq!(body["cooldown_active"], true);
    assert_eq!(body["last_action"], "tag");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
