//! HTTP API Tests
//!
//! Drives the full router in-process: status codes, `{message}` error bodies
//! and the end-to-end account/channel/video/comment flows.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vidshare::auth::{JwtConfig, PasswordPolicy};
use vidshare::config::ServerSettings;
use vidshare::http_server::{AppState, HttpServer};
use vidshare::store::Database;

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    let state = AppState::new(
        &Database::in_memory(),
        JwtConfig {
            secret: "integration-test-secret".to_string(),
            ..Default::default()
        },
        PasswordPolicy::default(),
    );
    HttpServer::new(ServerSettings::default(), state).router()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register and log in; returns (token, user id)
async fn sign_up(app: &Router, username: &str) -> (String, String) {
    let email = format!("{}@example.com", username);
    let (status, _) = send(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": username, "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn create_channel(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/channel",
        Some(token),
        Some(json!({ "channelName": name, "description": "Talks about tech" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["channelId"].as_str().unwrap().to_string()
}

async fn upload_video(app: &Router, token: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/video",
        Some(token),
        Some(json!({
            "title": title,
            "videoLink": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "category": "Education"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_returns_profile() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "  Ada@Example.com ",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["avatar"], "https://placehold.co/40x40.png?text=A");
    assert_eq!(body["likedVideos"], json!([]));
    assert_eq!(body["subscribedChannels"], json!([]));
    assert!(body["channel"].is_null());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = app();
    sign_up(&app, "ada").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "other", "email": "ADA@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_bad_login_is_generic() {
    let app = app();
    sign_up(&app, "ada").await;

    let (wrong_password, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (unknown, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");

    let (status, _) = send(&app, "GET", "/api/me", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (token, user_id) = sign_up(&app, "ada").await;
    let (status, body) = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.as_str());
}

/// Tokens stay signed across a restart but the in-memory accounts do not.
#[tokio::test]
async fn test_token_outliving_its_account_is_401() {
    let before_restart = app();
    let (token, _) = sign_up(&before_restart, "ada").await;

    let after_restart = app();
    let (status, body) = send(&after_restart, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, user not found");

    let (status, _) = send(
        &after_restart,
        "POST",
        "/api/channel",
        Some(&token),
        Some(json!({ "channelName": "Ghost Channel" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_profile_hides_email() {
    let app = app();
    let (token, user_id) = sign_up(&app, "ada").await;
    let (_, other) = sign_up(&app, "bob").await;

    let (status, body) = send(&app, "GET", &format!("/api/user/{}", user_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ada");
    assert!(body.get("email").is_none());
    assert!(body.get("passwordHash").is_none());

    let (status, body) = send(&app, "GET", &format!("/api/user/{}", other), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("email").is_none());

    // The caller still sees their own address
    let (_, body) = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_invalid_id_is_400() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/video/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid id");
}

// =============================================================================
// Channels and Subscriptions
// =============================================================================

#[tokio::test]
async fn test_subscription_flow() {
    let app = app();
    let (owner_token, owner_id) = sign_up(&app, "alice").await;
    let (fan_token, _) = sign_up(&app, "bob").await;
    let channel_id = create_channel(&app, &owner_token, "Tech Talks").await;

    let subscribe = format!("/api/channel/{}/subscribe", channel_id);
    let unsubscribe = format!("/api/channel/{}/unsubscribe", channel_id);

    let (status, body) = send(&app, "PATCH", &subscribe, Some(&fan_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Subscribed", "subscribers": 1 }));

    let (_, body) = send(&app, "PATCH", &subscribe, Some(&fan_token), None).await;
    assert_eq!(body["subscribers"], 1);

    let (_, me) = send(&app, "GET", "/api/me", Some(&fan_token), None).await;
    assert_eq!(me["subscribedChannels"], json!([channel_id]));

    let (_, body) = send(&app, "PATCH", &unsubscribe, Some(&fan_token), None).await;
    assert_eq!(body, json!({ "message": "Unsubscribed", "subscribers": 0 }));

    let (status, _) = send(&app, "PATCH", &subscribe, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/userChannel/{}", owner_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tech Talks");
    assert_eq!(body["subscriberCount"], 0);
}

#[tokio::test]
async fn test_non_owner_update_is_403() {
    let app = app();
    let (owner_token, _) = sign_up(&app, "alice").await;
    let (intruder_token, _) = sign_up(&app, "mallory").await;
    let channel_id = create_channel(&app, &owner_token, "Tech Talks").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/updateChannel/{}", channel_id),
        Some(&intruder_token),
        Some(json!({ "channelName": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Unauthorized" }));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/updateChannel/{}", channel_id),
        Some(&owner_token),
        Some(json!({ "channelName": "Tech Talks Weekly" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tech Talks Weekly");
}

#[tokio::test]
async fn test_channel_delete_cascades_over_http() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;
    let channel_id = create_channel(&app, &token, "Tech Talks").await;
    let video_id = upload_video(&app, &token, "Intro").await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/deleteChannel/{}", channel_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Channel deleted");

    let (status, body) = send(&app, "GET", &format!("/api/video/{}", video_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Video not found");
}

// =============================================================================
// Videos and Reactions
// =============================================================================

#[tokio::test]
async fn test_reaction_flow() {
    let app = app();
    let (owner_token, _) = sign_up(&app, "alice").await;
    let (viewer_token, _) = sign_up(&app, "carol").await;
    create_channel(&app, &owner_token, "Tech Talks").await;
    let video_id = upload_video(&app, &owner_token, "Intro").await;

    let path = |action: &str| format!("/api/video/{}/{}", video_id, action);

    let (status, body) = send(&app, "PATCH", &path("like"), Some(&viewer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "likes": 1, "dislikes": 0 }));

    let (_, body) = send(&app, "PATCH", &path("dislike"), Some(&viewer_token), None).await;
    assert_eq!(body, json!({ "likes": 0, "dislikes": 1 }));

    let (_, body) = send(&app, "PATCH", &path("undislike"), Some(&viewer_token), None).await;
    assert_eq!(body, json!({ "likes": 0, "dislikes": 0 }));

    let (status, _) = send(&app, "PATCH", &path("like"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, "PATCH", &path("view"), None, None).await;
    assert_eq!(body, json!({ "views": 1 }));
}

#[tokio::test]
async fn test_video_listing_filters() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;
    create_channel(&app, &token, "Tech Talks").await;
    upload_video(&app, &token, "Rust basics").await;
    upload_video(&app, &token, "Cooking pasta").await;

    let (status, body) = send(&app, "GET", "/api/videos?search=RUST", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust basics"]);

    let (_, body) = send(&app, "GET", "/api/videos?category=All", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/videos?category=music", None, None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_bad_link() {
    let app = app();
    let (token, _) = sign_up(&app, "alice").await;
    create_channel(&app, &token, "Tech Talks").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/video",
        Some(&token),
        Some(json!({ "title": "Broken", "videoLink": "https://vimeo.com/1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid YouTube video ID or URL");
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn test_comment_flow() {
    let app = app();
    let (owner_token, _) = sign_up(&app, "alice").await;
    let (viewer_token, viewer_id) = sign_up(&app, "dave").await;
    create_channel(&app, &owner_token, "Tech Talks").await;
    let video_id = upload_video(&app, &owner_token, "Intro").await;

    let (status, comment) = send(
        &app,
        "POST",
        "/api/comment",
        Some(&viewer_token),
        Some(json!({ "videoId": video_id, "text": "Great talk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", &format!("/api/comment/{}", video_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["text"], "Great talk");
    assert_eq!(listed[0]["author"]["username"], "dave");
    assert_eq!(listed[0]["author"]["id"], viewer_id.as_str());

    let comment_path = format!("/api/comment/{}", comment_id);
    let (status, body) = send(
        &app,
        "PATCH",
        &comment_path,
        Some(&owner_token),
        Some(json!({ "text": "rewritten" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized");

    let (status, body) = send(
        &app,
        "PATCH",
        &comment_path,
        Some(&viewer_token),
        Some(json!({ "text": "Great talk, thanks" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Great talk, thanks");

    let (status, body) = send(&app, "DELETE", &comment_path, Some(&viewer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted");
}
