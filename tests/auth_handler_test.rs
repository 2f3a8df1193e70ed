//! Integration tests for registration, login and logout
//!
//! Covers:
//! - Registration (success, validation errors, duplicate usernames)
//! - Login (success, `next` handling, failed credentials)
//! - Logout and session-gated redirects

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use artisan_gallery::db::entities::artist;
use artisan_gallery::services::password::verify_password;
use artisan_gallery::test_utils::*;

/// Helper to create a test router with all routes
fn create_test_router(state: &TestApp) -> Router {
    state.router()
}

/// Helper to read a response body as text
async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

/// Session token from the response's `Set-Cookie` header
fn session_token(response: &Response) -> Option<String> {
    let cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    cookie
        .split(';')
        .next()?
        .strip_prefix("sessionid=")
        .map(str::to_string)
}

fn registration_body(username: &str, password: &str) -> (String, Vec<u8>) {
    MultipartBody::new()
        .text("name", "Alice Potter")
        .text("username", username)
        .text("password", password)
        .text("email", "alice@example.com")
        .text("contact", "5550100")
        .text("address", "1 Kiln Lane")
        .text("state", "Rajasthan")
        .text("about", "I make pots")
        .text("art_category", "pottery")
        .file("profile", "me.png", "image/png", TINY_PNG)
        .finish()
}

fn login_request(uri: &str, username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            username, password
        )))
        .unwrap()
}

#[tokio::test]
async fn test_register_creates_artist_with_hashed_password() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let (content_type, body) = registration_body("alice", "pw1");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?registered=1");

    let artists = artist::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].username, "alice");
    assert_eq!(artists[0].story, None);
    assert_ne!(artists[0].password_hash, "pw1");
    assert!(verify_password("pw1", &artists[0].password_hash));

    let profile = artists[0].profile.as_deref().unwrap();
    assert!(profile.starts_with("profile_pics/"));
    assert!(state.media.root().join(profile).exists());
}

#[tokio::test]
async fn test_register_form_renders() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/register").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("multipart/form-data"));
    assert!(html.contains("name=\"username\""));
}

#[tokio::test]
async fn test_register_with_missing_fields_redisplays_form() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let (content_type, body) = MultipartBody::new()
        .text("name", "Alice")
        .text("username", "alice")
        .finish();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("This field is required."));
    // Submitted values are kept
    assert!(html.contains("value=\"alice\""));

    let count = artist::Entity::find().count(&state.db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "original").await;
    let app = create_test_router(&state);

    let (content_type, body) = registration_body("alice", "pw1");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("An artist with that username already exists."));

    let count = artist::Entity::find().count(&state.db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_concurrent_registrations_for_one_username() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let register = || {
        let (content_type, body) = registration_body("alice", "pw1");
        Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    };

    let (first, second) = tokio::join!(
        app.clone().oneshot(register()),
        app.clone().oneshot(register())
    );
    let mut responses = vec![first.unwrap(), second.unwrap()];
    responses.sort_by_key(|response| response.status());

    // One registration wins, the other sees the username error on the form
    let registered = responses.pop().unwrap();
    let redisplayed = responses.pop().unwrap();
    assert_eq!(registered.status(), StatusCode::SEE_OTHER);
    assert_eq!(redisplayed.status(), StatusCode::OK);
    assert!(body_text(redisplayed)
        .await
        .contains("An artist with that username already exists."));

    let count = artist::Entity::find().count(&state.db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_login_page_shows_registration_notice() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/login?registered=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Registration successful! Please log in."));
}

#[tokio::test]
async fn test_login_success_establishes_session() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(login_request("/login", "alice", "pw1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/gallery");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("HttpOnly"));

    let token = session_token(&response).unwrap();
    assert_eq!(
        state.session_username(&token).await,
        Some("alice".to_string())
    );
}

#[tokio::test]
async fn test_login_replaces_existing_session_id() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    create_test_artist(&state.db, "mallory", "pw2").await;
    let planted = login_cookie(&state, "mallory").await;
    let app = create_test_router(&state);

    let mut request = login_request("/login", "alice", "pw1");
    request
        .headers_mut()
        .insert(header::COOKIE, planted.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let token = session_token(&response).unwrap();
    let planted_token = planted.strip_prefix("sessionid=").unwrap();
    assert_ne!(token, planted_token);
    assert_eq!(state.session_username(&token).await, Some("alice".to_string()));
    assert_eq!(state.session_username(planted_token).await, None);
}

#[tokio::test]
async fn test_login_redirects_to_next() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(login_request("/login?next=%2Fprofile", "alice", "pw1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");
}

#[tokio::test]
async fn test_login_ignores_offsite_next() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(login_request(
            "/login?next=https%3A%2F%2Fevil.example",
            "alice",
            "pw1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/gallery");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let app = create_test_router(&state);

    let wrong_password = app
        .clone()
        .oneshot(login_request("/login", "alice", "nope"))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(login_request("/login", "mallory", "pw1"))
        .await
        .unwrap();

    for response in [wrong_password, unknown_user] {
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(response)
            .await
            .contains("Invalid username or password."));
    }
}

#[tokio::test]
async fn test_logout_clears_session() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let token = cookie.strip_prefix("sessionid=").unwrap();
    assert_eq!(state.session_username(token).await, None);

    // The old cookie no longer grants access
    let response = app
        .oneshot(
            Request::builder()
                .uri("/gallery")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fgallery");
}

#[tokio::test]
async fn test_logout_without_session_is_noop() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_gallery_without_session_redirects_to_login_with_next() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/gallery").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fgallery");
}

#[tokio::test]
async fn test_stale_session_is_cleared() {
    let state = setup_test_app_state().await;
    let cookie = login_cookie(&state, "ghost").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/gallery")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let token = cookie.strip_prefix("sessionid=").unwrap();
    assert_eq!(state.session_username(token).await, None);
}

#[tokio::test]
async fn test_public_pages_render_without_session() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    create_test_artist(&state.db, "bob", "pw2").await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/artists").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("/artists/alice"));
    assert!(html.contains("/artists/bob"));
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("\"status\":\"ok\""));
}
