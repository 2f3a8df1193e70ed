//! Integration tests for viewing and editing the logged-in artist's profile

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use sea_orm::EntityTrait;
use tower::util::ServiceExt;

use artisan_gallery::db::entities::artist;
use artisan_gallery::services::password::verify_password;
use artisan_gallery::test_utils::*;

/// Helper to create a test router with all routes
fn create_test_router(state: &TestApp) -> Router {
    state.router()
}

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

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn edit_request(cookie: &str, form: MultipartBody) -> Request<Body> {
    let (content_type, body) = form.finish();
    Request::builder()
        .method("POST")
        .uri("/profile/edit")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

fn profile_form(name: &str) -> MultipartBody {
    MultipartBody::new()
        .text("name", name)
        .text("email", "alice@studio.example")
        .text("contact", "5550199")
        .text("address", "2 Loom Street")
        .text("state", "Gujarat")
        .text("about", "Weaves by hand")
        .text("art_category", "weaving")
}

async fn reload(state: &TestApp, id: i32) -> artist::Model {
    artist::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_profile_requires_login() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get_request("/profile", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fprofile");
}

#[tokio::test]
async fn test_profile_shows_own_details() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(get_request("/profile", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("alice@example.com"));
    assert!(html.contains("alice the Artisan"));
    assert!(!html.contains("updated successfully"));
}

#[tokio::test]
async fn test_profile_updated_notice() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(get_request("/profile?updated=1", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Your profile has been updated successfully!"));
}

#[tokio::test]
async fn test_edit_profile_form_prefilled() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(get_request("/profile/edit", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("value=\"alice the Artisan\""));
    assert!(html.contains("value=\"1 Kiln Lane\""));
    assert!(html.contains("Makes things by hand"));
}

#[tokio::test]
async fn test_edit_profile_keeps_username_and_password() {
    let state = setup_test_app_state().await;
    let alice = create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let form = profile_form("Alice Weaver")
        .text("username", "mallory")
        .text("password", "");
    let response = app.oneshot(edit_request(&cookie, form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile?updated=1");

    let updated = reload(&state, alice.id).await;
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.name, "Alice Weaver");
    assert_eq!(updated.state, "Gujarat");
    assert_eq!(updated.art_category, "weaving");
    assert_eq!(updated.password_hash, alice.password_hash);
    assert_eq!(updated.profile, None);
}

#[tokio::test]
async fn test_edit_profile_changes_password() {
    let state = setup_test_app_state().await;
    let alice = create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let form = profile_form("Alice").text("password", "new-secret");
    let response = app.oneshot(edit_request(&cookie, form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = reload(&state, alice.id).await;
    assert!(verify_password("new-secret", &updated.password_hash));
    assert!(!verify_password("pw1", &updated.password_hash));
}

#[tokio::test]
async fn test_edit_profile_with_new_picture() {
    let state = setup_test_app_state().await;
    let alice = create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let form = profile_form("Alice").file("profile", "me.png", "image/png", TINY_PNG);
    let response = app.oneshot(edit_request(&cookie, form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = reload(&state, alice.id).await;
    let profile = updated.profile.expect("profile picture should be stored");
    assert!(profile.starts_with("profile_pics/"));
    assert!(state.media.root().join(&profile).exists());
}

#[tokio::test]
async fn test_edit_profile_invalid_redisplays_form() {
    let state = setup_test_app_state().await;
    let alice = create_test_artist(&state.db, "alice", "pw1").await;
    let cookie = login_cookie(&state, "alice").await;
    let app = create_test_router(&state);

    let form = MultipartBody::new()
        .text("name", "")
        .text("email", "not-an-email")
        .text("contact", "5550199")
        .text("address", "2 Loom Street")
        .text("state", "Gujarat")
        .text("about", "Weaves by hand")
        .text("art_category", "weaving");
    let response = app.oneshot(edit_request(&cookie, form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("This field is required."));
    assert!(html.contains("Enter a valid email address."));

    assert_eq!(reload(&state, alice.id).await, alice);
}

#[tokio::test]
async fn test_edit_profile_stale_session() {
    let state = setup_test_app_state().await;
    let cookie = login_cookie(&state, "ghost").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(get_request("/profile/edit", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
