//! Test utilities for Artisan Gallery
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - In-memory session stores shared between the router and the test
//! - A throwaway media directory per AppState
//! - Test data generators and request body builders

use std::collections::HashMap;
use std::ops::Deref;

use axum::Router;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tower_sessions::{
    session::{Id, Record},
    MemoryStore, SessionStore,
};
use uuid::Uuid;

use crate::{
    config::Config,
    db::entities::{art, artist},
    handlers,
    services::password::hash_password,
    session::{session_layer, SESSION_COOKIE, USERNAME_KEY},
    state::AppState,
};

/// Small PNG payload for upload tests
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults and a unique media root
pub fn test_config() -> Config {
    let media_root = std::env::temp_dir().join(format!("artisan-gallery-test-{}", Uuid::new_v4()));

    Config {
        database_url: "sqlite::memory:".to_string(),
        redis_url: "redis://127.0.0.1:6379".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        media_root: media_root.to_string_lossy().into_owned(),
        session_ttl_seconds: 3600,
        session_cookie_secure: false,
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

/// Application state plus the session store its router writes to
#[derive(Clone)]
pub struct TestApp {
    pub state: AppState,
    pub sessions: MemoryStore,
}

impl Deref for TestApp {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

impl TestApp {
    /// All routes behind the session layer, as `main` serves them
    pub fn router(&self) -> Router {
        handlers::routes()
            .layer(session_layer(self.sessions.clone(), &self.state.config))
            .with_state(self.state.clone())
    }

    /// Username stored under the session id carried by a `sessionid` cookie value
    pub async fn session_username(&self, session_id: &str) -> Option<String> {
        let id: Id = session_id.parse().ok()?;
        let record = self.sessions.load(&id).await.expect("Failed to load session")?;

        record
            .data
            .get(USERNAME_KEY)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }
}

/// Create a complete test app with an isolated database and session store
pub async fn setup_test_app_state() -> TestApp {
    let db = setup_test_db().await;

    TestApp {
        state: AppState::new(db, test_config()),
        sessions: MemoryStore::default(),
    }
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test artist in the database with a hashed password
pub async fn create_test_artist(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> artist::Model {
    let now = Utc::now().into();
    let artist = artist::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password).expect("Failed to hash password")),
        name: Set(format!("{} the Artisan", username)),
        email: Set(format!("{}@example.com", username)),
        contact: Set("5550100".to_string()),
        address: Set("1 Kiln Lane".to_string()),
        state: Set("Rajasthan".to_string()),
        about: Set("Makes things by hand".to_string()),
        art_category: Set("pottery".to_string()),
        profile: Set(None),
        story: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test artwork owned by `artist_id`
pub async fn create_test_art(db: &DatabaseConnection, artist_id: i32, art_name: &str) -> art::Model {
    let now = Utc::now().into();
    let art = art::ActiveModel {
        art_name: Set(art_name.to_string()),
        art_category: Set("painting".to_string()),
        description: Set(format!("{} description", art_name)),
        art_image: Set("art_images/test.png".to_string()),
        artist_id: Set(artist_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    art.insert(db).await.expect("Failed to insert test art")
}

/// Log `username` in directly through the session store and return a `Cookie`
/// header value carrying the session
pub async fn login_cookie(app: &TestApp, username: &str) -> String {
    let mut record = Record {
        id: Id::default(),
        data: HashMap::from([(USERNAME_KEY.to_string(), json!(username))]),
        expiry_date: OffsetDateTime::now_utc() + Duration::hours(1),
    };
    app.sessions
        .create(&mut record)
        .await
        .expect("Failed to store test session");

    format!("{}={}", SESSION_COOKIE, record.id)
}

// ============================================================================
// Request Body Builders
// ============================================================================

/// Builder for `multipart/form-data` request bodies
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: format!("----artisan-test-{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Returns `(content_type_header, body)`
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
