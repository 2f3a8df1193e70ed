//! Authentication and ownership rules shared by every protected handler.
//!
//! Failures are expressed as [`AppError::LoginRequired`] and [`AppError::Forbidden`],
//! which render as redirects rather than error pages.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    db::{entities::artist, repositories::ArtistRepository},
    error::{AppError, Result},
    services::password::verify_password,
    session::{current_username, end_session},
};

pub const LANDING_PATH: &str = "/";
pub const ARTISTS_PATH: &str = "/artists";
pub const LOGIN_PATH: &str = "/login";
pub const GALLERY_PATH: &str = "/gallery";
pub const PROFILE_PATH: &str = "/profile";

/// Login page URL, carrying `next` when it is a safe local path
pub fn login_url(next: Option<&str>) -> String {
    match next.and_then(safe_next) {
        Some(next) => format!("{}?next={}", LOGIN_PATH, urlencoding::encode(next)),
        None => LOGIN_PATH.to_string(),
    }
}

/// Accept a post-login redirect target only if it stays on this site
pub fn safe_next(next: &str) -> Option<&str> {
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.chars().any(char::is_control);

    local.then_some(next)
}

/// Check stored credentials. Unknown usernames and wrong passwords are
/// indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<artist::Model>> {
    let artist = ArtistRepository::new(db.clone())
        .find_by_username(username)
        .await?;

    Ok(artist.filter(|artist| verify_password(password, &artist.password_hash)))
}

/// Username of the logged-in artist, or a redirect to login that returns to `next`
pub async fn require_session(session: &Session, next: &str) -> Result<String> {
    current_username(session).await?.ok_or_else(|| AppError::LoginRequired {
        next: Some(next.to_string()),
    })
}

/// Load the logged-in artist's record.
///
/// If the session names an artist that no longer exists, the session is ended
/// and the caller is sent to login.
pub async fn resolve_current_artist(
    db: &DatabaseConnection,
    session: &Session,
    next: &str,
) -> Result<artist::Model> {
    let username = require_session(session, next).await?;

    match ArtistRepository::new(db.clone())
        .find_by_username(&username)
        .await?
    {
        Some(artist) => Ok(artist),
        None => {
            tracing::warn!("Session references missing artist {}, clearing it", username);
            end_session(session).await?;
            Err(AppError::LoginRequired { next: None })
        }
    }
}

/// True iff `username` is the owning artist
pub fn authorize_owner(owner: &artist::Model, username: &str) -> bool {
    owner.username == username
}
