//! Server-side sessions on top of `tower-sessions`.
//!
//! The [`SessionManagerLayer`] built by [`session_layer`] loads the session named by
//! the `sessionid` cookie and saves it after the handler runs. Handlers take a
//! [`Session`] and use the helpers below to read or change the logged-in username.

pub mod redis;

use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, Session, SessionManagerLayer, SessionStore};

use crate::config::Config;
use crate::error::Result;

pub use self::redis::RedisSessionStore;

pub const SESSION_COOKIE: &str = "sessionid";

/// Key under which the logged-in artist's username is stored
pub const USERNAME_KEY: &str = "username";

/// Browsers cap cookie lifetimes at 400 days
const MAX_SESSION_TTL_SECONDS: u64 = 400 * 24 * 60 * 60;

/// Session middleware: HttpOnly, SameSite=Lax cookie that expires after
/// `session_ttl_seconds` of inactivity
pub fn session_layer<S>(store: S, config: &Config) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    let ttl = config.session_ttl_seconds.min(MAX_SESSION_TTL_SECONDS) as i64;

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.session_cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(ttl)))
}

/// Username of the logged-in artist, if any
pub async fn current_username(session: &Session) -> Result<Option<String>> {
    Ok(session.get::<String>(USERNAME_KEY).await?)
}

/// Bind `username` to the session under a new session id. The previous id, and
/// anything stored under it, is discarded.
pub async fn log_in(session: &Session, username: &str) -> Result<()> {
    session.cycle_id().await?;
    session.insert(USERNAME_KEY, username).await?;
    Ok(())
}

/// Delete the session from the store and expire its cookie; a session that was
/// never stored is left as is
pub async fn end_session(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
