use axum::{
    extract::{Multipart, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    db::repositories::ArtistRepository,
    error::Result,
    forms::{ArtistForm, FormErrors, FormMode, MultipartForm},
    services::{
        artist::register_artist,
        auth::{authenticate, safe_next, GALLERY_PATH, LANDING_PATH},
    },
    session::{current_username, end_session, log_in},
    state::AppState,
    templates::{login_page, register_page, LoginView},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const DUPLICATE_USERNAME: &str = "An artist with that username already exists.";
const REGISTERED_NOTICE: &str = "Registration successful! Please log in.";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    pub registered: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

pub async fn register_form(session: Session) -> Result<Html<String>> {
    let viewer = current_username(&session).await?;
    let markup = register_page(viewer.as_deref(), &ArtistForm::default(), &FormErrors::default());
    Ok(Html(markup.into_string()))
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let mut submitted = MultipartForm::from_multipart(multipart).await?;
    let form = ArtistForm::from_multipart_form(&mut submitted);

    let mut errors = form.validate(FormMode::Create);
    if !errors.contains("username")
        && ArtistRepository::new(state.db.clone())
            .username_exists(&form.username)
            .await?
    {
        errors.add("username", DUPLICATE_USERNAME);
    }

    if errors.is_empty() {
        match register_artist(&state.db, &state.media, &form).await {
            Ok(_) => return Ok(Redirect::to("/login?registered=1").into_response()),
            // Another registration claimed the username after the check above
            Err(err) if err.is_unique_violation() => {
                tracing::info!("Username {} was taken concurrently", form.username);
                errors.add("username", DUPLICATE_USERNAME);
            }
            Err(err) => return Err(err),
        }
    }

    let viewer = current_username(&session).await?;
    Ok(Html(register_page(viewer.as_deref(), &form, &errors).into_string()).into_response())
}

pub async fn login_form(
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>> {
    let viewer = current_username(&session).await?;
    let view = LoginView {
        next: query.next.as_deref().and_then(safe_next),
        notice: query.registered.is_some().then_some(REGISTERED_NOTICE),
        ..Default::default()
    };

    Ok(Html(login_page(viewer.as_deref(), &view).into_string()))
}

/// Verify credentials, start a session and continue to `next` (or the gallery)
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = query
        .next
        .or(form.next)
        .filter(|next| !next.is_empty());

    let Some(artist) = authenticate(&state.db, &form.username, &form.password).await? else {
        tracing::warn!("Failed login attempt for {:?}", form.username);
        let view = LoginView {
            next: next.as_deref().and_then(safe_next),
            error: Some(INVALID_CREDENTIALS),
            username: &form.username,
            ..Default::default()
        };
        return Ok(Html(login_page(None, &view).into_string()).into_response());
    };

    log_in(&session, &artist.username).await?;
    tracing::info!("Artist {} logged in", artist.username);

    let target = next
        .as_deref()
        .and_then(safe_next)
        .unwrap_or(GALLERY_PATH)
        .to_string();

    Ok(Redirect::to(&target).into_response())
}

/// End the session; always lands on the public landing page
pub async fn logout(session: Session) -> Result<Redirect> {
    if let Some(username) = current_username(&session).await? {
        tracing::info!("Artist {} logged out", username);
    }
    end_session(&session).await?;

    Ok(Redirect::to(LANDING_PATH))
}
