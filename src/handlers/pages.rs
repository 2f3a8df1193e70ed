use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    db::repositories::ArtistRepository,
    error::Result,
    services::{artwork, auth::ARTISTS_PATH},
    session::current_username,
    state::AppState,
    templates::{artist_page, artists_page, landing_page},
};

/// Public landing page
pub async fn landing(session: Session) -> Result<Html<String>> {
    let viewer = current_username(&session).await?;
    Ok(Html(landing_page(viewer.as_deref()).into_string()))
}

/// Directory of every registered artist
pub async fn artists(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    let viewer = current_username(&session).await?;
    let artists = ArtistRepository::new(state.db.clone()).list_all().await?;

    Ok(Html(artists_page(viewer.as_deref(), &artists).into_string()))
}

/// Another artist's public page; unknown usernames go back to the directory
pub async fn artist_artworks(
    State(state): State<AppState>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Response> {
    let Some(portfolio) = artwork::list_public_artworks(&state.db, &username).await? else {
        tracing::debug!("No artist named {}, redirecting to directory", username);
        return Ok(Redirect::to(ARTISTS_PATH).into_response());
    };

    let viewer = current_username(&session).await?;
    Ok(Html(artist_page(viewer.as_deref(), &portfolio).into_string()).into_response())
}
