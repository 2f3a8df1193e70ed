use axum::{
    extract::{FromRequestParts, Multipart, Path, State},
    http::request::Parts,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    db::{entities::art, repositories::ArtRepository},
    error::{AppError, Result},
    forms::{ArtForm, FormErrors, FormMode, MultipartForm},
    services::{
        artwork,
        auth::{authorize_owner, require_session, resolve_current_artist, GALLERY_PATH},
    },
    state::AppState,
    templates::{add_art_page, edit_art_page, gallery_page},
};

const ADD_ARTWORK_PATH: &str = "/art/new";

/// Numeric artwork id from the path. Anything else is a missing artwork.
pub struct ArtId(pub i32);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ArtId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected artwork id: {}", rejection);
                AppError::NotFound("Artwork not found".to_string())
            })?;

        Ok(Self(id))
    }
}

/// Load an artwork the session's artist is allowed to mutate.
///
/// Checks run in order: session (redirect to login), existence (404), ownership
/// (redirect to the actor's own gallery).
async fn load_owned_art(
    state: &AppState,
    session: &Session,
    art_id: i32,
    next: &str,
) -> Result<(art::Model, String)> {
    let username = require_session(session, next).await?;

    let (art, owner) = ArtRepository::new(state.db.clone())
        .find_with_owner(art_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    if !authorize_owner(&owner, &username) {
        tracing::warn!(
            "Artist {} tried to modify artwork {} owned by {}",
            username,
            art.id,
            owner.username
        );
        return Err(AppError::Forbidden);
    }

    Ok((art, username))
}

/// The logged-in artist's own artworks
pub async fn gallery(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    let artist = resolve_current_artist(&state.db, &session, GALLERY_PATH).await?;
    let portfolio = artwork::list_own_artworks(&state.db, artist).await?;

    Ok(Html(gallery_page(&portfolio).into_string()))
}

pub async fn add_artwork_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let artist = resolve_current_artist(&state.db, &session, ADD_ARTWORK_PATH).await?;
    let markup = add_art_page(&artist.username, &ArtForm::default(), &FormErrors::default());
    Ok(Html(markup.into_string()))
}

pub async fn add_artwork(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let artist = resolve_current_artist(&state.db, &session, ADD_ARTWORK_PATH).await?;

    let mut submitted = MultipartForm::from_multipart(multipart).await?;
    let form = ArtForm::from_multipart_form(&mut submitted);

    let errors = form.validate(FormMode::Create);
    if !errors.is_empty() {
        return Ok(Html(add_art_page(&artist.username, &form, &errors).into_string()).into_response());
    }

    artwork::create_artwork(&state.db, &state.media, &form, &artist).await?;

    Ok(Redirect::to(GALLERY_PATH).into_response())
}

pub async fn edit_artwork_form(
    State(state): State<AppState>,
    session: Session,
    ArtId(art_id): ArtId,
) -> Result<Html<String>> {
    let next = format!("/art/{}/edit", art_id);
    let (art, username) = load_owned_art(&state, &session, art_id, &next).await?;

    let form = ArtForm::from_model(&art);
    Ok(Html(
        edit_art_page(&username, &art, &form, &FormErrors::default()).into_string(),
    ))
}

pub async fn edit_artwork(
    State(state): State<AppState>,
    session: Session,
    ArtId(art_id): ArtId,
    multipart: Multipart,
) -> Result<Response> {
    let next = format!("/art/{}/edit", art_id);
    let (art, username) = load_owned_art(&state, &session, art_id, &next).await?;

    let mut submitted = MultipartForm::from_multipart(multipart).await?;
    let form = ArtForm::from_multipart_form(&mut submitted);

    let errors = form.validate(FormMode::Edit);
    if !errors.is_empty() {
        return Ok(Html(edit_art_page(&username, &art, &form, &errors).into_string()).into_response());
    }

    artwork::update_artwork(&state.db, &state.media, art, &form).await?;

    Ok(Redirect::to(GALLERY_PATH).into_response())
}

pub async fn delete_artwork(
    State(state): State<AppState>,
    session: Session,
    ArtId(art_id): ArtId,
) -> Result<Redirect> {
    let (art, _) = load_owned_art(&state, &session, art_id, GALLERY_PATH).await?;
    artwork::delete_artwork(&state.db, art).await?;

    Ok(Redirect::to(GALLERY_PATH))
}

/// Deletion only happens on POST; any other method is sent back to the gallery
pub async fn delete_artwork_not_post() -> Redirect {
    Redirect::to(GALLERY_PATH)
}
