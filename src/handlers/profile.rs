use axum::{
    extract::{Multipart, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::Result,
    forms::{ArtistForm, FormErrors, FormMode, MultipartForm},
    services::{
        artist::update_profile,
        auth::{resolve_current_artist, PROFILE_PATH},
    },
    state::AppState,
    templates::{edit_profile_page, profile_page},
};

const EDIT_PROFILE_PATH: &str = "/profile/edit";
const UPDATED_NOTICE: &str = "Your profile has been updated successfully!";

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub updated: Option<String>,
}

pub async fn profile(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProfileQuery>,
) -> Result<Html<String>> {
    let artist = resolve_current_artist(&state.db, &session, PROFILE_PATH).await?;
    let message = query.updated.is_some().then_some(UPDATED_NOTICE);

    Ok(Html(profile_page(&artist, message).into_string()))
}

pub async fn edit_profile_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let artist = resolve_current_artist(&state.db, &session, EDIT_PROFILE_PATH).await?;
    let form = ArtistForm::from_model(&artist);

    Ok(Html(
        edit_profile_page(&artist, &form, &FormErrors::default()).into_string(),
    ))
}

pub async fn edit_profile(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let artist = resolve_current_artist(&state.db, &session, EDIT_PROFILE_PATH).await?;

    let mut submitted = MultipartForm::from_multipart(multipart).await?;
    let form = ArtistForm::from_multipart_form(&mut submitted);

    let errors = form.validate(FormMode::Edit);
    if !errors.is_empty() {
        return Ok(Html(edit_profile_page(&artist, &form, &errors).into_string()).into_response());
    }

    update_profile(&state.db, &state.media, artist, &form).await?;

    Ok(Redirect::to(&format!("{}?updated=1", PROFILE_PATH)).into_response())
}
