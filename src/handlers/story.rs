use axum::{
    extract::{rejection::{FormRejection, JsonRejection}, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    db::repositories::ArtistRepository,
    error::Result,
    services::{auth::resolve_current_artist, generate_story},
    session::current_username,
    state::AppState,
    templates::story_page as render_story_page,
};

const STORY_PATH: &str = "/story";

#[derive(Debug, Deserialize)]
pub struct PreviewStoryRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewStoryResponse {
    pub story_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveStoryForm {
    pub story_text: Option<String>,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn story_page(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    let artist = resolve_current_artist(&state.db, &session, STORY_PATH).await?;
    Ok(Html(render_story_page(&artist).into_string()))
}

/// Generate a story from a craft topic without saving it
pub async fn preview_story(payload: std::result::Result<Json<PreviewStoryRequest>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(request)) => Json(PreviewStoryResponse {
            story_text: generate_story(&request.text),
        })
        .into_response(),
        Err(rejection) => {
            tracing::debug!("Rejected story preview: {}", rejection);
            json_error(StatusCode::BAD_REQUEST, "Invalid request")
        }
    }
}

/// Persist the story text on the logged-in artist
pub async fn save_story(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Form<SaveStoryForm>, FormRejection>,
) -> Result<Response> {
    let Some(username) = current_username(&session).await? else {
        return Ok(json_error(StatusCode::FORBIDDEN, "Not authenticated"));
    };

    let repo = ArtistRepository::new(state.db.clone());
    let Some(artist) = repo.find_by_username(&username).await? else {
        return Ok(json_error(StatusCode::NOT_FOUND, "Artist not found"));
    };

    // A body without a readable `story_text` field clears the story
    let story_text = match payload {
        Ok(Form(form)) => form.story_text,
        Err(rejection) => {
            tracing::debug!("Story save body not readable as a form: {}", rejection);
            None
        }
    };

    repo.save_story(artist, story_text).await?;
    tracing::info!("Artist {} saved their story", username);

    Ok(Json(json!({
        "success": true,
        "message": "Story saved successfully!",
    }))
    .into_response())
}

/// Story endpoints only accept POST
pub async fn invalid_request() -> Response {
    json_error(StatusCode::BAD_REQUEST, "Invalid request")
}
