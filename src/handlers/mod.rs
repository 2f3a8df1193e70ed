pub mod auth;
pub mod gallery;
pub mod health;
pub mod pages;
pub mod profile;
pub mod story;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(pages::landing))
        .route("/artists", get(pages::artists))
        .route("/artists/:username", get(pages::artist_artworks))

        // Authentication
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))

        // Logged-in artist
        .route("/gallery", get(gallery::gallery))
        .route("/profile", get(profile::profile))
        .route("/profile/edit", get(profile::edit_profile_form).post(profile::edit_profile))

        // Artwork lifecycle
        .route("/art/new", get(gallery::add_artwork_form).post(gallery::add_artwork))
        .route("/art/:id/edit", get(gallery::edit_artwork_form).post(gallery::edit_artwork))
        .route(
            "/art/:id/delete",
            post(gallery::delete_artwork).fallback(gallery::delete_artwork_not_post),
        )

        // Story generator
        .route("/story", get(story::story_page))
        .route("/story/preview", post(story::preview_story).fallback(story::invalid_request))
        .route("/story/save", post(story::save_story).fallback(story::invalid_request))

        .route("/health", get(health::health_check))
}
