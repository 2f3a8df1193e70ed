//! Artist registration and profile updates.

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

use crate::{
    db::{entities::artist, repositories::ArtistRepository},
    error::Result,
    forms::ArtistForm,
    services::{
        media::{MediaStore, PROFILE_FOLDER},
        password::hash_password,
    },
};

/// Create a new artist from a validated registration form
pub async fn register_artist(
    db: &DatabaseConnection,
    media: &MediaStore,
    form: &ArtistForm,
) -> Result<artist::Model> {
    let password_hash = hash_password(&form.password)?;
    let profile = match &form.profile {
        Some(upload) => Some(media.save(PROFILE_FOLDER, upload).await?),
        None => None,
    };

    let now = Utc::now().into();
    let artist = artist::ActiveModel {
        username: Set(form.username.clone()),
        password_hash: Set(password_hash),
        name: Set(form.name.clone()),
        email: Set(form.email.clone()),
        contact: Set(form.contact.clone()),
        address: Set(form.address.clone()),
        state: Set(form.state.clone()),
        about: Set(form.about.clone()),
        art_category: Set(form.art_category.clone()),
        profile: Set(profile),
        story: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let artist = ArtistRepository::new(db.clone()).create(artist).await?;
    tracing::info!("Registered artist {}", artist.username);

    Ok(artist)
}

/// Apply a validated profile edit. The username never changes; a blank password
/// or missing picture keeps the current value.
pub async fn update_profile(
    db: &DatabaseConnection,
    media: &MediaStore,
    artist: artist::Model,
    form: &ArtistForm,
) -> Result<artist::Model> {
    let password_hash = match form.new_password() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let profile = match &form.profile {
        Some(upload) => Some(media.save(PROFILE_FOLDER, upload).await?),
        None => None,
    };

    let mut active: artist::ActiveModel = artist.into();
    active.name = Set(form.name.clone());
    active.email = Set(form.email.clone());
    active.contact = Set(form.contact.clone());
    active.address = Set(form.address.clone());
    active.state = Set(form.state.clone());
    active.about = Set(form.about.clone());
    active.art_category = Set(form.art_category.clone());
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    if let Some(path) = profile {
        active.profile = Set(Some(path));
    }
    active.updated_at = Set(Utc::now().into());

    let artist = ArtistRepository::new(db.clone()).update(active).await?;
    tracing::info!("Artist {} updated their profile", artist.username);

    Ok(artist)
}
