//! Artwork lifecycle: `nonexistent -> created -> edited* -> deleted`.
//!
//! Callers validate the [`ArtForm`] and run the ownership check first; these
//! functions only persist.

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

use crate::{
    db::{
        entities::{art, artist},
        repositories::{ArtRepository, ArtistRepository},
    },
    error::{AppError, Result},
    forms::ArtForm,
    services::media::{MediaStore, ART_FOLDER},
};

/// An artist together with the artworks they own
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub artist: artist::Model,
    pub artworks: Vec<art::Model>,
    pub no_artworks: bool,
}

/// Artworks owned by `owner`, newest first
pub async fn list_own_artworks(db: &DatabaseConnection, owner: artist::Model) -> Result<Portfolio> {
    let artworks = ArtRepository::new(db.clone()).list_by_owner(owner.id).await?;
    let no_artworks = artworks.is_empty();

    Ok(Portfolio {
        artist: owner,
        artworks,
        no_artworks,
    })
}

/// Public portfolio of the artist named `username`; `None` when no such artist exists
pub async fn list_public_artworks(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<Portfolio>> {
    match ArtistRepository::new(db.clone())
        .find_by_username(username)
        .await?
    {
        Some(artist) => Ok(Some(list_own_artworks(db, artist).await?)),
        None => Ok(None),
    }
}

/// Store a new artwork owned by `owner`
pub async fn create_artwork(
    db: &DatabaseConnection,
    media: &MediaStore,
    form: &ArtForm,
    owner: &artist::Model,
) -> Result<art::Model> {
    let upload = form.art_image.as_ref().ok_or_else(|| {
        AppError::Internal("An artwork cannot be created without an image".to_string())
    })?;
    let image = media.save(ART_FOLDER, upload).await?;

    let now = Utc::now().into();
    let art = art::ActiveModel {
        art_name: Set(form.art_name.clone()),
        art_category: Set(form.art_category.clone()),
        description: Set(form.description.clone()),
        art_image: Set(image),
        artist_id: Set(owner.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let art = ArtRepository::new(db.clone()).create(art).await?;
    tracing::info!("Artist {} created artwork {} ({})", owner.username, art.id, art.art_name);

    Ok(art)
}

/// Apply an edit in place. A form without an image keeps the current one.
pub async fn update_artwork(
    db: &DatabaseConnection,
    media: &MediaStore,
    art: art::Model,
    form: &ArtForm,
) -> Result<art::Model> {
    let new_image = match &form.art_image {
        Some(upload) => Some(media.save(ART_FOLDER, upload).await?),
        None => None,
    };

    let mut active: art::ActiveModel = art.into();
    active.art_name = Set(form.art_name.clone());
    active.art_category = Set(form.art_category.clone());
    active.description = Set(form.description.clone());
    if let Some(path) = new_image {
        active.art_image = Set(path);
    }
    active.updated_at = Set(Utc::now().into());

    let art = ArtRepository::new(db.clone()).update(active).await?;
    tracing::info!("Artwork {} updated", art.id);

    Ok(art)
}

/// Permanently remove an artwork. The image blob is left in the media store.
pub async fn delete_artwork(db: &DatabaseConnection, art: art::Model) -> Result<()> {
    let id = art.id;
    ArtRepository::new(db.clone()).delete(art).await?;
    tracing::info!("Artwork {} deleted", id);
    Ok(())
}
