use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{art, artist};
use crate::error::Result;

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Exact, case-sensitive username lookup
    pub async fn find_by_username(&self, username: &str) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(artist::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = artist::Entity::find()
            .filter(artist::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, artist: artist::ActiveModel) -> Result<artist::Model> {
        Ok(artist.insert(&self.db).await?)
    }

    pub async fn update(&self, artist: artist::ActiveModel) -> Result<artist::Model> {
        Ok(artist.update(&self.db).await?)
    }

    /// Replace the artist's story; `None` clears it
    pub async fn save_story(
        &self,
        artist: artist::Model,
        story: Option<String>,
    ) -> Result<artist::Model> {
        let mut active: artist::ActiveModel = artist.into();
        active.story = Set(story);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }
}

pub struct ArtRepository {
    db: DatabaseConnection,
}

impl ArtRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<art::Model>> {
        Ok(art::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Artwork together with its owning artist
    pub async fn find_with_owner(&self, id: i32) -> Result<Option<(art::Model, artist::Model)>> {
        let found = art::Entity::find_by_id(id)
            .find_also_related(artist::Entity)
            .one(&self.db)
            .await?;

        // The foreign key guarantees an owner; a missing one is treated as a missing record.
        Ok(found.and_then(|(art, owner)| owner.map(|owner| (art, owner))))
    }

    /// All artworks owned by `artist_id`, newest first
    pub async fn list_by_owner(&self, artist_id: i32) -> Result<Vec<art::Model>> {
        Ok(art::Entity::find()
            .filter(art::Column::ArtistId.eq(artist_id))
            .order_by_desc(art::Column::CreatedAt)
            .order_by_desc(art::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, art: art::ActiveModel) -> Result<art::Model> {
        Ok(art.insert(&self.db).await?)
    }

    pub async fn update(&self, art: art::ActiveModel) -> Result<art::Model> {
        Ok(art.update(&self.db).await?)
    }

    pub async fn delete(&self, art: art::Model) -> Result<()> {
        art.delete(&self.db).await?;
        Ok(())
    }
}
