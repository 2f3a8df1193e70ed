use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id PHC string, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub state: String,
    #[sea_orm(column_type = "Text")]
    pub about: String,
    pub art_category: String,
    /// Media path of the profile picture
    pub profile: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub story: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::art::Entity")]
    Arts,
}

impl Related<super::art::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Arts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
