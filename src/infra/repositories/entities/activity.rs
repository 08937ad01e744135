//! Activity database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Activity, ActivityStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub category: Option<String>,
    /// JSON array of tag strings
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub registration_link: Option<String>,
    pub order_index: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Activity {
    fn from(model: Model) -> Self {
        Activity {
            id: model.id,
            title: model.title,
            description: model.description,
            content: model.content,
            image_url: model.image_url,
            status: ActivityStatus::from(model.status.as_str()),
            category: model.category,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            registration_link: model.registration_link,
            order_index: model.order_index,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_by: model.updated_by,
            updated_at: model.updated_at,
        }
    }
}
