//! Timeline database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::TimelineItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "timeline")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub date: Date,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub tags: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TimelineItem {
    fn from(model: Model) -> Self {
        TimelineItem {
            id: model.id,
            title: model.title,
            date: model.date,
            description: model.description,
            tags: model.tags,
            created_at: model.created_at,
        }
    }
}
