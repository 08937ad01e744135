//! Contact message database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{ContactMessage, ContactStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub replied_by: Option<Uuid>,
    pub replied_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        ContactMessage {
            id: model.id,
            name: model.name,
            email: model.email,
            message: model.message,
            status: ContactStatus::from(model.status.as_str()),
            notes: model.notes,
            replied_by: model.replied_by,
            replied_at: model.replied_at,
            created_at: model.created_at,
        }
    }
}
