//! Profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Profile, ProfileStatus, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Identity id, shared with the identity store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Surrogate key, assigned by the database
    #[sea_orm(unique)]
    pub profile_id: i64,
    pub full_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub status: String,
    pub is_approved: bool,
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub approved_at: Option<DateTimeUtc>,
    pub approved_by: Option<Uuid>,
    pub rejected_at: Option<DateTimeUtc>,
    pub suspended_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Profile {
            id: model.id,
            profile_id: model.profile_id,
            full_name: model.full_name,
            email: model.email,
            role: Role::from(model.role.as_str()),
            status: ProfileStatus::from(model.status.as_str()),
            is_approved: model.is_approved,
            reason: model.reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
            approved_at: model.approved_at,
            approved_by: model.approved_by,
            rejected_at: model.rejected_at,
            suspended_at: model.suspended_at,
        }
    }
}
