use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Ownership change of an asset. `current_owner` is NULL when the asset was
/// taken back.
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "allocation_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    pub current_owner: Option<i32>,
    pub previous_owner: Option<i32>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::AssetId",
        to = "super::asset::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Asset,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CurrentOwner",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    CurrentOwner,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PreviousOwner",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    PreviousOwner,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = super::now();
        if insert {
            // the owner being replaced is whoever holds the asset right now
            let asset_id = super::value_of(&self.asset_id)
                .ok_or_else(|| DbErr::Custom("asset is required".to_string()))?;
            let asset = super::asset::Entity::find_by_id(asset_id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("asset {asset_id} not found")))?;
            self.previous_owner = Set(asset.assigned_to);
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
