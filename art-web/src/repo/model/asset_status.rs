use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::common::{parse_choice, AssetStatusEnum};

/// One entry of an asset's append-only status history.
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    pub current_status: String,
    pub previous_status: Option<String>,
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
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

/// Latest history entry of an asset.
pub async fn latest_for<C: ConnectionTrait>(db: &C, asset_id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::AssetId.eq(asset_id))
        .order_by_desc(Column::Id)
        .limit(1)
        .one(db)
        .await
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let status = super::value_of(&self.current_status).unwrap_or_default();
        parse_choice::<AssetStatusEnum>(&status).map_err(DbErr::Custom)?;
        let now = super::now();
        if insert {
            let asset_id = super::value_of(&self.asset_id)
                .ok_or_else(|| DbErr::Custom("asset is required".to_string()))?;
            let previous = latest_for(db, asset_id).await?;
            self.previous_status = Set(previous.map(|p| p.current_status));
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
