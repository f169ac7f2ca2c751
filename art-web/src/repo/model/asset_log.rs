use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::common::{parse_choice, LogTypeEnum};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    pub checked_by: i32,
    pub log_type: String,
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
        belongs_to = "super::security_user::Entity",
        from = "Column::CheckedBy",
        to = "super::security_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SecurityUser,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl Related<super::security_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SecurityUser.def()
    }
}

impl Model {
    pub fn kind(&self) -> Option<LogTypeEnum> {
        self.log_type.parse().ok()
    }
}

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
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let log_type = super::value_of(&self.log_type).unwrap_or_default();
        parse_choice::<LogTypeEnum>(&log_type).map_err(DbErr::Custom)?;
        let now = super::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
