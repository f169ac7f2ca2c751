use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "office_floor_section")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub floor_id: i32,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::office_floor::Entity",
        from = "Column::FloorId",
        to = "super::office_floor::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    OfficeFloor,
}

impl Related<super::office_floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OfficeFloor.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(name) = super::value_of(&self.name) {
            let name = art_common::normalize_name(&name);
            if name.is_empty() {
                return Err(DbErr::Custom("section name is required".to_string()));
            }
            self.name = Set(name);
        }
        let now = super::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
