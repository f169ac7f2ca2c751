use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::common::AssetStatusEnum;

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub asset_code: Option<String>,
    #[sea_orm(unique)]
    pub serial_number: Option<String>,
    pub model_number_id: i32,
    pub assigned_to: Option<i32>,
    pub purchase_date: Option<chrono::NaiveDate>,
    /// latest AssetStatus.current_status
    pub current_status: String,
    pub verified: bool,
    pub notes: Option<String>,
    pub specs_id: Option<i32>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset_model_number::Entity",
        from = "Column::ModelNumberId",
        to = "super::asset_model_number::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    AssetModelNumber,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedTo",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::asset_specs::Entity",
        from = "Column::SpecsId",
        to = "super::asset_specs::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    AssetSpecs,
}

impl Related<super::asset_model_number::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetModelNumber.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // blank identifiers are stored as NULL so the unique indexes ignore them
        let asset_code = super::value_of(&self.asset_code)
            .flatten()
            .and_then(|c| art_common::non_blank(Some(&c)));
        let serial_number = super::value_of(&self.serial_number)
            .flatten()
            .and_then(|s| art_common::non_blank(Some(&s)));
        if asset_code.is_none() && serial_number.is_none() {
            return Err(DbErr::Custom(
                "asset must have either asset code or serial number".to_string(),
            ));
        }
        self.asset_code = Set(asset_code);
        self.serial_number = Set(serial_number);

        let now = super::now();
        if insert {
            if super::value_of(&self.current_status).map_or(true, |s| s.is_empty()) {
                self.current_status = Set(AssetStatusEnum::Available.to_string());
            }
            if super::value_of(&self.verified).is_none() {
                self.verified = Set(true);
            }
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

impl Model {
    /// `"<asset_code> - <serial_number>"`, how related records refer to an asset.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.asset_code.as_deref().unwrap_or_default(),
            self.serial_number.as_deref().unwrap_or_default()
        )
    }

    pub fn status(&self) -> Option<AssetStatusEnum> {
        self.current_status.parse().ok()
    }

    /// `"<asset_code>, <serial_number>, <model_number>"`
    pub fn display(&self, model_number: &super::asset_model_number::Model) -> String {
        format!(
            "{}, {}, {}",
            self.asset_code.as_deref().unwrap_or_default(),
            self.serial_number.as_deref().unwrap_or_default(),
            model_number
        )
    }
}
