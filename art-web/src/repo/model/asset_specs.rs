use chrono::{Datelike, Local};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

pub const SCREEN_SIZES: [i32; 3] = [13, 15, 17];
pub const PROCESSOR_SPEEDS: [f64; 4] = [1.8, 2.3, 3.0, 3.4];
pub const PROCESSOR_TYPES: [&str; 3] = ["Intel core i3", "Intel core i5", "Intel core i7"];
pub const STORAGE_SIZES: [i32; 3] = [128, 256, 512];
pub const MEMORY_SIZES: [i32; 4] = [4, 8, 16, 32];
pub const FIRST_MANUFACTURE_YEAR: i32 = 2013;

#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_specs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year_of_manufacture: Option<i32>,
    pub processor_speed: Option<f64>,
    pub screen_size: Option<i32>,
    pub processor_type: Option<String>,
    pub storage: Option<i32>,
    pub memory: Option<i32>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

pub fn valid_year(year: i32) -> bool {
    (FIRST_MANUFACTURE_YEAR..=Local::now().year()).contains(&year)
}

pub fn valid_speed(speed: f64) -> bool {
    PROCESSOR_SPEEDS.iter().any(|s| (s - speed).abs() < 1e-9)
}

impl Model {
    /// First field holding a value outside its allowed choices.
    pub fn invalid_field(&self) -> Option<&'static str> {
        if self.year_of_manufacture.is_some_and(|y| !valid_year(y)) {
            return Some("year_of_manufacture");
        }
        if self.processor_speed.is_some_and(|s| !valid_speed(s)) {
            return Some("processor_speed");
        }
        if self.screen_size.is_some_and(|s| !SCREEN_SIZES.contains(&s)) {
            return Some("screen_size");
        }
        if self
            .processor_type
            .as_deref()
            .is_some_and(|t| !PROCESSOR_TYPES.contains(&t))
        {
            return Some("processor_type");
        }
        if self.storage.is_some_and(|s| !STORAGE_SIZES.contains(&s)) {
            return Some("storage");
        }
        if self.memory.is_some_and(|m| !MEMORY_SIZES.contains(&m)) {
            return Some("memory");
        }
        None
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let candidate = Model {
            year_of_manufacture: super::value_of(&self.year_of_manufacture).flatten(),
            processor_speed: super::value_of(&self.processor_speed).flatten(),
            screen_size: super::value_of(&self.screen_size).flatten(),
            processor_type: super::value_of(&self.processor_type).flatten(),
            storage: super::value_of(&self.storage).flatten(),
            memory: super::value_of(&self.memory).flatten(),
            ..Default::default()
        };
        if let Some(field) = candidate.invalid_field() {
            return Err(DbErr::Custom(format!("{field} is not a valid choice")));
        }
        let now = super::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
