//! asset specs repo
use crate::repo::model::asset_specs;
use crate::repo::sea::SeaRepo;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter};

pub struct SpecsRepo;

fn eq_or_null<V>(column: asset_specs::Column, value: Option<V>) -> Condition
where
    V: Into<sea_orm::Value>,
{
    match value {
        Some(v) => Condition::all().add(column.eq(v)),
        None => Condition::all().add(Expr::col(column).is_null()),
    }
}

impl SpecsRepo {
    pub async fn get_specs_by_id(db: &DbConn, id: i32) -> Result<asset_specs::Model, DbErr> {
        SeaRepo::get_by_id::<asset_specs::Entity, _>(db, id).await
    }

    pub async fn find_specs_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<asset_specs::Model>)> {
        SeaRepo::page_with_default::<asset_specs::Entity>(db, pg, None).await
    }

    /// Another specs row with exactly the same values, NULLs compared equal.
    pub async fn find_similar(
        db: &DbConn,
        specs: &asset_specs::Model,
    ) -> Result<Option<asset_specs::Model>, DbErr> {
        use asset_specs::Column;
        asset_specs::Entity::find()
            .filter(eq_or_null(Column::YearOfManufacture, specs.year_of_manufacture))
            .filter(eq_or_null(Column::ProcessorSpeed, specs.processor_speed))
            .filter(eq_or_null(Column::ScreenSize, specs.screen_size))
            .filter(eq_or_null(Column::ProcessorType, specs.processor_type.clone()))
            .filter(eq_or_null(Column::Storage, specs.storage))
            .filter(eq_or_null(Column::Memory, specs.memory))
            .filter(Column::Id.ne(specs.id))
            .one(db)
            .await
    }
}
