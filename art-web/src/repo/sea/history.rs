//! per-asset history: status, allocations, logs, conditions

use crate::repo::model::{allocation_history, asset_condition, asset_log, asset_status};
use crate::repo::sea::SeaRepo;
use sea_orm::sea_query::ConditionExpression;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};

fn for_asset<C: ColumnTrait>(column: C, asset_id: Option<i32>) -> Option<Vec<ConditionExpression>> {
    asset_id.map(|id| {
        vec![ConditionExpression::Condition(
            Condition::all().add(column.eq(id)),
        )]
    })
}

pub struct StatusRepo;

impl StatusRepo {
    pub async fn get_status_by_id(db: &DbConn, id: i32) -> Result<asset_status::Model, DbErr> {
        SeaRepo::get_by_id::<asset_status::Entity, _>(db, id).await
    }

    pub async fn find_status_by(
        db: &DbConn,
        pg: (u64, u64),
        asset_id: Option<i32>,
    ) -> anyhow::Result<(u64, Vec<asset_status::Model>)> {
        SeaRepo::page_with_default::<asset_status::Entity>(
            db,
            pg,
            for_asset(asset_status::Column::AssetId, asset_id),
        )
        .await
    }
}

pub struct AllocationRepo;

impl AllocationRepo {
    pub async fn find_allocation_by(
        db: &DbConn,
        pg: (u64, u64),
        asset_id: Option<i32>,
    ) -> anyhow::Result<(u64, Vec<allocation_history::Model>)> {
        SeaRepo::page_with_default::<allocation_history::Entity>(
            db,
            pg,
            for_asset(allocation_history::Column::AssetId, asset_id),
        )
        .await
    }

    /// Whole allocation history of an asset, newest first.
    pub async fn history_of<C: ConnectionTrait>(
        db: &C,
        asset_id: i32,
    ) -> Result<Vec<allocation_history::Model>, DbErr> {
        allocation_history::Entity::find()
            .filter(allocation_history::Column::AssetId.eq(asset_id))
            .order_by_desc(allocation_history::Column::Id)
            .all(db)
            .await
    }
}

pub struct LogRepo;

impl LogRepo {
    pub async fn find_log_by(
        db: &DbConn,
        pg: (u64, u64),
        asset_id: Option<i32>,
    ) -> anyhow::Result<(u64, Vec<asset_log::Model>)> {
        SeaRepo::page_with_default::<asset_log::Entity>(
            db,
            pg,
            for_asset(asset_log::Column::AssetId, asset_id),
        )
        .await
    }
}

pub struct ConditionRepo;

impl ConditionRepo {
    pub async fn get_condition_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<asset_condition::Model, DbErr> {
        SeaRepo::get_by_id::<asset_condition::Entity, _>(db, id).await
    }

    pub async fn find_condition_by(
        db: &DbConn,
        pg: (u64, u64),
        asset_id: Option<i32>,
    ) -> anyhow::Result<(u64, Vec<asset_condition::Model>)> {
        SeaRepo::page_with_default::<asset_condition::Entity>(
            db,
            pg,
            for_asset(asset_condition::Column::AssetId, asset_id),
        )
        .await
    }
}
