//! sea-orm repos

mod asset;
mod history;
mod hierarchy;
mod office;
mod report;
mod security_user;
mod specs;
mod user;

pub use asset::*;
pub use history::*;
pub use hierarchy::*;
pub use office::*;
pub use report::*;
pub use security_user::*;
pub use specs::*;
pub use user::*;

use crate::repo::model;
use sea_orm::sea_query::{ConditionExpression, Index};
use sea_orm::{
    Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, Iterable, PaginatorTrait,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QueryOrder, Schema,
};

pub struct SeaRepo;

impl SeaRepo {
    /// One page of `E` ordered by primary key. `pg` is (zero-based page, size).
    pub async fn page_with_default<E>(
        db: &DbConn,
        pg: (u64, u64),
        search: Option<Vec<ConditionExpression>>,
    ) -> anyhow::Result<(u64, Vec<E::Model>)>
    where
        E: EntityTrait,
        E::Model: Send + Sync + 'static,
    {
        let mut select = E::find();
        if let Some(search) = search {
            let condition = search
                .into_iter()
                .fold(Condition::all(), |cond, c| cond.add(c));
            select = select.filter(condition);
        }
        if let Some(pk) = E::PrimaryKey::iter().next() {
            select = select.order_by_asc(pk.into_column());
        }
        let paginator = select.paginate(db, pg.1);
        let total = paginator.num_items().await?;
        let list = paginator.fetch_page(pg.0).await?;
        Ok((total, list))
    }

    pub async fn get_by_id<E, C>(db: &C, id: i32) -> Result<E::Model, DbErr>
    where
        E: EntityTrait,
        C: ConnectionTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        E::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Not found.".to_string()))
    }

    pub async fn delete_by_id<E, C>(db: &C, id: i32) -> Result<(), DbErr>
    where
        E: EntityTrait,
        C: ConnectionTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        let res = E::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Not found.".to_string()));
        }
        Ok(())
    }
}

/// Creates missing tables, parents before children.
pub async fn sync_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    macro_rules! create {
        ($($entity:path),+ $(,)?) => {
            $(
                let mut stmt = schema.create_table_from_entity($entity);
                stmt.if_not_exists();
                db.execute(backend.build(&stmt)).await?;
            )+
        };
    }
    create!(
        model::user::Entity,
        model::security_user::Entity,
        model::asset_category::Entity,
        model::asset_sub_category::Entity,
        model::asset_type::Entity,
        model::asset_make::Entity,
        model::asset_model_number::Entity,
        model::asset_specs::Entity,
        model::asset::Entity,
        model::asset_status::Entity,
        model::allocation_history::Entity,
        model::asset_log::Entity,
        model::asset_condition::Entity,
        model::asset_incident_report::Entity,
        model::user_feedback::Entity,
        model::office_block::Entity,
        model::office_floor::Entity,
        model::office_floor_section::Entity,
    );

    let floor_number = Index::create()
        .if_not_exists()
        .name("idx-office_floor-block-number")
        .table(model::office_floor::Entity)
        .col(model::office_floor::Column::BlockId)
        .col(model::office_floor::Column::Number)
        .unique()
        .to_owned();
    db.execute(backend.build(&floor_number)).await?;
    let section_name = Index::create()
        .if_not_exists()
        .name("idx-office_floor_section-floor-name")
        .table(model::office_floor_section::Entity)
        .col(model::office_floor_section::Column::FloorId)
        .col(model::office_floor_section::Column::Name)
        .unique()
        .to_owned();
    db.execute(backend.build(&section_name)).await?;
    tracing::debug!("schema synced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use sea_orm::ActiveModelTrait;
    use sea_orm::ActiveValue::Set;

    #[tokio::test]
    async fn sync_is_idempotent() {
        let state = test_support::state().await;
        sync_schema(&state.conn).await.unwrap();
    }

    #[tokio::test]
    async fn page_and_delete() {
        let state = test_support::state().await;
        for name in ["Laptops", "Screens", "Chairs"] {
            model::asset_category::ActiveModel {
                category_name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(&state.conn)
            .await
            .unwrap();
        }
        let (total, list) =
            SeaRepo::page_with_default::<model::asset_category::Entity>(&state.conn, (1, 2), None)
                .await
                .unwrap();
        assert_eq!(total, 3);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category_name, "Chairs");

        SeaRepo::delete_by_id::<model::asset_category::Entity, _>(&state.conn, list[0].id)
            .await
            .unwrap();
        assert!(matches!(
            SeaRepo::get_by_id::<model::asset_category::Entity, _>(&state.conn, list[0].id).await,
            Err(DbErr::RecordNotFound(_))
        ));
    }
}
