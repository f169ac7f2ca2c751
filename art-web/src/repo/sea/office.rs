//! office locations: block → floor → section

use crate::repo::model::{office_block, office_floor, office_floor_section};
use crate::repo::sea::SeaRepo;
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

pub struct OfficeRepo;

impl OfficeRepo {
    pub async fn find_block_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<office_block::Model>)> {
        SeaRepo::page_with_default::<office_block::Entity>(db, pg, None).await
    }

    pub async fn find_floor_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<office_floor::Model>)> {
        SeaRepo::page_with_default::<office_floor::Entity>(db, pg, None).await
    }

    pub async fn find_section_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<office_floor_section::Model>)> {
        SeaRepo::page_with_default::<office_floor_section::Entity>(db, pg, None).await
    }

    pub async fn find_block_by_name(
        db: &DbConn,
        name: &str,
    ) -> Result<Option<office_block::Model>, DbErr> {
        office_block::Entity::find()
            .filter(office_block::Column::Name.eq(art_common::normalize_name(name)))
            .one(db)
            .await
    }

    pub async fn floor_exists(db: &DbConn, block_id: i32, number: i32) -> Result<bool, DbErr> {
        let n = office_floor::Entity::find()
            .filter(office_floor::Column::BlockId.eq(block_id))
            .filter(office_floor::Column::Number.eq(number))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn section_exists(db: &DbConn, floor_id: i32, name: &str) -> Result<bool, DbErr> {
        let n = office_floor_section::Entity::find()
            .filter(office_floor_section::Column::FloorId.eq(floor_id))
            .filter(office_floor_section::Column::Name.eq(art_common::normalize_name(name)))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn block_in_use(db: &DbConn, id: i32) -> Result<bool, DbErr> {
        let n = office_floor::Entity::find()
            .filter(office_floor::Column::BlockId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn floor_in_use(db: &DbConn, id: i32) -> Result<bool, DbErr> {
        let n = office_floor_section::Entity::find()
            .filter(office_floor_section::Column::FloorId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }
}
