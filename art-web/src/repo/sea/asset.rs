//! asset repo

use crate::repo::model::{asset, asset_incident_report, user};
use crate::repo::sea::SeaRepo;
use sea_orm::sea_query::{ConditionExpression, Expr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect,
};

pub struct AssetRepo;

impl AssetRepo {
    pub async fn get_asset_by_serial<C: ConnectionTrait>(
        db: &C,
        serial_number: &str,
    ) -> Result<asset::Model, DbErr> {
        asset::Entity::find()
            .filter(asset::Column::SerialNumber.eq(serial_number))
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Not found.".to_string()))
    }

    pub async fn find_by_code_or_serial<C: ConnectionTrait>(
        db: &C,
        asset_code: Option<&str>,
        serial_number: Option<&str>,
    ) -> Result<Option<asset::Model>, DbErr> {
        let mut any = Condition::any();
        if let Some(code) = asset_code {
            any = any.add(asset::Column::AssetCode.eq(code));
        }
        if let Some(serial) = serial_number {
            any = any.add(asset::Column::SerialNumber.eq(serial));
        }
        if any.is_empty() {
            return Ok(None);
        }
        asset::Entity::find().filter(any).one(db).await
    }

    /// Assets page, optionally narrowed to one owner and/or an owner email.
    /// An email that matches nobody yields an empty page.
    pub async fn find_asset_by(
        db: &DbConn,
        pg: (u64, u64),
        owner: Option<i32>,
        owner_email: Option<&str>,
    ) -> anyhow::Result<(u64, Vec<asset::Model>)> {
        let mut search: Vec<ConditionExpression> = Vec::new();
        if let Some(owner) = owner {
            search.push(ConditionExpression::Condition(
                Condition::all().add(asset::Column::AssignedTo.eq(owner)),
            ));
        }
        if let Some(email) = owner_email {
            let owner = user::Entity::find()
                .filter(user::Column::Email.eq(email.trim().to_lowercase()))
                .one(db)
                .await?;
            let Some(owner) = owner else {
                return Ok((0, Vec::new()));
            };
            search.push(ConditionExpression::Condition(
                Condition::all().add(asset::Column::AssignedTo.eq(owner.id)),
            ));
        }
        SeaRepo::page_with_default::<asset::Entity>(db, pg, Some(search)).await
    }

    pub async fn has_incident_reports<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset_incident_report::Entity::find()
            .filter(asset_incident_report::Column::AssetId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    /// (model number id, status, asset count) rows.
    pub async fn count_by_model_and_status(db: &DbConn) -> Result<Vec<(i32, String, i64)>, DbErr> {
        asset::Entity::find()
            .select_only()
            .column(asset::Column::ModelNumberId)
            .column(asset::Column::CurrentStatus)
            .column_as(Expr::col(asset::Column::Id).count(), "count")
            .group_by(asset::Column::ModelNumberId)
            .group_by(asset::Column::CurrentStatus)
            .into_tuple()
            .all(db)
            .await
    }
}
