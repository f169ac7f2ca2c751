//! incident reports and user feedback
use crate::repo::model::{asset_incident_report, user_feedback};
use crate::repo::sea::SeaRepo;
use sea_orm::{DbConn, DbErr};

pub struct ReportRepo;

impl ReportRepo {
    pub async fn get_incident_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<asset_incident_report::Model, DbErr> {
        SeaRepo::get_by_id::<asset_incident_report::Entity, _>(db, id).await
    }

    pub async fn find_incident_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<asset_incident_report::Model>)> {
        SeaRepo::page_with_default::<asset_incident_report::Entity>(db, pg, None).await
    }

    pub async fn find_feedback_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<user_feedback::Model>)> {
        SeaRepo::page_with_default::<user_feedback::Entity>(db, pg, None).await
    }
}
