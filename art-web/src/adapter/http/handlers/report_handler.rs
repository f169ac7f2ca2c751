use crate::adapter::cmd::report::{FeedbackCmd, IncidentReportCmd};
use crate::adapter::http::middleware::Context;
use crate::adapter::vo::report::{FeedbackVO, IncidentReportVO};
use crate::adapter::{ResList, Response};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::{asset, asset_incident_report, user_feedback};
use crate::repo::sea::ReportRepo;
use axum::extract::{Path, State};
use axum::Extension;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::Set;

use super::{copy_all, referenced};

/// Filed by the caller against any asset.
pub async fn save_incident(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    AppJson(param): AppJson<IncidentReportCmd>,
) -> Result<Response<IncidentReportVO>, AppError> {
    let db = &state.conn;
    let asset_id = param.asset.unwrap_or_default();
    referenced::<asset::Entity, _>(db, "asset", asset_id).await?;
    let saved = asset_incident_report::ActiveModel {
        asset_id: Set(asset_id),
        incident_type: Set(param.incident_type.unwrap_or_default()),
        incident_location: Set(param.incident_location.unwrap_or_default()),
        incident_description: Set(param.incident_description.unwrap_or_default()),
        injuries_sustained: Set(param.injuries_sustained),
        loss_of_property: Set(param.loss_of_property),
        witnesses: Set(param.witnesses),
        police_responded: Set(param.police_responded),
        submitted_by: Set(ctx.user.id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!("incident report {} filed by {}", saved.id, ctx.user.email);
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn list_incidents(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<IncidentReportVO>, AppError> {
    let (total, list) = ReportRepo::find_incident_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<IncidentReportVO>, AppError> {
    let found = ReportRepo::get_incident_by_id(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn save_feedback(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    AppJson(param): AppJson<FeedbackCmd>,
) -> Result<Response<FeedbackVO>, AppError> {
    let saved = user_feedback::ActiveModel {
        reported_by: Set(ctx.user.id),
        message: Set(param.message.unwrap_or_default()),
        report_type: Set(param.report_type.unwrap_or_default()),
        ..Default::default()
    }
    .insert(&state.conn)
    .await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn list_feedback(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<FeedbackVO>, AppError> {
    let (total, list) = ReportRepo::find_feedback_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}
