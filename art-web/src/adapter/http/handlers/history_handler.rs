use crate::adapter::cmd::history::{AllocationCmd, AssetConditionCmd, AssetLogCmd, AssetStatusCmd};
use crate::adapter::query::AssetHistoryQuery;
use crate::adapter::vo::history::{AllocationVO, AssetConditionVO, AssetLogVO, AssetStatusVO};
use crate::adapter::{ResList, Response};
use crate::common::{parse_choice, AssetStatusEnum, LogTypeEnum, PageQuery};
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::{
    allocation_history, asset, asset_condition, asset_log, asset_status, security_user, user,
};
use crate::repo::sea::{AllocationRepo, ConditionRepo, LogRepo, StatusRepo};
use crate::service::lifecycle;
use axum::extract::{Path, State};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait};

use super::{asset_label, referenced, user_email};

async fn status_vo(db: &DbConn, s: asset_status::Model) -> Result<AssetStatusVO, AppError> {
    Ok(AssetStatusVO {
        id: s.id,
        asset: asset_label(db, s.asset_id).await?,
        current_status: s.current_status,
        previous_status: s.previous_status,
        created_at: s.created_at,
    })
}

async fn condition_vo(db: &DbConn, c: asset_condition::Model) -> Result<AssetConditionVO, AppError> {
    Ok(AssetConditionVO {
        id: c.id,
        asset: asset_label(db, c.asset_id).await?,
        notes: c.notes,
        created_at: c.created_at,
    })
}

async fn allocation_vo(
    db: &DbConn,
    a: allocation_history::Model,
) -> Result<AllocationVO, AppError> {
    Ok(AllocationVO {
        id: a.id,
        asset: asset_label(db, a.asset_id).await?,
        current_owner: user_email(db, a.current_owner).await?,
        previous_owner: user_email(db, a.previous_owner).await?,
        created_at: a.created_at,
    })
}

async fn log_vo(db: &DbConn, l: asset_log::Model) -> Result<AssetLogVO, AppError> {
    let checked_by = security_user::Entity::find_by_id(l.checked_by)
        .one(db)
        .await?
        .map(|u| u.email)
        .unwrap_or_default();
    Ok(AssetLogVO {
        id: l.id,
        asset: asset_label(db, l.asset_id).await?,
        checked_by,
        log_type: l.log_type,
        created_at: l.created_at,
    })
}

pub async fn list_status(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetHistoryQuery>,
) -> Result<ResList<AssetStatusVO>, AppError> {
    let (total, list) = StatusRepo::find_status_by(&state.conn, page.init(), query.asset).await?;
    let mut out = Vec::with_capacity(list.len());
    for s in list {
        out.push(status_vo(&state.conn, s).await?);
    }
    Ok(ResList::new(total, out))
}

pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<AssetStatusVO>, AppError> {
    let found = StatusRepo::get_status_by_id(&state.conn, id).await?;
    Ok(Response::success(status_vo(&state.conn, found).await?))
}

/// Appends a status; the asset leaves its owner unless the status is `Allocated`.
pub async fn save_status(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetStatusCmd>,
) -> Result<Response<AssetStatusVO>, AppError> {
    let db = &state.conn;
    let asset_id = param.asset.unwrap_or_default();
    referenced::<asset::Entity, _>(db, "asset", asset_id).await?;
    let status = parse_choice::<AssetStatusEnum>(param.current_status.as_deref().unwrap_or_default())
        .map_err(|msg| AppError::field("current_status", msg))?;
    let saved = lifecycle::change_status(db, asset_id, status).await?;
    Ok(Response::created(status_vo(db, saved).await?))
}

pub async fn list_condition(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetHistoryQuery>,
) -> Result<ResList<AssetConditionVO>, AppError> {
    let (total, list) =
        ConditionRepo::find_condition_by(&state.conn, page.init(), query.asset).await?;
    let mut out = Vec::with_capacity(list.len());
    for c in list {
        out.push(condition_vo(&state.conn, c).await?);
    }
    Ok(ResList::new(total, out))
}

pub async fn get_condition(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<AssetConditionVO>, AppError> {
    let found = ConditionRepo::get_condition_by_id(&state.conn, id).await?;
    Ok(Response::success(condition_vo(&state.conn, found).await?))
}

pub async fn save_condition(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetConditionCmd>,
) -> Result<Response<AssetConditionVO>, AppError> {
    let db = &state.conn;
    let asset_id = param.asset.unwrap_or_default();
    referenced::<asset::Entity, _>(db, "asset", asset_id).await?;
    let saved = asset_condition::ActiveModel {
        asset_id: Set(asset_id),
        notes: Set(param.notes.unwrap_or_default().trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(Response::created(condition_vo(db, saved).await?))
}

pub async fn list_allocations(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetHistoryQuery>,
) -> Result<ResList<AllocationVO>, AppError> {
    let (total, list) =
        AllocationRepo::find_allocation_by(&state.conn, page.init(), query.asset).await?;
    let mut out = Vec::with_capacity(list.len());
    for a in list {
        out.push(allocation_vo(&state.conn, a).await?);
    }
    Ok(ResList::new(total, out))
}

/// `current_owner: null` takes the asset back.
pub async fn save_allocation(
    State(state): State<AppState>,
    AppJson(param): AppJson<AllocationCmd>,
) -> Result<Response<AllocationVO>, AppError> {
    let db = &state.conn;
    let asset_id = param.asset.unwrap_or_default();
    referenced::<asset::Entity, _>(db, "asset", asset_id).await?;
    if let Some(owner) = param.current_owner {
        referenced::<user::Entity, _>(db, "current_owner", owner).await?;
    }
    let saved = lifecycle::allocate(db, asset_id, param.current_owner).await?;
    Ok(Response::created(allocation_vo(db, saved).await?))
}

pub async fn list_logs(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetHistoryQuery>,
) -> Result<ResList<AssetLogVO>, AppError> {
    let (total, list) = LogRepo::find_log_by(&state.conn, page.init(), query.asset).await?;
    let mut out = Vec::with_capacity(list.len());
    for l in list {
        out.push(log_vo(&state.conn, l).await?);
    }
    Ok(ResList::new(total, out))
}

pub async fn save_log(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetLogCmd>,
) -> Result<Response<AssetLogVO>, AppError> {
    let db = &state.conn;
    let asset_id = param.asset.unwrap_or_default();
    let checked_by = param.checked_by.unwrap_or_default();
    referenced::<asset::Entity, _>(db, "asset", asset_id).await?;
    referenced::<security_user::Entity, _>(db, "checked_by", checked_by).await?;
    let log_type = parse_choice::<LogTypeEnum>(param.log_type.as_deref().unwrap_or_default())
        .map_err(|msg| AppError::field("log_type", msg))?;
    let saved = lifecycle::record_log(db, asset_id, checked_by, log_type).await?;
    Ok(Response::created(log_vo(db, saved).await?))
}
