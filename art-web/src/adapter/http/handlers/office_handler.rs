use crate::adapter::cmd::office::{OfficeBlockCmd, OfficeFloorCmd, OfficeSectionCmd};
use crate::adapter::vo::office::{OfficeBlockVO, OfficeFloorVO, OfficeSectionVO};
use crate::adapter::{ResList, Response, ResponseSuccess};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::{office_block, office_floor, office_floor_section};
use crate::repo::sea::{OfficeRepo, SeaRepo};
use axum::extract::{Path, State};
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::Set;

use super::{copy_all, referenced};

pub async fn list_blocks(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<OfficeBlockVO>, AppError> {
    let (total, list) = OfficeRepo::find_block_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_block(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<OfficeBlockVO>, AppError> {
    let found = SeaRepo::get_by_id::<office_block::Entity, _>(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn save_block(
    State(state): State<AppState>,
    AppJson(param): AppJson<OfficeBlockCmd>,
) -> Result<Response<OfficeBlockVO>, AppError> {
    let db = &state.conn;
    let name = param.name.unwrap_or_default();
    if OfficeRepo::find_block_by_name(db, &name).await?.is_some() {
        return Err(AppError::field(
            "name",
            "office block with this name already exists.",
        ));
    }
    let saved = office_block::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_block(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<office_block::Entity, _>(db, id).await?;
    if OfficeRepo::block_in_use(db, id).await? {
        return Err(AppError::Protected(format!(
            "Cannot delete office block \"{}\" because it still has floors",
            found.name
        )));
    }
    SeaRepo::delete_by_id::<office_block::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_floors(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<OfficeFloorVO>, AppError> {
    let (total, list) = OfficeRepo::find_floor_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<OfficeFloorVO>, AppError> {
    let found = SeaRepo::get_by_id::<office_floor::Entity, _>(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

/// Floor numbers are unique within a block.
pub async fn save_floor(
    State(state): State<AppState>,
    AppJson(param): AppJson<OfficeFloorCmd>,
) -> Result<Response<OfficeFloorVO>, AppError> {
    let db = &state.conn;
    let number = param.number.unwrap_or_default();
    let block_id = param.block_id.unwrap_or_default();
    referenced::<office_block::Entity, _>(db, "block_id", block_id).await?;
    if OfficeRepo::floor_exists(db, block_id, number).await? {
        return Err(AppError::non_field(
            "The fields block_id, number must make a unique set.",
        ));
    }
    let saved = office_floor::ActiveModel {
        number: Set(number),
        block_id: Set(block_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<office_floor::Entity, _>(db, id).await?;
    if OfficeRepo::floor_in_use(db, id).await? {
        return Err(AppError::Protected(format!(
            "Cannot delete floor {} because it still has sections",
            found.number
        )));
    }
    SeaRepo::delete_by_id::<office_floor::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_sections(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<OfficeSectionVO>, AppError> {
    let (total, list) = OfficeRepo::find_section_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<OfficeSectionVO>, AppError> {
    let found = SeaRepo::get_by_id::<office_floor_section::Entity, _>(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn save_section(
    State(state): State<AppState>,
    AppJson(param): AppJson<OfficeSectionCmd>,
) -> Result<Response<OfficeSectionVO>, AppError> {
    let db = &state.conn;
    let name = param.name.unwrap_or_default();
    let floor_id = param.floor_id.unwrap_or_default();
    referenced::<office_floor::Entity, _>(db, "floor_id", floor_id).await?;
    if OfficeRepo::section_exists(db, floor_id, &name).await? {
        return Err(AppError::non_field(
            "The fields floor_id, name must make a unique set.",
        ));
    }
    let saved = office_floor_section::ActiveModel {
        name: Set(name),
        floor_id: Set(floor_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    SeaRepo::delete_by_id::<office_floor_section::Entity, _>(&state.conn, id).await?;
    Ok(ResponseSuccess::default())
}
