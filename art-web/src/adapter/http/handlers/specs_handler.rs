use crate::adapter::cmd::specs::AssetSpecsCmd;
use crate::adapter::vo::asset::AssetSpecsVO;
use crate::adapter::{ResList, Response};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::asset_specs;
use crate::repo::sea::SpecsRepo;
use axum::extract::{Path, State};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbConn, IntoActiveModel};

use super::copy_all;

const SIMILAR_SPECS: &str = "Similar asset specification already exist";

fn apply(mut specs: asset_specs::Model, cmd: AssetSpecsCmd) -> asset_specs::Model {
    specs.year_of_manufacture = cmd.year_of_manufacture.or(specs.year_of_manufacture);
    specs.processor_speed = cmd.processor_speed.or(specs.processor_speed);
    specs.screen_size = cmd.screen_size.or(specs.screen_size);
    specs.processor_type = cmd.processor_type.or(specs.processor_type);
    specs.storage = cmd.storage.or(specs.storage);
    specs.memory = cmd.memory.or(specs.memory);
    specs
}

fn assign(active: &mut asset_specs::ActiveModel, specs: asset_specs::Model) {
    active.year_of_manufacture = Set(specs.year_of_manufacture);
    active.processor_speed = Set(specs.processor_speed);
    active.screen_size = Set(specs.screen_size);
    active.processor_type = Set(specs.processor_type);
    active.storage = Set(specs.storage);
    active.memory = Set(specs.memory);
}

async fn ensure_distinct(db: &DbConn, specs: &asset_specs::Model) -> Result<(), AppError> {
    if SpecsRepo::find_similar(db, specs).await?.is_some() {
        return Err(AppError::non_field(SIMILAR_SPECS));
    }
    Ok(())
}

pub async fn list_specs(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<AssetSpecsVO>, AppError> {
    let (total, list) = SpecsRepo::find_specs_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_specs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<AssetSpecsVO>, AppError> {
    let found = SpecsRepo::get_specs_by_id(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn save_specs(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetSpecsCmd>,
) -> Result<Response<AssetSpecsVO>, AppError> {
    let db = &state.conn;
    let specs = apply(asset_specs::Model::default(), param);
    ensure_distinct(db, &specs).await?;
    let mut active = <asset_specs::ActiveModel as ActiveModelTrait>::default();
    assign(&mut active, specs);
    let saved = active.insert(db).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

/// Only the fields present in the body change.
pub async fn update_specs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(param): AppJson<AssetSpecsCmd>,
) -> Result<Response<AssetSpecsVO>, AppError> {
    let db = &state.conn;
    let current = SpecsRepo::get_specs_by_id(db, id).await?;
    let specs = apply(current.clone(), param);
    ensure_distinct(db, &specs).await?;
    let mut active = current.into_active_model();
    assign(&mut active, specs);
    let saved = active.update(db).await?;
    Ok(Response::success(art_common::copy(&saved)?))
}
