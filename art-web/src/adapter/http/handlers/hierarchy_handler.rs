//! category → sub-category → type → make → model number endpoints

use crate::adapter::cmd::hierarchy::{CategoryCmd, MakeCmd, ModelNumberCmd, SubCategoryCmd, TypeCmd};
use crate::adapter::vo::hierarchy::{CategoryVO, MakeVO, ModelNumberVO, SubCategoryVO, TypeVO};
use crate::adapter::{ResList, Response, ResponseSuccess};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::{
    asset_category, asset_make, asset_model_number, asset_sub_category, asset_type,
};
use crate::repo::sea::{HierarchyRepo, SeaRepo};
use axum::extract::{Path, State};
use sea_orm::{DbConn, EntityTrait, PrimaryKeyTrait};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{copy_all, referenced};

async fn page_of<E, V>(db: &DbConn, page: PageQuery) -> Result<ResList<V>, AppError>
where
    E: EntityTrait,
    E::Model: Serialize + Send + Sync + 'static,
    V: DeserializeOwned + Serialize + Default,
{
    let (total, list) = SeaRepo::page_with_default::<E>(db, page.init(), None).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

async fn one_of<E, V>(db: &DbConn, id: i32) -> Result<Response<V>, AppError>
where
    E: EntityTrait,
    E::Model: Serialize,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    V: DeserializeOwned + Serialize + Default,
{
    let found = SeaRepo::get_by_id::<E, _>(db, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

fn already_exists(entity: &str, field: &str) -> AppError {
    let label = field.replace('_', " ");
    AppError::field(field, format!("{entity} with this {label} already exists."))
}

fn protected(entity: &str, name: &str) -> AppError {
    AppError::Protected(format!(
        "Cannot delete {entity} \"{name}\" because it is referenced by other records"
    ))
}

pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<CategoryVO>, AppError> {
    page_of::<asset_category::Entity, _>(&state.conn, page).await
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<CategoryVO>, AppError> {
    one_of::<asset_category::Entity, _>(&state.conn, id).await
}

pub async fn save_category(
    State(state): State<AppState>,
    AppJson(param): AppJson<CategoryCmd>,
) -> Result<Response<CategoryVO>, AppError> {
    let db = &state.conn;
    let name = param.category_name.unwrap_or_default();
    if HierarchyRepo::find_category_by_name(db, &name).await?.is_some() {
        return Err(already_exists("asset category", "category_name"));
    }
    let saved = HierarchyRepo::insert_category(db, name.trim()).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<asset_category::Entity, _>(db, id).await?;
    if HierarchyRepo::category_in_use(db, id).await? {
        return Err(protected("asset category", &found.category_name));
    }
    SeaRepo::delete_by_id::<asset_category::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_sub_categories(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<SubCategoryVO>, AppError> {
    page_of::<asset_sub_category::Entity, _>(&state.conn, page).await
}

pub async fn get_sub_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<SubCategoryVO>, AppError> {
    one_of::<asset_sub_category::Entity, _>(&state.conn, id).await
}

pub async fn save_sub_category(
    State(state): State<AppState>,
    AppJson(param): AppJson<SubCategoryCmd>,
) -> Result<Response<SubCategoryVO>, AppError> {
    let db = &state.conn;
    let name = param.sub_category_name.unwrap_or_default();
    let parent = param.asset_category_id.unwrap_or_default();
    referenced::<asset_category::Entity, _>(db, "asset_category_id", parent).await?;
    if HierarchyRepo::find_sub_category_by_name(db, &name).await?.is_some() {
        return Err(already_exists("asset sub category", "sub_category_name"));
    }
    let saved = HierarchyRepo::insert_sub_category(db, name.trim(), parent).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_sub_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<asset_sub_category::Entity, _>(db, id).await?;
    if HierarchyRepo::sub_category_in_use(db, id).await? {
        return Err(protected("asset sub category", &found.sub_category_name));
    }
    SeaRepo::delete_by_id::<asset_sub_category::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_types(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<TypeVO>, AppError> {
    page_of::<asset_type::Entity, _>(&state.conn, page).await
}

pub async fn get_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<TypeVO>, AppError> {
    one_of::<asset_type::Entity, _>(&state.conn, id).await
}

pub async fn save_type(
    State(state): State<AppState>,
    AppJson(param): AppJson<TypeCmd>,
) -> Result<Response<TypeVO>, AppError> {
    let db = &state.conn;
    let name = param.asset_type.unwrap_or_default();
    let parent = param.asset_sub_category_id.unwrap_or_default();
    referenced::<asset_sub_category::Entity, _>(db, "asset_sub_category_id", parent).await?;
    if HierarchyRepo::find_type_by_name(db, &name).await?.is_some() {
        return Err(already_exists("asset type", "asset_type"));
    }
    let saved = HierarchyRepo::insert_type(db, name.trim(), parent).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<asset_type::Entity, _>(db, id).await?;
    if HierarchyRepo::type_in_use(db, id).await? {
        return Err(protected("asset type", &found.asset_type));
    }
    SeaRepo::delete_by_id::<asset_type::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_makes(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<MakeVO>, AppError> {
    page_of::<asset_make::Entity, _>(&state.conn, page).await
}

pub async fn get_make(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<MakeVO>, AppError> {
    one_of::<asset_make::Entity, _>(&state.conn, id).await
}

pub async fn save_make(
    State(state): State<AppState>,
    AppJson(param): AppJson<MakeCmd>,
) -> Result<Response<MakeVO>, AppError> {
    let db = &state.conn;
    let label = param.make_label.unwrap_or_default();
    let parent = param.asset_type_id.unwrap_or_default();
    referenced::<asset_type::Entity, _>(db, "asset_type_id", parent).await?;
    if HierarchyRepo::find_make_by_label(db, &label).await?.is_some() {
        return Err(already_exists("asset make", "make_label"));
    }
    let saved = HierarchyRepo::insert_make(db, label.trim(), parent).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

pub async fn delete_make(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<asset_make::Entity, _>(db, id).await?;
    if HierarchyRepo::make_in_use(db, id).await? {
        return Err(protected("asset make", &found.make_label));
    }
    SeaRepo::delete_by_id::<asset_make::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}

pub async fn list_models(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<ModelNumberVO>, AppError> {
    page_of::<asset_model_number::Entity, _>(&state.conn, page).await
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<ModelNumberVO>, AppError> {
    one_of::<asset_model_number::Entity, _>(&state.conn, id).await
}

pub async fn save_model(
    State(state): State<AppState>,
    AppJson(param): AppJson<ModelNumberCmd>,
) -> Result<Response<ModelNumberVO>, AppError> {
    let db = &state.conn;
    let number = param.model_number.unwrap_or_default();
    let parent = param.make_label_id.unwrap_or_default();
    referenced::<asset_make::Entity, _>(db, "make_label_id", parent).await?;
    if HierarchyRepo::find_model_by_number(db, &number).await?.is_some() {
        return Err(already_exists("asset model number", "model_number"));
    }
    let saved = HierarchyRepo::insert_model_number(db, number.trim(), parent).await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

/// Refused while any asset still uses the model number.
pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseSuccess, AppError> {
    let db = &state.conn;
    let found = SeaRepo::get_by_id::<asset_model_number::Entity, _>(db, id).await?;
    if HierarchyRepo::model_number_in_use(db, id).await? {
        return Err(protected("asset model number", &found.model_number));
    }
    SeaRepo::delete_by_id::<asset_model_number::Entity, _>(db, id).await?;
    Ok(ResponseSuccess::default())
}
