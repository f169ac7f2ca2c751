mod asset_handler;
mod hierarchy_handler;
mod history_handler;
mod office_handler;
mod report_handler;
mod specs_handler;
mod user_handler;

pub use asset_handler::*;
pub use hierarchy_handler::*;
pub use history_handler::*;
pub use office_handler::*;
pub use report_handler::*;
pub use specs_handler::*;
pub use user_handler::*;

use crate::error::AppError;
use crate::repo::model::{asset, user};
use crate::repo::sea::SeaRepo;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn invalid_pk(field: &str, id: i32) -> AppError {
    AppError::field(field, format!("Invalid pk \"{id}\" - object does not exist."))
}

/// Loads the record a request field points at, as a field error when missing.
pub(crate) async fn referenced<E, C>(db: &C, field: &str, id: i32) -> Result<E::Model, AppError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    SeaRepo::get_by_id::<E, C>(db, id)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotFound(_) => invalid_pk(field, id),
            e => e.into(),
        })
}

pub(crate) fn copy_all<S, D>(list: &[S]) -> Result<Vec<D>, AppError>
where
    S: Serialize,
    D: DeserializeOwned + Serialize + Default,
{
    list.iter()
        .map(|d| art_common::copy(d).map_err(AppError::from))
        .collect()
}

pub(crate) async fn asset_label<C: ConnectionTrait>(db: &C, asset_id: i32) -> Result<String, AppError> {
    Ok(SeaRepo::get_by_id::<asset::Entity, C>(db, asset_id)
        .await?
        .label())
}

pub(crate) async fn user_email<C: ConnectionTrait>(
    db: &C,
    user_id: Option<i32>,
) -> Result<Option<String>, AppError> {
    let Some(id) = user_id else {
        return Ok(None);
    };
    Ok(user::Entity::find_by_id(id).one(db).await?.map(|u| u.email))
}
