use crate::adapter::cmd::security_user::SecurityUserCmd;
use crate::adapter::vo::user::{SecurityUserVO, UserVO};
use crate::adapter::{ResList, Response};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::security_user;
use crate::repo::sea::{SecurityUserRepo, UserRepo};
use axum::extract::{Path, State};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::copy_all;

pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<UserVO>, AppError> {
    let (total, list) = UserRepo::find_user_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<UserVO>, AppError> {
    let found = UserRepo::get_user_by_id(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn list_security_users(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
) -> Result<ResList<SecurityUserVO>, AppError> {
    let (total, list) = SecurityUserRepo::find_security_user_by(&state.conn, page.init()).await?;
    Ok(ResList::new(total, copy_all(&list)?))
}

pub async fn get_security_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response<SecurityUserVO>, AppError> {
    let found = SecurityUserRepo::get_security_user_by_id(&state.conn, id).await?;
    Ok(Response::success(art_common::copy(&found)?))
}

pub async fn save_security_user(
    State(state): State<AppState>,
    AppJson(param): AppJson<SecurityUserCmd>,
) -> Result<Response<SecurityUserVO>, AppError> {
    let db = &state.conn;
    let email = param.email.unwrap_or_default().trim().to_lowercase();
    let taken = security_user::Entity::find()
        .filter(security_user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(AppError::field(
            "email",
            "security user with this email already exists.",
        ));
    }
    let saved = SecurityUserRepo::insert_security_user_one(
        db,
        security_user::Model {
            email,
            first_name: param.first_name.unwrap_or_default(),
            last_name: param.last_name.unwrap_or_default(),
            phone_number: param.phone_number.unwrap_or_default(),
            badge_number: param.badge_number.unwrap_or_default(),
            password: param.password.unwrap_or_default(),
            ..Default::default()
        },
    )
    .await?;
    Ok(Response::created(art_common::copy(&saved)?))
}

/// Emails of every security desk account, for picking `checked_by`.
pub async fn list_security_user_emails(
    State(state): State<AppState>,
) -> Result<Response<Vec<String>>, AppError> {
    let emails = SecurityUserRepo::list_emails(&state.conn).await?;
    Ok(Response::success(emails))
}
