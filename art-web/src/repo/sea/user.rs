//! user repo
use crate::repo::model::user;
use crate::repo::sea::SeaRepo;
use crate::util::jwt::Claims;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, SqlErr};

pub struct UserRepo;

impl UserRepo {
    pub async fn find_user_by_email(db: &DbConn, email: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    pub async fn get_user_by_id(db: &DbConn, id: i32) -> Result<user::Model, DbErr> {
        SeaRepo::get_by_id::<user::Entity, _>(db, id).await
    }

    pub async fn find_user_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<user::Model>)> {
        SeaRepo::page_with_default::<user::Entity>(db, pg, None).await
    }

    /// Looks the token's user up by email, creating the account on first sight.
    pub async fn provision(db: &DbConn, claims: &Claims, is_staff: bool) -> Result<user::Model, DbErr> {
        if let Some(user) = UserRepo::find_user_by_email(db, &claims.email).await? {
            return Ok(user);
        }
        UserRepo::insert_or_fetch(db, claims, is_staff).await
    }

    /// Inserts the user; when a concurrent request won the insert, reads
    /// that row back instead.
    async fn insert_or_fetch(db: &DbConn, claims: &Claims, is_staff: bool) -> Result<user::Model, DbErr> {
        let inserted = user::ActiveModel {
            email: Set(claims.email.clone()),
            name: Set(claims.name.clone()),
            picture: Set(claims.picture.clone()),
            is_staff: Set(is_staff),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await;
        match inserted {
            Ok(user) => {
                tracing::info!("provisioned user {}", user.email);
                Ok(user)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::debug!("user {} provisioned concurrently", claims.email);
                UserRepo::find_user_by_email(db, &claims.email)
                    .await?
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}
