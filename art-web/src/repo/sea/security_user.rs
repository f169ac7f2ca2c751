//! security user repo
use crate::repo::model::security_user;
use crate::repo::sea::SeaRepo;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, QueryOrder, QuerySelect};

pub struct SecurityUserRepo;

impl SecurityUserRepo {
    /// Stores a new desk account, hashing `model.password` first.
    pub async fn insert_security_user_one(
        db: &DbConn,
        model: security_user::Model,
    ) -> anyhow::Result<security_user::Model> {
        let password = art_crypto::hash_password(&model.password)?;
        let saved = security_user::ActiveModel {
            email: Set(model.email),
            first_name: Set(model.first_name),
            last_name: Set(model.last_name),
            phone_number: Set(model.phone_number),
            badge_number: Set(model.badge_number),
            password: Set(password),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(saved)
    }

    pub async fn get_security_user_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<security_user::Model, DbErr> {
        SeaRepo::get_by_id::<security_user::Entity, _>(db, id).await
    }

    pub async fn find_security_user_by(
        db: &DbConn,
        pg: (u64, u64),
    ) -> anyhow::Result<(u64, Vec<security_user::Model>)> {
        SeaRepo::page_with_default::<security_user::Entity>(db, pg, None).await
    }

    pub async fn list_emails(db: &DbConn) -> Result<Vec<String>, DbErr> {
        security_user::Entity::find()
            .select_only()
            .column(security_user::Column::Email)
            .order_by_asc(security_user::Column::Email)
            .into_tuple()
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn password_is_hashed() {
        let state = test_support::state().await;
        let saved = SecurityUserRepo::insert_security_user_one(
            &state.conn,
            security_user::Model {
                email: "Guard@Site.com".to_string(),
                first_name: "Desk".to_string(),
                last_name: "Guard".to_string(),
                phone_number: "254700000000".to_string(),
                badge_number: "B-001".to_string(),
                password: "s3cret".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_ne!(saved.password, "s3cret");
        assert!(art_crypto::verify_password(&saved.password, "s3cret").unwrap());
        let json = serde_json::to_value(&saved).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(
            SecurityUserRepo::list_emails(&state.conn).await.unwrap(),
            vec!["guard@site.com".to_string()]
        );
    }
}
