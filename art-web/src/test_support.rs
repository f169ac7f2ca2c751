//! fixtures shared by the unit and HTTP tests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbConn};
use serde_json::Value;
use tower::ServiceExt;

use crate::adapter::http::app;
use crate::config::{init_shared_app_state, AppConfig, AppState, AuthConfig, Db, SqliteConfig};
use crate::repo::model::{asset_model_number, security_user, user};
use crate::repo::sea::{HierarchyRepo, SecurityUserRepo};
use crate::util::jwt::{Claims, JwtConfig};

pub(crate) const ADMIN_EMAIL: &str = "admin@site.com";

pub(crate) async fn state() -> AppState {
    let config = AppConfig {
        db_config: Db::Sqlite(SqliteConfig {
            path: ":memory:".to_string(),
        }),
        jwt_config: JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "art-identity".to_string(),
            expire_time: 600,
        },
        auth: AuthConfig {
            admin_emails: vec![ADMIN_EMAIL.to_string()],
        },
        ..Default::default()
    };
    init_shared_app_state(&config).await.unwrap()
}

/// Model number `number` under Computers / Laptops / Laptop / "Make of `number`".
pub(crate) async fn seed_model(db: &DbConn, number: &str) -> asset_model_number::Model {
    let category = match HierarchyRepo::find_category_by_name(db, "Computers").await.unwrap() {
        Some(c) => c,
        None => HierarchyRepo::insert_category(db, "Computers").await.unwrap(),
    };
    let sub = match HierarchyRepo::find_sub_category_by_name(db, "Laptops").await.unwrap() {
        Some(s) => s,
        None => HierarchyRepo::insert_sub_category(db, "Laptops", category.id)
            .await
            .unwrap(),
    };
    let ty = match HierarchyRepo::find_type_by_name(db, "Laptop").await.unwrap() {
        Some(t) => t,
        None => HierarchyRepo::insert_type(db, "Laptop", sub.id).await.unwrap(),
    };
    let label = format!("Make of {number}");
    let make = match HierarchyRepo::find_make_by_label(db, &label).await.unwrap() {
        Some(m) => m,
        None => HierarchyRepo::insert_make(db, &label, ty.id).await.unwrap(),
    };
    match HierarchyRepo::find_model_by_number(db, number).await.unwrap() {
        Some(m) => m,
        None => HierarchyRepo::insert_model_number(db, number, make.id)
            .await
            .unwrap(),
    }
}

pub(crate) async fn seed_user(db: &DbConn, email: &str, is_staff: bool) -> user::Model {
    user::ActiveModel {
        email: Set(email.to_string()),
        name: Set(email.split('@').next().unwrap_or_default().to_string()),
        is_staff: Set(is_staff),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub(crate) async fn seed_security_user(db: &DbConn) -> security_user::Model {
    SecurityUserRepo::insert_security_user_one(
        db,
        security_user::Model {
            email: "guard@site.com".to_string(),
            first_name: "Desk".to_string(),
            last_name: "Guard".to_string(),
            phone_number: "254700000001".to_string(),
            badge_number: "B-100".to_string(),
            password: "guard-pass".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

/// A token the identity provider would issue for `email`.
pub(crate) fn token(state: &AppState, email: &str) -> String {
    Claims::new(state.jwt.expire_time, state.jwt.issuer.clone())
        .unwrap()
        .with_email(email.to_string())
        .generate_token(state.jwt.secret.as_bytes())
        .unwrap()
}

/// Sends one request through the whole app; an empty body reads as `null`.
pub(crate) async fn call(
    state: &AppState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
