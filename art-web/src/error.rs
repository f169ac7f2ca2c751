//! error

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::{DbErr, SqlErr};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Protected(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(Method),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Convert(#[from] art_common::ConvertError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided.")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("User inactive or deleted.")]
    Inactive,
}

impl AppError {
    pub fn field(field: &str, msg: impl Into<String>) -> AppError {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![msg.into()]);
        AppError::Validation(errors)
    }

    pub fn non_field(msg: impl Into<String>) -> AppError {
        AppError::field("non_field_errors", msg)
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Protected(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_)
            | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Db(e) => match e {
                DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                DbErr::Custom(_) => StatusCode::BAD_REQUEST,
                _ => match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_))
                    | Some(SqlErr::ForeignKeyConstraintViolation(_)) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                },
            },
            AppError::Config(_) | AppError::Convert(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Db(DbErr::RecordNotFound(msg)) => msg.clone(),
            AppError::Db(DbErr::Custom(msg)) => msg.clone(),
            AppError::Db(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    "a record with these values already exists".to_string()
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    "the record is referenced by other records".to_string()
                }
                _ => "internal server error".to_string(),
            },
            AppError::JsonRejection(r) => r.body_text(),
            AppError::QueryRejection(r) => r.body_text(),
            AppError::Config(_) | AppError::Convert(_) | AppError::Other(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }
        let msg = self.message();
        let data = match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        };
        (
            status,
            Json(ErrorBody {
                code: status.as_u16(),
                msg,
                data,
            }),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("invalid value ({})", e.code),
                })
                .collect();
            out.insert(field.to_string(), messages);
        }
        AppError::Validation(out)
    }
}

/// Json body that has been deserialized and validated.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(AppJson(value))
    }
}

/// Query string that has been deserialized and validated.
pub struct AppQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(AppQuery(value))
    }
}

pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct StatusCmd {
        #[validate(required(message = "This field is required."))]
        asset: Option<i32>,
        #[validate(length(min = 1, message = "notes is empty"))]
        notes: String,
    }

    #[test]
    fn validation_errors_become_field_map() {
        let err: AppError = StatusCmd {
            asset: None,
            notes: String::new(),
        }
        .validate()
        .unwrap_err()
        .into();
        let AppError::Validation(map) = err else {
            panic!("expected validation error");
        };
        assert_eq!(map["asset"], vec!["This field is required.".to_string()]);
        assert_eq!(map["notes"], vec!["notes is empty".to_string()]);
    }

    #[test]
    fn statuses() {
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Auth(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Db(DbErr::Custom("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(DbErr::RecordNotFound("gone".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed(Method::PUT).to_string(),
            "Method \"PUT\" not allowed."
        );
    }
}
