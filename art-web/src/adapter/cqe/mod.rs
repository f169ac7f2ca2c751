//! request commands, queries and the `{code, msg, data}` response envelope

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

pub mod cmd;
pub mod query;
pub mod vo;

const MSG_SUCCESS: &str = "success";
const MSG_CREATED: &str = "created";

/// Renders `body` with `code` as the HTTP status as well.
fn reply<B: Serialize>(code: u16, body: B) -> axum::response::Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::OK);
    (status, axum::Json(body)).into_response()
}

/// Envelope without data, for deletes.
#[derive(Clone, Serialize)]
pub struct ResponseSuccess {
    code: u16,
    msg: &'static str,
}

impl Default for ResponseSuccess {
    fn default() -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: MSG_SUCCESS,
        }
    }
}

impl IntoResponse for ResponseSuccess {
    fn into_response(self) -> axum::response::Response {
        reply(self.code, self)
    }
}

#[derive(Clone, Serialize)]
pub struct Response<T: Serialize> {
    pub code: u16,
    pub msg: &'static str,
    pub data: Option<T>,
}

impl<T: Serialize> Response<T> {
    pub fn success(t: T) -> Response<T> {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: MSG_SUCCESS,
            data: Some(t),
        }
    }

    pub fn created(t: T) -> Response<T> {
        Self {
            code: StatusCode::CREATED.as_u16(),
            msg: MSG_CREATED,
            data: Some(t),
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        reply(self.code, self)
    }
}

/// One page of a list endpoint.
#[derive(Clone, Serialize)]
pub struct ResList<T: Serialize> {
    list: Vec<T>,
    total: u64,
}

impl<T: Serialize> ResList<T> {
    pub fn new(total: u64, list: Vec<T>) -> ResList<T> {
        Self { total, list }
    }
}

impl<T: Serialize> IntoResponse for ResList<T> {
    fn into_response(self) -> axum::response::Response {
        Response::success(self).into_response()
    }
}
