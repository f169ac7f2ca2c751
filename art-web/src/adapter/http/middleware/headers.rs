//! bookkeeping response headers: `x-request-id` and `x-server-time`

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_SERVER_TIME: &str = "x-server-time";

/// Echoes the caller's `x-request-id`, minting one when absent.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = match req.headers().get(X_REQUEST_ID) {
        Some(v) => v.clone(),
        None => match HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            Ok(v) => {
                req.headers_mut().insert(X_REQUEST_ID, v.clone());
                v
            }
            Err(e) => {
                warn!("request id header error: {e}");
                return next.run(req).await;
            }
        },
    };
    let mut res = next.run(req).await;
    res.headers_mut().insert(X_REQUEST_ID, id);
    res
}

/// Time spent inside the service, in microseconds.
pub async fn server_time(req: Request<Body>, next: Next) -> Response {
    let start = tokio::time::Instant::now();
    let mut res = next.run(req).await;
    let elapsed = format!("{}us", start.elapsed().as_micros());
    match HeaderValue::from_str(&elapsed) {
        Ok(v) => {
            res.headers_mut().insert(X_SERVER_TIME, v);
        }
        Err(e) => warn!("server time header error: {e}"),
    }
    res
}
