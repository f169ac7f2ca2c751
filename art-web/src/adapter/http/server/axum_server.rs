//! axum server

use axum::extract::Request;
use axum::ServiceExt;

use crate::config::{AppConfig, AppState};
use crate::{adapter::http::app, error::AppError};

pub async fn start_http_server(config: &AppConfig, state: AppState) -> Result<(), AppError> {
    let url = config.server.url();
    tracing::info!("start server: {}", url);
    let listener = tokio::net::TcpListener::bind(&url)
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("bind {url}: {e}")))?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state)))
        .await
        .map_err(|e| AppError::Other(e.into()))?;
    tracing::info!("end server");
    Ok(())
}
