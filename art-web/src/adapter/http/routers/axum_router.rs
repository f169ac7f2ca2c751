use axum::handler::Handler;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::adapter::http::handlers::*;
use crate::adapter::http::middleware::{admin_only, jwt_auth_middle, request_id, server_time};
use crate::config::AppState;
use crate::error::method_not_allowed;

/// Staff-only endpoints; the whole path is gated, whatever the method.
fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).fallback(method_not_allowed))
        .route("/users/:id", get(get_user).fallback(method_not_allowed))
        .route(
            "/security-users",
            get(list_security_users)
                .post(save_security_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/security-users/:id",
            get(get_security_user).fallback(method_not_allowed),
        )
        .route(
            "/manage-assets",
            get(list_assets).post(save_asset).fallback(method_not_allowed),
        )
        .route(
            "/manage-assets/:serial_number",
            get(get_asset)
                .put(update_asset)
                .delete(delete_asset)
                .fallback(method_not_allowed),
        )
        .route(
            "/allocations",
            get(list_allocations)
                .post(save_allocation)
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-logs",
            get(list_logs).post(save_log).fallback(method_not_allowed),
        )
        .route(
            "/asset-specs",
            get(list_specs).post(save_specs).fallback(method_not_allowed),
        )
        .route(
            "/asset-specs/:id",
            get(get_specs).put(update_specs).fallback(method_not_allowed),
        )
        .route("/asset-health", get(asset_health).fallback(method_not_allowed))
        .layer(from_fn(admin_only))
}

/// Any signed-in user; writes on shared lookups still need staff.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/security-user-emails",
            get(list_security_user_emails).fallback(method_not_allowed),
        )
        .route("/assets", get(list_own_assets).fallback(method_not_allowed))
        .route(
            "/assets/:serial_number",
            get(get_own_asset).fallback(method_not_allowed),
        )
        .route("/items", get(list_own_assets).fallback(method_not_allowed))
        .route(
            "/items/:serial_number",
            get(get_own_asset).fallback(method_not_allowed),
        )
        .route(
            "/asset-status",
            get(list_status).post(save_status).fallback(method_not_allowed),
        )
        .route("/asset-status/:id", get(get_status).fallback(method_not_allowed))
        .route(
            "/asset-condition",
            get(list_condition)
                .post(save_condition)
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-condition/:id",
            get(get_condition).fallback(method_not_allowed),
        )
        .route(
            "/asset-categories",
            get(list_categories)
                .post(save_category.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-categories/:id",
            get(get_category)
                .delete(delete_category.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-sub-categories",
            get(list_sub_categories)
                .post(save_sub_category.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-sub-categories/:id",
            get(get_sub_category)
                .delete(delete_sub_category.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-types",
            get(list_types)
                .post(save_type.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-types/:id",
            get(get_type)
                .delete(delete_type.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-makes",
            get(list_makes)
                .post(save_make.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-makes/:id",
            get(get_make)
                .delete(delete_make.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-models",
            get(list_models)
                .post(save_model.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/asset-models/:id",
            get(get_model)
                .delete(delete_model.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/incidence-reports",
            get(list_incidents.layer(from_fn(admin_only)))
                .post(save_incident)
                .fallback(method_not_allowed),
        )
        .route(
            "/incidence-reports/:id",
            get(get_incident.layer(from_fn(admin_only))).fallback(method_not_allowed),
        )
        .route(
            "/user-feedback",
            get(list_feedback.layer(from_fn(admin_only)))
                .post(save_feedback)
                .fallback(method_not_allowed),
        )
        .route(
            "/office-blocks",
            get(list_blocks)
                .post(save_block.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/office-blocks/:id",
            get(get_block)
                .delete(delete_block.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/office-floors",
            get(list_floors)
                .post(save_floor.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/office-floors/:id",
            get(get_floor)
                .delete(delete_floor.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/office-sections",
            get(list_sections)
                .post(save_section.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
        .route(
            "/office-sections/:id",
            get(get_section)
                .delete(delete_section.layer(from_fn(admin_only)))
                .fallback(method_not_allowed),
        )
}

pub fn routes(state: AppState) -> Router {
    let api = staff_routes()
        .merge(user_routes())
        .layer(from_fn_with_state(state.clone(), jwt_auth_middle));
    Router::new()
        .nest("/api/v1", api)
        .layer(from_fn(server_time))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id))
        .with_state(state)
}

/// The routes with trailing slashes stripped before matching.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(routes(state))
}

