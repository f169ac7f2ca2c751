use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::config::AppState;
use crate::test_support::{self, call, token, ADMIN_EMAIL};

async fn admin(state: &AppState) -> String {
    test_support::seed_model(&state.conn, "MBP-2017").await;
    token(state, ADMIN_EMAIL)
}

async fn post_asset(state: &AppState, admin: &str, code: &str, owner: Option<i32>) -> Value {
    let (status, body) = call(
        state,
        Method::POST,
        "/api/v1/manage-assets",
        Some(admin),
        Some(json!({
            "asset_code": code,
            "serial_number": format!("SN-{code}"),
            "model_number": "MBP-2017",
            "assigned_to": owner,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn anonymous_is_rejected() {
    let state = test_support::state().await;
    for uri in ["/api/v1/assets", "/api/v1/manage-assets", "/api/v1/asset-categories"] {
        let (status, body) = call(&state, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "Authentication credentials were not provided.");
    }
    let (status, _) = call(&state, Method::GET, "/api/v1/assets", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_paths_forbid_regular_users() {
    let state = test_support::state().await;
    let user = token(&state, "someone@site.com");
    for uri in [
        "/api/v1/users",
        "/api/v1/manage-assets",
        "/api/v1/allocations",
        "/api/v1/asset-logs",
        "/api/v1/asset-health",
        "/api/v1/incidence-reports",
        "/api/v1/user-feedback",
    ] {
        let (status, _) = call(&state, Method::GET, uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }
    // permission comes before method dispatch
    let (status, _) = call(&state, Method::PATCH, "/api/v1/manage-assets", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(
        &state,
        Method::POST,
        "/api/v1/asset-categories",
        Some(&user),
        Some(json!({"category_name": "Chairs"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&state, Method::GET, "/api/v1/asset-categories", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn unsupported_method() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (status, body) = call(&state, Method::PATCH, "/api/v1/manage-assets", Some(&admin), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["msg"], "Method \"PATCH\" not allowed.");
    let (status, _) = call(&state, Method::DELETE, "/api/v1/asset-status", Some(&admin), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn owners_see_only_their_assets() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let owner = test_support::seed_user(&state.conn, "owner@site.com", false).await;
    test_support::seed_user(&state.conn, "other@site.com", false).await;
    let created = post_asset(&state, &admin, "IC001", Some(owner.id)).await;
    assert_eq!(created["current_status"], "Available");
    assert_eq!(created["assigned_to"]["email"], "owner@site.com");
    assert_eq!(created["asset_category"], "Computers");
    assert_eq!(created["asset_type"], "Laptop");
    assert_eq!(created["make_label"], "Make of MBP-2017");
    assert_eq!(created["allocation_history"][0]["current_owner"], "owner@site.com");
    assert!(created["checkin_status"].is_null());

    let owner_token = token(&state, "owner@site.com");
    let (status, body) = call(&state, Method::GET, "/api/v1/assets", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    let (status, _) = call(&state, Method::GET, "/api/v1/items/SN-IC001", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let other = token(&state, "other@site.com");
    let (_, body) = call(&state, Method::GET, "/api/v1/assets", Some(&other), None).await;
    assert_eq!(body["data"]["total"], 0);
    let (status, _) = call(&state, Method::GET, "/api/v1/assets/SN-IC001", Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn asset_needs_code_or_serial_and_a_known_model() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/manage-assets",
        Some(&admin),
        Some(json!({"model_number": "MBP-2017"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["non_field_errors"][0],
        "asset must have either asset code or serial number"
    );

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/manage-assets",
        Some(&admin),
        Some(json!({"asset_code": "IC404", "model_number": "NOPE"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["model_number"][0],
        "Object with model_number=NOPE does not exist."
    );

    post_asset(&state, &admin, "IC002", None).await;
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/manage-assets",
        Some(&admin),
        Some(json!({"asset_code": "IC002", "model_number": "MBP-2017"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["asset_code"].is_array());
}

#[tokio::test]
async fn status_payload_is_validated() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (status, body) = call(&state, Method::POST, "/api/v1/asset-status", Some(&admin), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["asset"][0], "This field is required.");
    assert_eq!(body["data"]["current_status"][0], "This field is required.");

    let created = post_asset(&state, &admin, "IC003", None).await;
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/asset-status",
        Some(&admin),
        Some(json!({"asset": created["id"], "current_status": "Invalid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["current_status"][0], "\"Invalid\" is not a valid choice.");

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/asset-status",
        Some(&admin),
        Some(json!({"asset": 9999, "current_status": "Lost"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["asset"][0], "Invalid pk \"9999\" - object does not exist.");
}

#[tokio::test]
async fn available_status_takes_asset_back() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let owner = test_support::seed_user(&state.conn, "owner@site.com", false).await;
    let created = post_asset(&state, &admin, "IC004", Some(owner.id)).await;
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/asset-status",
        Some(&admin),
        Some(json!({"asset": created["id"], "current_status": "Available"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["asset"], "IC004 - SN-IC004");
    assert_eq!(body["data"]["previous_status"], "Available");

    let (_, body) = call(&state, Method::GET, "/api/v1/manage-assets/SN-IC004", Some(&admin), None).await;
    assert!(body["data"]["assigned_to"].is_null());
    assert!(body["data"]["allocation_history"][0]["current_owner"].is_null());
    assert_eq!(body["data"]["allocation_history"][0]["previous_owner"], "owner@site.com");
}

#[tokio::test]
async fn security_desk_logs_drive_checkin_status() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let guard = test_support::seed_security_user(&state.conn).await;
    let created = post_asset(&state, &admin, "IC005", None).await;
    for (log_type, expected) in [("Checkin", "checked_in"), ("Checkout", "checked_out")] {
        let (status, _) = call(
            &state,
            Method::POST,
            "/api/v1/asset-logs",
            Some(&admin),
            Some(json!({"asset": created["id"], "checked_by": guard.id, "log_type": log_type})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, body) = call(&state, Method::GET, "/api/v1/manage-assets/SN-IC005", Some(&admin), None).await;
        assert_eq!(body["data"]["checkin_status"], expected);
    }
}

#[tokio::test]
async fn similar_specs_rejected() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let specs = json!({"screen_size": 15, "memory": 8, "processor_type": "Intel core i5"});
    let (status, _) = call(&state, Method::POST, "/api/v1/asset-specs", Some(&admin), Some(specs.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(&state, Method::POST, "/api/v1/asset-specs", Some(&admin), Some(specs)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["non_field_errors"][0],
        "Similar asset specification already exist"
    );

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/asset-specs",
        Some(&admin),
        Some(json!({"screen_size": 14})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["screen_size"][0], "\"14\" is not a valid choice.");
}

#[tokio::test]
async fn owner_email_filter() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let owner = test_support::seed_user(&state.conn, "owner@site.com", false).await;
    post_asset(&state, &admin, "IC006", Some(owner.id)).await;
    post_asset(&state, &admin, "IC007", None).await;

    let (status, body) = call(&state, Method::GET, "/api/v1/manage-assets?email=not-an-email", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["email"][0], "Enter a valid email address.");

    let (_, body) = call(&state, Method::GET, "/api/v1/manage-assets?email=owner@site.com", Some(&admin), None).await;
    assert_eq!(body["data"]["total"], 1);
    let (_, body) = call(&state, Method::GET, "/api/v1/manage-assets?email=nobody@site.com", Some(&admin), None).await;
    assert_eq!(body["data"]["total"], 0);
    let (_, body) = call(&state, Method::GET, "/api/v1/manage-assets?page=1&size=1", Some(&admin), None).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["list"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn used_model_number_cannot_be_deleted() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    post_asset(&state, &admin, "IC008", None).await;
    let model = test_support::seed_model(&state.conn, "MBP-2017").await;
    let uri = format!("/api/v1/asset-models/{}", model.id);
    let (status, _) = call(&state, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&state, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn trailing_slash_is_optional() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (status, body) = call(&state, Method::GET, "/api/v1/asset-categories/", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["list"][0]["category_name"], "Computers");
}

#[tokio::test]
async fn incidents_and_feedback() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let created = post_asset(&state, &admin, "IC009", None).await;
    let user = token(&state, "reporter@site.com");
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/incidence-reports",
        Some(&user),
        Some(json!({
            "asset": created["id"],
            "incident_type": "Loss",
            "incident_location": "Lagos",
            "incident_description": "Left in a cab",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let (status, _) = call(&state, Method::GET, "/api/v1/incidence-reports", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = call(&state, Method::GET, "/api/v1/incidence-reports", Some(&admin), None).await;
    assert_eq!(body["data"]["total"], 1);

    // an asset with incident reports stays
    let (status, _) = call(&state, Method::DELETE, "/api/v1/manage-assets/SN-IC009", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &state,
        Method::POST,
        "/api/v1/user-feedback",
        Some(&user),
        Some(json!({"message": "works", "report_type": "feedback"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn response_headers() {
    let state = test_support::state().await;
    let admin = token(&state, ADMIN_EMAIL);
    let request = axum::http::Request::builder()
        .uri("/api/v1/asset-types")
        .header("authorization", format!("Token {admin}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(super::app(state), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("x-server-time"));
}

#[tokio::test]
async fn office_names_are_normalized_and_unique() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-blocks",
        Some(&admin),
        Some(json!({"name": "  epic   tower "})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["name"], "Epic Tower");
    let block = body["data"]["id"].clone();

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-blocks",
        Some(&admin),
        Some(json!({"name": "EPIC TOWER"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["name"][0], "office block with this name already exists.");

    let floor = json!({"number": 5, "block_id": block});
    let (status, body) = call(&state, Method::POST, "/api/v1/office-floors", Some(&admin), Some(floor.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let floor_id = body["data"]["id"].clone();
    let (status, body) = call(&state, Method::POST, "/api/v1/office-floors", Some(&admin), Some(floor)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["non_field_errors"][0],
        "The fields block_id, number must make a unique set."
    );

    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-sections",
        Some(&admin),
        Some(json!({"name": "open  plan", "floor_id": floor_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["name"], "Open Plan");
    let section_id = body["data"]["id"].clone();
    let (status, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-sections",
        Some(&admin),
        Some(json!({"name": "OPEN PLAN", "floor_id": floor_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["non_field_errors"][0],
        "The fields floor_id, name must make a unique set."
    );
}

#[tokio::test]
async fn office_levels_in_use_are_protected() {
    let state = test_support::state().await;
    let admin = admin(&state).await;
    let (_, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-blocks",
        Some(&admin),
        Some(json!({"name": "Annex"})),
    )
    .await;
    let block = body["data"]["id"].clone();
    let (_, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-floors",
        Some(&admin),
        Some(json!({"number": 1, "block_id": block})),
    )
    .await;
    let floor = body["data"]["id"].clone();
    let (_, body) = call(
        &state,
        Method::POST,
        "/api/v1/office-sections",
        Some(&admin),
        Some(json!({"name": "Lobby", "floor_id": floor})),
    )
    .await;
    let section = body["data"]["id"].clone();

    let block_uri = format!("/api/v1/office-blocks/{block}");
    let floor_uri = format!("/api/v1/office-floors/{floor}");
    let section_uri = format!("/api/v1/office-sections/{section}");
    let (status, _) = call(&state, Method::DELETE, &block_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&state, Method::DELETE, &floor_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for uri in [&section_uri, &floor_uri, &block_uri] {
        let (status, body) = call(&state, Method::DELETE, uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    }
    let (_, body) = call(&state, Method::GET, "/api/v1/office-blocks", Some(&admin), None).await;
    assert_eq!(body["data"]["total"], 0);
}
