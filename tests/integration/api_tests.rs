//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token for the seeded admin account
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Unique suffix so create tests survive reruns against the same database
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_millis())
}

/// Create a piece of equipment from a full payload and return its id
async fn create_equipment(client: &Client, token: &str, body: Value) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

/// Create equipment in the seeded Machinery category on team 1
async fn create_basic_equipment(client: &Client, token: &str, prefix: &str) -> i64 {
    create_equipment(
        client,
        token,
        json!({ "name": unique(prefix), "category_id": 1, "team_id": 1 }),
    )
    .await
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_equipment_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let id = create_equipment(
        &client,
        &token,
        json!({
            "name": unique("Bench Drill"),
            "category_id": 1,
            "serial_number": unique("SN"),
            "team_id": 1,
            "technician_id": 2,
            "purchase_value": 1500.0
        }),
    )
    .await;

    // Fetch it back
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["category_name"], "Machinery");
    assert_eq!(body["technician_id"], 2);
    assert_eq!(body["is_scrap"], false);
    assert_eq!(body["owner_display"], "Company");

    // Relocate it
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "location": "Building B",
            "note": "Moved after the floor refit"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["location"], "Building B");
}

#[tokio::test]
#[ignore]
async fn test_equipment_ownership_requires_assignee() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Unassigned Lathe"),
            "category_id": 1,
            "team_id": 1,
            "ownership_type": "department"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_equipment_ownership_clears_other_assignee() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Employee ownership with a stray department: the department must not stick
    let id = create_equipment(
        &client,
        &token,
        json!({
            "name": unique("Laptop"),
            "category_id": 3,
            "team_id": 1,
            "ownership_type": "employee",
            "employee_id": 3,
            "department_id": 1
        }),
    )
    .await;

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["ownership_type"], "employee");
    assert_eq!(body["employee_id"], 3);
    assert_eq!(body["owner_display"], "Ravi Patel");
    assert!(body["department_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_equipment_duplicate_serial_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let serial = unique("SN-DUP");
    create_equipment(
        &client,
        &token,
        json!({
            "name": unique("Press"),
            "category_id": 1,
            "team_id": 1,
            "serial_number": serial
        }),
    )
    .await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Press Copy"),
            "category_id": 1,
            "team_id": 1,
            "serial_number": serial
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_scrap_equipment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let id = create_basic_equipment(&client, &token, "Old Conveyor").await;

    let response = client
        .post(format!("{}/equipment/{}/scrap", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "reason": "Frame cracked beyond repair" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_scrap"], true);
    assert!(body["scrap_date"].is_string());

    // Scrapping twice is refused
    let response = client
        .post(format!("{}/equipment/{}/scrap", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_request_autofill_from_equipment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_equipment(
        &client,
        &token,
        json!({
            "name": unique("CNC Mill"),
            "category_id": 1,
            "team_id": 1,
            "technician_id": 2
        }),
    )
    .await;

    // No team or technician given: both come from the equipment
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Spindle vibration"),
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["team_id"], 1);
    assert_eq!(body["technician_id"], 2);
    assert_eq!(body["stage_name"], "New");
    assert_eq!(body["priority"], 1);
    assert_eq!(body["request_type"], "corrective");
}

#[tokio::test]
#[ignore]
async fn test_request_technician_must_be_team_member() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Grinder").await;

    // User 4 is seeded but not on team 1
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Guard replacement"),
            "equipment_id": equipment_id,
            "team_id": 1,
            "technician_id": 4
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_preventive_request_gets_default_schedule() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Air Compressor").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Quarterly filter swap"),
            "equipment_id": equipment_id,
            "request_type": "preventive"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["scheduled_date"].is_string());
    assert!(body["reminder_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_request_list_is_paginated() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/requests?page=1&per_page=5", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 5);
}

#[tokio::test]
#[ignore]
async fn test_scrap_stage_scraps_equipment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Worn Forklift").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Write-off inspection"),
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    // Stage 4 is the seeded scrap stage
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "stage_id": 4 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["stage_is_closed"], true);
    assert!(body["close_date"].is_string());

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_scrap"], true);
}

#[tokio::test]
#[ignore]
async fn test_overdue_clears_when_request_closes() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Leaky Pump").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Seal replacement"),
            "equipment_id": equipment_id,
            "deadline": "2020-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");
    assert_eq!(body["is_overdue"], true);

    // Stage 3 is the seeded Repaired stage
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "stage_id": 3 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_overdue"], false);
    assert!(body["close_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_mark_repaired() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Jammed Labeler").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Clear label jam"),
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    let response = client
        .post(format!("{}/requests/{}/mark-repaired", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["stage_name"], "Repaired");
    assert!(body["close_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_assign_to_me() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Hoist").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Chain inspection"),
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    // Admin is a member of team 1, and a fresh request moves off the first stage
    let response = client
        .post(format!("{}/requests/{}/assign-to-me", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["technician_id"], 1);
    assert_eq!(body["stage_name"], "In Progress");
}

#[tokio::test]
#[ignore]
async fn test_assign_to_me_requires_membership() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // A team the admin does not belong to
    let response = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Night Shift"), "member_ids": [4, 5] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let team_id = body["id"].as_i64().expect("No team ID");

    let equipment_id = create_basic_equipment(&client, &token, "Boiler").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Pressure check"),
            "equipment_id": equipment_id,
            "team_id": team_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    let response = client
        .post(format!("{}/requests/{}/assign-to-me", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_category_with_equipment_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Test Category") }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let category_id = body["id"].as_i64().expect("No category ID");

    create_equipment(
        &client,
        &token,
        json!({
            "name": unique("Categorized Saw"),
            "category_id": category_id,
            "team_id": 1
        }),
    )
    .await;

    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_empty_category_delete() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Ephemeral Category") }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let category_id = body["id"].as_i64().expect("No category ID");

    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_stage_with_requests_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/stages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Waiting Parts"), "sequence": 90 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let stage_id = body["id"].as_i64().expect("No stage ID");

    let equipment_id = create_basic_equipment(&client, &token, "Welder").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Torch rebuild"),
            "equipment_id": equipment_id,
            "stage_id": stage_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    let response = client
        .delete(format!("{}/stages/{}", BASE_URL, stage_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Move the request out, then the stage can go
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "stage_id": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/stages/{}", BASE_URL, stage_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_work_center_code_must_be_unique() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let code = unique("WC");
    let response = client
        .post(format!("{}/work-centers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Assembly Line"), "code": code }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/work-centers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": unique("Assembly Line B"), "code": code }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_team_roster_update() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": unique("Electrical"),
            "leader_id": 2,
            "member_ids": [2, 3]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let team_id = body["id"].as_i64().expect("No team ID");
    assert_eq!(body["member_count"], 2);

    let response = client
        .put(format!("{}/teams/{}", BASE_URL, team_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "member_ids": [2, 3, 4] }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["member_count"], 3);
}

#[tokio::test]
#[ignore]
async fn test_directory_lists() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    for path in ["departments", "employees", "vendors"] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array());
        assert!(!body.as_array().unwrap().is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_audit_trail_records_changes() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Tracked Band Saw").await;

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "location": "Hall 3" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/audit/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let changes = body["changes"].as_array().expect("No changes array");
    assert!(changes
        .iter()
        .any(|c| c["field_name"] == "location" && c["new_value"] == "Hall 3"));
}

#[tokio::test]
#[ignore]
async fn test_post_audit_message() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment_id = create_basic_equipment(&client, &token, "Noted Crane").await;

    let response = client
        .post(format!("{}/audit/equipment/{}/messages", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "body": "Checked the boom, no cracks found" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["body"], "Checked the boom, no cracks found");
    assert_eq!(body["author_name"], "Administrator");
    assert_eq!(body["message_type"], "comment");
}

#[tokio::test]
#[ignore]
async fn test_audit_message_on_missing_record() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/audit/equipment/999999/messages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "body": "Ghost note" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_users() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let users = body.as_array().expect("Expected a user array");
    assert!(users.iter().any(|u| u["login"] == "admin"));
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["equipment"]["total"].is_number());
    assert!(body["requests"]["open"].is_number());
    assert!(body["teams"]["total"].is_number());
    assert!(body["requests"]["by_stage"].is_array());
}
