//! HTTP contract tests for the `/subscriptions` scope.
//!
//! Each test runs against its own in-memory SQLite store.

use actix_web::{
    App,
    body::to_bytes,
    dev::ServiceResponse,
    http::StatusCode,
    test, web,
};
use api_subs::dtos::sub::SubscriptionCreatedResponse;
use common::subscription::{Subscription, SubscriptionStatus};
use serde_json::{Value, json};

macro_rules! app {
    () => {{
        let pool = db::setup("sqlite::memory:", 1)
            .await
            .expect("in-memory store");
        test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .service(api_subs::mount_subscriptions()),
        )
        .await
    }};
}

fn pro_plan() -> Value {
    json!({
        "user_email": "a@b.com",
        "plan_name": "Pro",
        "start_date": "2024-01-01",
        "end_date": "2024-02-01",
        "monthly_cost": 9.99,
        "status": "Active"
    })
}

async fn body_text(res: ServiceResponse) -> String {
    let bytes = to_bytes(res.into_body()).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

macro_rules! create {
    ($app:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/subscriptions")
                .set_json($body)
                .to_request(),
        )
    };
}

#[actix_web::test]
async fn create_then_get_returns_the_payload() {
    let app = app!();

    let res = create!(app, pro_plan()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: SubscriptionCreatedResponse = test::read_body_json(res).await;

    let req = test::TestRequest::get()
        .uri(&format!("/subscriptions/{}", created.id))
        .to_request();
    let row: Subscription = test::call_and_read_body_json(&app, req).await;

    assert_eq!(row.id, created.id);
    assert_eq!(row.user_email, "a@b.com");
    assert_eq!(row.plan_name, "Pro");
    assert_eq!(row.start_date.to_string(), "2024-01-01");
    assert_eq!(row.end_date.to_string(), "2024-02-01");
    assert_eq!(row.monthly_cost, 9.99);
    assert_eq!(row.status, SubscriptionStatus::Active);
    assert_eq!(row.created_at, row.updated_at);
}

#[actix_web::test]
async fn rows_serialize_dates_as_iso_strings() {
    let app = app!();
    create!(app, pro_plan()).await;

    let req = test::TestRequest::get().uri("/subscriptions").to_request();
    let rows: Value = test::call_and_read_body_json(&app, req).await;
    let rows = rows.as_array().expect("array of rows");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["start_date"], "2024-01-01");
    assert_eq!(rows[0]["end_date"], "2024-02-01");
    assert_eq!(rows[0]["status"], "Active");
    assert!(rows[0]["monthly_cost"].is_number());
}

#[actix_web::test]
async fn update_replaces_fields_and_answers_with_text() {
    let app = app!();
    let created: SubscriptionCreatedResponse =
        test::read_body_json(create!(app, pro_plan()).await).await;

    let mut body = pro_plan();
    body["status"] = json!("Cancelled");
    body["plan_name"] = json!("Team");
    let req = test::TestRequest::put()
        .uri(&format!("/subscriptions/{}", created.id))
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "Updated");

    let req = test::TestRequest::get()
        .uri(&format!("/subscriptions/{}", created.id))
        .to_request();
    let row: Subscription = test::call_and_read_body_json(&app, req).await;
    assert_eq!(row.status, SubscriptionStatus::Cancelled);
    assert_eq!(row.plan_name, "Team");
    assert!(row.updated_at >= row.created_at);
}

#[actix_web::test]
async fn padded_plan_name_is_stored_as_sent() {
    let app = app!();
    let mut body = pro_plan();
    body["plan_name"] = json!("  Pro  ");

    let res = create!(app, body).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: SubscriptionCreatedResponse = test::read_body_json(res).await;

    let req = test::TestRequest::get()
        .uri(&format!("/subscriptions/{}", created.id))
        .to_request();
    let row: Subscription = test::call_and_read_body_json(&app, req).await;
    assert_eq!(row.plan_name, "  Pro  ");
    assert_eq!(row.user_email, "a@b.com");
}

#[actix_web::test]
async fn padded_email_is_rejected_not_rewritten() {
    let app = app!();
    let mut body = pro_plan();
    body["user_email"] = json!(" a@b.com ");

    let res = create!(app, body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["fields"]["user_email"], "Invalid email.");
}

#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let app = app!();
    let created: SubscriptionCreatedResponse =
        test::read_body_json(create!(app, pro_plan()).await).await;

    let uri = format!("/subscriptions/{}", created.id);
    let res = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "Deleted");

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_of_unknown_id_is_not_found() {
    let app = app!();
    let req = test::TestRequest::put()
        .uri("/subscriptions/999")
        .set_json(pro_plan())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[actix_web::test]
async fn negative_cost_is_a_bad_request() {
    let app = app!();
    let mut body = pro_plan();
    body["monthly_cost"] = json!(-1);

    let res = create!(app, body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["fields"]["monthly_cost"], "Must be a non-negative number.");
}

#[actix_web::test]
async fn unknown_status_literal_is_a_bad_request() {
    let app = app!();
    let mut body = pro_plan();
    body["status"] = json!("Paused");

    let res = create!(app, body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn invalid_email_and_date_order_are_rejected() {
    let app = app!();
    let mut body = pro_plan();
    body["user_email"] = json!("a@b");
    body["end_date"] = json!("2023-12-01");

    let res = create!(app, body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["fields"]["user_email"], "Invalid email.");
    assert_eq!(body["fields"]["end_date"], "End date must be on/after start date.");

    let req = test::TestRequest::get().uri("/subscriptions").to_request();
    let rows: Vec<Subscription> = test::call_and_read_body_json(&app, req).await;
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn non_numeric_id_does_not_match() {
    let app = app!();
    let req = test::TestRequest::get().uri("/subscriptions/abc").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
