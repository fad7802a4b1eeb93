use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, subscription::SubscriptionPayload};
use sqlx::SqlitePool;

use crate::{dtos::sub::SubscriptionCreatedResponse, services};

/// Lists all subscriptions.
///
/// # Output
/// - Success: JSON array of rows ordered by id
/// - Error: 500 if the store cannot be read
#[get("")]
pub async fn get_subscriptions(pool: web::Data<Arc<SqlitePool>>) -> Res<impl Responder> {
    let rows = services::sub::list_subscriptions(&pool).await?;
    Success::ok(rows)
}

/// Fetches a single subscription by id.
///
/// # Output
/// - Success: the JSON row
/// - Error: 404 if no row has this id
#[get("/{id}")]
pub async fn get_subscription(
    pool: web::Data<Arc<SqlitePool>>,
    path: web::Path<i64>,
) -> Res<impl Responder> {
    let row = services::sub::get_subscription(&pool, path.into_inner()).await?;
    Success::ok(row)
}

/// Creates a subscription.
///
/// # Input
/// - `req`: `user_email`, `plan_name`, `start_date`, `end_date` (YYYY-MM-DD),
///   `monthly_cost` (number), `status` (`Active` | `Expired` | `Cancelled`)
///
/// # Output
/// - Success: 201 with `{"id": <new id>}`
/// - Error: 400 with `{"error": ..., "fields": {...}}` when a field is invalid
#[post("")]
pub async fn post_subscription(
    pool: web::Data<Arc<SqlitePool>>,
    req: web::Json<SubscriptionPayload>,
) -> Res<impl Responder> {
    let created = services::sub::create_subscription(&pool, req.into_inner()).await?;
    Success::created(SubscriptionCreatedResponse { id: created.id })
}

/// Replaces all mutable fields of a subscription.
///
/// # Output
/// - Success: plain text `Updated`
/// - Error: 404 for an unknown id, 400 for invalid fields
#[put("/{id}")]
pub async fn put_subscription(
    pool: web::Data<Arc<SqlitePool>>,
    path: web::Path<i64>,
    req: web::Json<SubscriptionPayload>,
) -> Res<impl Responder> {
    services::sub::update_subscription(&pool, path.into_inner(), req.into_inner()).await?;
    Success::text("Updated")
}

#[delete("/{id}")]
pub async fn delete_subscription(
    pool: web::Data<Arc<SqlitePool>>,
    path: web::Path<i64>,
) -> Res<impl Responder> {
    services::sub::delete_subscription(&pool, path.into_inner()).await?;
    Success::text("Deleted")
}
