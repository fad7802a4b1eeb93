use chrono::Utc;
use common::{
    error::{AppError, Res},
    subscription::{Subscription, SubscriptionPayload},
};
use sqlx::SqlitePool;

/// Lists every stored subscription, oldest id first.
pub async fn list_subscriptions(pool: &SqlitePool) -> Res<Vec<Subscription>> {
    db::subscription::list_subscriptions(pool).await
}

/// Fetches one subscription or fails with `NotFound`.
pub async fn get_subscription(pool: &SqlitePool, id: i64) -> Res<Subscription> {
    db::subscription::get_subscription(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Validates and stores a new subscription.
///
/// # Returns
///
/// The stored row, including its server-assigned id and timestamps.
pub async fn create_subscription(pool: &SqlitePool, req: SubscriptionPayload) -> Res<Subscription> {
    req.check()?;

    let created =
        db::subscription::insert_subscription(pool, &req, Utc::now().naive_utc()).await?;
    log::info!("Created subscription {} ({})", created.id, created.plan_name);
    Ok(created)
}

/// Replaces every mutable field of an existing subscription.
pub async fn update_subscription(
    pool: &SqlitePool,
    id: i64,
    req: SubscriptionPayload,
) -> Res<Subscription> {
    req.check()?;

    let updated =
        db::subscription::update_subscription(pool, id, &req, Utc::now().naive_utc())
            .await?
            .ok_or_else(|| not_found(id))?;
    log::info!("Updated subscription {} (status {})", id, updated.status);
    Ok(updated)
}

pub async fn delete_subscription(pool: &SqlitePool, id: i64) -> Res<()> {
    if !db::subscription::delete_subscription(pool, id).await? {
        return Err(not_found(id));
    }
    log::info!("Deleted subscription {}", id);
    Ok(())
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Subscription {}", id))
}
