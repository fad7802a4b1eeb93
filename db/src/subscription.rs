use chrono::NaiveDateTime;
use common::{
    error::{AppError, Res},
    subscription::{Subscription, SubscriptionPayload},
};
use sqlx::{Executor, Sqlite};

pub async fn list_subscriptions<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
) -> Res<Vec<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions ORDER BY id")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_subscription<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    id: i64,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_subscription<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    data: &SubscriptionPayload,
    now: NaiveDateTime,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions
            (user_email, plan_name, start_date, end_date, monthly_cost, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&data.user_email)
    .bind(&data.plan_name)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.monthly_cost)
    .bind(data.status.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Replaces every mutable column of one row. `None` when the id is absent.
///
/// `updated_at` never moves backwards, even if `now` is behind the stored value.
pub async fn update_subscription<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    id: i64,
    data: &SubscriptionPayload,
    now: NaiveDateTime,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        r#"
        UPDATE subscriptions SET
            user_email = ?, plan_name = ?, start_date = ?, end_date = ?,
            monthly_cost = ?, status = ?, updated_at = max(?, updated_at)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&data.user_email)
    .bind(&data.plan_name)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.monthly_cost)
    .bind(data.status.as_str())
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Hard delete. Returns `false` when no row had this id.
pub async fn delete_subscription<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    id: i64,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use common::subscription::SubscriptionStatus;
    use sqlx::SqlitePool;

    use super::*;

    async fn pool() -> SqlitePool {
        let pool = crate::setup("sqlite::memory:", 1).await.unwrap();
        (*pool).clone()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn payload() -> SubscriptionPayload {
        SubscriptionPayload {
            user_email: "a@b.com".to_string(),
            plan_name: "Pro".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            monthly_cost: 9.99,
            status: SubscriptionStatus::Active,
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_payload_with_server_fields() {
        let pool = pool().await;
        let created = insert_subscription(&pool, &payload(), at(1, 9)).await.unwrap();
        let fetched = get_subscription(&pool, created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.payload(), payload());
        assert_eq!(fetched.created_at, at(1, 9));
        assert_eq!(fetched.updated_at, at(1, 9));
    }

    #[tokio::test]
    async fn ids_are_unique_and_listing_is_ordered() {
        let pool = pool().await;
        let first = insert_subscription(&pool, &payload(), at(1, 9)).await.unwrap();
        let second = insert_subscription(&pool, &payload(), at(1, 10)).await.unwrap();
        assert_ne!(first.id, second.id);

        let ids: Vec<i64> = list_subscriptions(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_bumps_updated_at() {
        let pool = pool().await;
        let created = insert_subscription(&pool, &payload(), at(1, 9)).await.unwrap();

        let mut changed = payload();
        changed.plan_name = "Team".to_string();
        changed.monthly_cost = 0.0;
        changed.status = SubscriptionStatus::Cancelled;
        let updated = update_subscription(&pool, created.id, &changed, at(2, 9))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.payload(), changed);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, at(2, 9));
    }

    #[tokio::test]
    async fn updated_at_does_not_go_backwards() {
        let pool = pool().await;
        let created = insert_subscription(&pool, &payload(), at(5, 9)).await.unwrap();
        let updated = update_subscription(&pool, created.id, &payload(), at(1, 9))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.updated_at, at(5, 9));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_row() {
        let pool = pool().await;
        assert_eq!(
            update_subscription(&pool, 42, &payload(), at(1, 9)).await.unwrap(),
            None
        );
        assert!(!delete_subscription(&pool, 42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = pool().await;
        let created = insert_subscription(&pool, &payload(), at(1, 9)).await.unwrap();
        assert!(delete_subscription(&pool, created.id).await.unwrap());
        assert_eq!(get_subscription(&pool, created.id).await.unwrap(), None);
        assert!(list_subscriptions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn table_rejects_negative_cost() {
        let pool = pool().await;
        let mut bad = payload();
        bad.monthly_cost = -5.0;
        let err = insert_subscription(&pool, &bad, at(1, 9)).await.unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn table_rejects_unknown_status_literal() {
        let pool = pool().await;
        let err = sqlx::query(
            "INSERT INTO subscriptions
                (user_email, plan_name, start_date, end_date, monthly_cost, status, created_at, updated_at)
             VALUES ('a@b.com', 'Pro', '2024-01-01', '2024-02-01', 1.0, 'Paused', ?, ?)",
        )
        .bind(at(1, 9))
        .bind(at(1, 9))
        .execute(&pool)
        .await
        .map_err(AppError::from)
        .unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn table_rejects_end_before_start() {
        let pool = pool().await;
        let mut bad = payload();
        bad.end_date = bad.start_date - Duration::days(1);
        let err = insert_subscription(&pool, &bad, at(1, 9)).await.unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)), "got {err:?}");
    }
}
