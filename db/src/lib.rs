use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, sync::Arc};

pub mod subscription;

const CREATE_SUBSCRIPTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_email TEXT NOT NULL,
        plan_name TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        monthly_cost REAL NOT NULL CHECK (monthly_cost >= 0),
        status TEXT NOT NULL CHECK (status IN ('Active', 'Expired', 'Cancelled')),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (end_date >= start_date)
    )
"#;

/// Opens the pool and makes sure the `subscriptions` table exists.
///
/// Use `sqlite::memory:` with a single connection for a throwaway store;
/// every pooled connection to an in-memory URL would otherwise see its own
/// empty database.
pub async fn setup(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<SqlitePool>, Box<dyn std::error::Error>> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
    if is_in_memory(database_url) {
        // recycling the connection would drop the database with it
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;

    sqlx::query(CREATE_SUBSCRIPTIONS).execute(&pool).await?;

    Ok(Arc::new(pool))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
