//! Integration tests for the PostgreSQL destination connector.
//!
//! These tests require a real PostgreSQL database reachable through
//! `DATABASE_URL`. They are ignored by default.
//!
//! Run with: `cargo test --test postgres_destination -- --ignored`

use std::time::Duration;

use migrate_repository::{DestinationWriter, PostgresDestination, RowOutcome};
use migrate_shared::types::{RowRecord, Value};

async fn connect() -> PostgresDestination {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    PostgresDestination::connect(&url, Duration::from_secs(10))
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_insert_row_with_typed_columns() {
    let destination = connect().await;
    let mut session = destination.acquire().await.unwrap();

    let pool = sqlx::PgPool::connect(&std::env::var("DATABASE_URL").unwrap())
        .await
        .unwrap();
    sqlx::query("DROP TABLE IF EXISTS migrate_test_events")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE migrate_test_events (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            published BOOLEAN,
            created_at TIMESTAMPTZ
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let columns: Vec<String> = ["id", "title", "published", "created_at"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let row = RowRecord::new()
        .with("id", 1_i64)
        .with("title", "Folk night")
        .with("published", 1_i64)
        .with("created_at", Value::Timestamp("2024-05-01 18:00:00".into()));

    let first = session
        .insert_row("migrate_test_events", &columns, &row)
        .await
        .unwrap();
    let rerun = session
        .insert_row("migrate_test_events", &columns, &row)
        .await
        .unwrap();
    assert_eq!(first, RowOutcome::Inserted);
    assert_eq!(rerun, RowOutcome::Skipped);

    let missing_title = RowRecord::new().with("id", 2_i64).with("title", None::<&str>);
    assert!(session
        .insert_row("migrate_test_events", &columns, &missing_title)
        .await
        .is_err());

    // A failed autocommitted insert leaves the session usable.
    assert_eq!(session.count_rows("migrate_test_events").await.unwrap(), 1);

    session.release();
    sqlx::query("DROP TABLE migrate_test_events")
        .execute(&pool)
        .await
        .unwrap();
    destination.close().await;
}
