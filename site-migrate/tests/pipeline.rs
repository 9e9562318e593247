//! End-to-end tests of the table migration with in-memory connectors, and
//! with a real SQLite source file.

use std::path::Path;

use migrate_repository::{MockDestination, MockSource, SqliteSource};
use migrate_shared::types::{RowRecord, Value};
use object_storage::MockObjectStorage;
use site_migrate::config::{MEDIA_COLUMNS, STORAGE_BUCKET};
use site_migrate::{MediaMigrator, MigrationExecutor, RowTransformer, TableMigrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const BASE_URL: &str = "https://abc.supabase.co";

fn transformer() -> RowTransformer {
    RowTransformer::new(BASE_URL, STORAGE_BUCKET, &MEDIA_COLUMNS)
}

fn event(id: i64, title: &str, image: Option<&str>) -> RowRecord {
    RowRecord::new()
        .with("id", id)
        .with("title", title)
        .with("image", image)
}

#[tokio::test]
async fn test_events_and_empty_table_scenario() {
    let source = MockSource::new()
        .with_table(
            "events",
            vec![
                event(1, "Opening", Some("uploads/events/a.jpg")),
                event(2, "Concert", None),
                event(3, "Market", None),
            ],
        )
        .with_table("empty_table", vec![]);
    let mut destination = MockDestination::new().with_table("events");
    let transformer = transformer();

    let report = MigrationExecutor::new()
        .with_tables(TableMigrator::new(&source, &transformer), &mut destination)
        .execute()
        .await
        .unwrap();

    let names: Vec<&str> = report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(names, vec!["empty_table", "events"]);

    let empty = report.table("empty_table").unwrap();
    assert!(empty.is_empty_table());
    assert_eq!(empty.rows_inserted, 0);

    let events = report.table("events").unwrap();
    assert_eq!((events.rows_found, events.rows_inserted), (3, 3));

    let rows = destination.rows("events");
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0].get("image"),
        Some(&Value::Text(
            "https://abc.supabase.co/storage/v1/object/public/uploads/events/a.jpg".into()
        ))
    );
    assert_eq!(rows[1].get("image"), Some(&Value::Null));
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_every_row_of_every_table_is_inserted() {
    let source = MockSource::new()
        .with_table("blogs", (1..=4).map(|i| event(i, "post", None)).collect())
        .with_table("news", (1..=2).map(|i| event(i, "item", None)).collect())
        .with_table("team", (1..=7).map(|i| event(i, "member", None)).collect());
    let mut destination = MockDestination::new()
        .with_table("blogs")
        .with_table("news")
        .with_table("team");
    let transformer = transformer();

    let reports = TableMigrator::new(&source, &transformer)
        .migrate_all(&mut destination)
        .await
        .unwrap();

    for (table, expected) in [("blogs", 4), ("news", 2), ("team", 7)] {
        assert_eq!(destination.rows(table).len(), expected, "table {table}");
    }
    assert!(reports.iter().all(|r| r.rows_inserted == r.rows_found));
}

#[tokio::test]
async fn test_bad_row_does_not_abort_table_or_run() {
    let source = MockSource::new()
        .with_table(
            "events",
            vec![
                event(1, "Opening", None),
                RowRecord::new().with("id", 2_i64).with("title", None::<&str>),
                event(3, "Market", None),
            ],
        )
        .with_table("news", vec![event(1, "item", None)]);
    let mut destination = MockDestination::new()
        .with_table("events")
        .with_table("news")
        .rejecting("events", "title", None::<&str>);
    let transformer = transformer();

    let report = MigrationExecutor::new()
        .with_tables(TableMigrator::new(&source, &transformer), &mut destination)
        .execute()
        .await
        .unwrap();

    let events = report.table("events").unwrap();
    assert_eq!(events.rows_found, 3);
    assert_eq!(events.rows_inserted, 2);
    assert_eq!(events.failures.len(), 1);
    assert_eq!(events.failures[0].row_index, 1);

    assert_eq!(report.table("news").unwrap().rows_inserted, 1);
    assert_eq!(report.row_failures(), 1);
    assert!(!report.is_clean());
}

#[tokio::test]
async fn test_table_added_to_source_shows_up_in_report() {
    let mut source = MockSource::new().with_table("events", vec![event(1, "a", None)]);
    let transformer = transformer();

    let mut destination = MockDestination::new().with_table("events").with_table("partners");
    let first = TableMigrator::new(&source, &transformer)
        .migrate_all(&mut destination)
        .await
        .unwrap();
    assert_eq!(first.len(), 1);

    source.add_table(
        "partners",
        vec![RowRecord::new().with("id", 1_i64).with("logo", "uploads/partners/p.png")],
    );

    let mut destination = MockDestination::new().with_table("events").with_table("partners");
    let second = TableMigrator::new(&source, &transformer)
        .migrate_all(&mut destination)
        .await
        .unwrap();

    assert_eq!(second.len(), 2);
    assert_eq!(second[1].table, "partners");
    assert_eq!(
        destination.rows("partners")[0].get("logo"),
        Some(&Value::Text(
            "https://abc.supabase.co/storage/v1/object/public/uploads/partners/p.png".into()
        ))
    );
}

#[tokio::test]
async fn test_catalog_failure_aborts_run() {
    let source = MockSource::new().failing_catalog();
    let mut destination = MockDestination::new();
    let transformer = transformer();

    let result = MigrationExecutor::new()
        .with_tables(TableMigrator::new(&source, &transformer), &mut destination)
        .execute()
        .await;

    assert!(result.is_err());
}

async fn create_database(path: &Path, statements: &[&str]) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    for statement in statements {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

#[tokio::test]
async fn test_full_run_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("database.sqlite");
    create_database(
        &db_path,
        &[
            "CREATE TABLE events (id INTEGER PRIMARY KEY, title TEXT, image TEXT, created_at DATETIME)",
            "CREATE TABLE empty_table (id INTEGER PRIMARY KEY)",
            "INSERT INTO events VALUES
                (1, 'Opening', 'uploads\\events\\a.jpg', '2024-05-01 18:00:00'),
                (2, 'Concert', NULL, '2024-06-01 20:00:00'),
                (3, 'Market', 'uploads/events/b.png', NULL)",
        ],
    )
    .await;

    let uploads = dir.path().join("uploads");
    std::fs::create_dir_all(uploads.join("banners")).unwrap();
    std::fs::write(uploads.join("banners").join("hero.webp"), b"webp").unwrap();

    let source = SqliteSource::open(&db_path).await.unwrap();
    let mut destination = MockDestination::new().with_table("events");
    let storage = MockObjectStorage::new();
    let transformer = transformer();

    let report = MigrationExecutor::new()
        .with_tables(TableMigrator::new(&source, &transformer), &mut destination)
        .with_media(MediaMigrator::new(&storage, &uploads))
        .execute()
        .await
        .unwrap();
    source.close().await;

    assert_eq!(report.rows_inserted(), 3);
    let rows = destination.rows("events");
    assert_eq!(
        rows[0].get("image"),
        Some(&Value::Text(
            "https://abc.supabase.co/storage/v1/object/public/uploads/events/a.jpg".into()
        ))
    );
    assert_eq!(
        rows[1].get("created_at"),
        Some(&Value::Timestamp("2024-06-01 20:00:00".into()))
    );

    assert_eq!(report.files_uploaded(), 1);
    assert_eq!(storage.get("banners/hero.webp").unwrap().content_type, "image/webp");
    assert!(!report.directory("projects").unwrap().present);
}
