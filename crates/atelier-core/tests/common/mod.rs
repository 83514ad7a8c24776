use atelier_core::TrackerBuilder;
use tempfile::TempDir;

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, atelier_core::Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_cache_ttl_ms(0)
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}
