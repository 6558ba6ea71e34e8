//! Freshness, refresh, and recovery behavior of the catalog cache store

mod common;

use common::{fake_store, init_test_logging, sample_document};
use logocn_core::catalog::CacheStore;
use logocn_core::CatalogError;
use std::time::Duration;
use tempfile::TempDir;

fn cache_path(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("cache").join("simple-icons.json")
}

#[tokio::test]
async fn test_failed_refresh_leaves_file_untouched() {
    init_test_logging();
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());

    store.refresh().await.unwrap();
    let bytes_before = std::fs::read(store.path()).unwrap();
    let mtime_before = std::fs::metadata(store.path()).unwrap().modified().unwrap();

    // Make sure a rewrite would produce a visibly different mtime
    tokio::time::sleep(Duration::from_millis(20)).await;

    control.set_failing(true);
    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, CatalogError::Fetch { .. }));

    assert_eq!(std::fs::read(store.path()).unwrap(), bytes_before);
    assert_eq!(
        std::fs::metadata(store.path()).unwrap().modified().unwrap(),
        mtime_before
    );

    // No stray temporary files next to the cache
    let entries = std::fs::read_dir(store.path().parent().unwrap())
        .unwrap()
        .count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn test_load_uses_fresh_cache_without_fetching() {
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());

    let first = store.load(false).await.unwrap();
    let second = store.load(false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(control.calls(), 1);
}

#[tokio::test]
async fn test_load_force_refresh_always_fetches() {
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());

    store.load(false).await.unwrap();
    store.load(true).await.unwrap();

    assert_eq!(control.calls(), 2);
}

#[tokio::test]
async fn test_load_fills_generated_slugs() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _control) = fake_store(&cache_path(&temp_dir), sample_document());

    let document = store.load(false).await.unwrap();
    let slugs: Vec<&str> = document
        .icons
        .iter()
        .map(|r| r.slug.as_deref().unwrap())
        .collect();

    assert_eq!(
        slugs,
        vec!["react", "redux", "redis", "visualstudiocode", "cplusplus"]
    );
}

#[tokio::test]
async fn test_stale_cache_survives_failed_refresh() {
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());
    store.refresh().await.unwrap();

    // Zero TTL makes the file stale immediately
    let (stale_store, stale_control) = fake_store(&cache_path(&temp_dir), sample_document());
    let stale_store: CacheStore = stale_store.with_ttl(Duration::ZERO);
    stale_control.set_failing(true);

    let document = stale_store.load(false).await.unwrap();
    assert_eq!(document.len(), 5);
    assert_eq!(stale_control.calls(), 1);
    assert_eq!(control.calls(), 1);
}

#[tokio::test]
async fn test_forced_refresh_failure_is_surfaced() {
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());
    store.refresh().await.unwrap();

    control.set_failing(true);
    let err = store.load(true).await.unwrap_err();
    assert!(err.is_network());

    // Previous catalog is still usable
    control.set_failing(false);
    assert_eq!(store.read_document().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_missing_cache_with_failing_source_is_fetch_error() {
    let temp_dir = TempDir::new().unwrap();
    let (store, control) = fake_store(&cache_path(&temp_dir), sample_document());
    control.set_failing(true);

    let err = store.load(false).await.unwrap_err();
    assert!(matches!(err, CatalogError::Fetch { .. }));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_corrupt_cache_is_repaired_by_one_refresh() {
    let temp_dir = TempDir::new().unwrap();
    let path = cache_path(&temp_dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ truncated").unwrap();

    let (store, control) = fake_store(&path, sample_document());
    assert!(store.is_fresh().await);

    let document = store.load(false).await.unwrap();
    assert_eq!(document.len(), 5);
    assert_eq!(control.calls(), 1);
}

#[tokio::test]
async fn test_corrupt_cache_with_failing_source_is_cache_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = cache_path(&temp_dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let (store, control) = fake_store(&path, sample_document());
    control.set_failing(true);

    let err = store.load(false).await.unwrap_err();
    match err {
        CatalogError::CacheRead { path: err_path, source } => {
            assert_eq!(err_path, path);
            assert!(source.is_network());
        }
        other => panic!("expected CacheRead, got {other:?}"),
    }
    assert_eq!(control.calls(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}

#[tokio::test]
async fn test_stats_and_clear() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _control) = fake_store(&cache_path(&temp_dir), sample_document());

    assert!(!store.stats().await.exists);

    store.refresh().await.unwrap();
    let stats = store.stats().await;
    assert!(stats.exists);
    assert_eq!(stats.count, Some(5));
    assert_eq!(stats.age_hours, Some(0));

    store.clear().await.unwrap();
    store.clear().await.unwrap();
    assert!(!store.stats().await.exists);
    assert!(!store.is_fresh().await);
}
