use std::sync::Arc;

use xeriwo::catalog::{Catalog, CatalogFilters, PageItem, SortBy};
use xeriwo::notify::{Level, Notice};

use crate::common::*;

#[tokio::test]
async fn test_load_then_search_narrows_page() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    let filters = CatalogFilters::from_query_string("search=seo&sort=popular");
    let mut catalog = Catalog::new(h.client, h.downloader).with_filters(filters);

    catalog.load().await;

    assert_eq!(catalog.products().len(), 3);
    let visible: Vec<&str> = catalog.visible().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(visible, vec!["p-again"]);
    assert_eq!(catalog.filters.sort, SortBy::Popular);
    assert_eq!(catalog.total_pages(), 4);
    assert_eq!(
        catalog.page_window(),
        vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3), PageItem::Page(4)]
    );
}

#[tokio::test]
async fn test_set_page_clamps_and_reset_restores_defaults() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    let mut catalog = Catalog::new(h.client, h.downloader);
    catalog.load().await;

    catalog.set_page(9);
    assert_eq!(catalog.filters.page, 4);
    assert_eq!(catalog.filters.to_query_string(), "page=4");

    catalog.filters.search = "astra".into();
    catalog.reset_filters();
    assert_eq!(catalog.filters, CatalogFilters::default());
}

#[tokio::test]
async fn test_download_bumps_local_counter_once() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);
    let mut catalog = Catalog::new(h.client, h.downloader);
    catalog.load().await;

    catalog.download("p-again").await;

    let again = catalog.products().iter().find(|p| p.id == "p-again").unwrap();
    assert_eq!(again.downloads, 5);
    let notices = catalog.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, Level::Info);
}

#[tokio::test]
async fn test_rejected_download_keeps_counter() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    let mut catalog = Catalog::new(h.client, h.downloader);
    catalog.load().await;

    catalog.download("p-ok").await;

    let ok = catalog.products().iter().find(|p| p.id == "p-ok").unwrap();
    assert_eq!(ok.downloads, 10);
    assert_eq!(
        catalog.take_notices(),
        vec![Notice::error("🔒 Please login to download products")]
    );
}

#[tokio::test]
async fn test_wishlist_toggle_notices() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    let mut catalog = Catalog::new(h.client, h.downloader);

    assert!(catalog.toggle_wishlist("p-ok"));
    assert!(catalog.in_wishlist("p-ok"));
    assert!(!catalog.toggle_wishlist("p-ok"));

    assert_eq!(
        catalog.take_notices(),
        vec![
            Notice::success("Added to wishlist"),
            Notice::info("Removed from wishlist"),
        ]
    );
}

#[tokio::test]
async fn test_failed_reload_resets_page_count() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    let mut catalog = Catalog::new(h.client, h.downloader);
    catalog.load().await;
    assert_eq!(catalog.total_pages(), 4);

    catalog.filters.category = "broken".into();
    catalog.load().await;

    assert!(catalog.products().is_empty());
    assert_eq!(catalog.total_pages(), 1);
    catalog.set_page(3);
    assert_eq!(catalog.filters.page, 1);
    assert_eq!(
        catalog.take_notices(),
        vec![Notice::error("Failed to load products")]
    );
}

#[tokio::test]
async fn test_load_failure_clears_products() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(
        ClientConfig::new(format!("http://{}/api", addr)),
        Arc::new(MemoryStorage::new()),
        Navigator::new(View::Products),
    )
    .unwrap();
    let downloader = Downloader::new(client.clone(), Arc::new(RecordingOpener::new()));
    let mut catalog = Catalog::new(client, downloader);

    catalog.load().await;

    assert!(catalog.products().is_empty());
    assert_eq!(
        catalog.take_notices(),
        vec![Notice::error("Failed to load products")]
    );
}
