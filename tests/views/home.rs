use xeriwo::home::Home;

use crate::common::*;

#[tokio::test]
async fn test_empty_featured_falls_back_to_latest() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Home);
    let mut home = Home::new(h.client, h.downloader);

    home.load().await;

    assert_eq!(home.featured().len(), 3);
    assert_eq!(count(&backend.hits.products), 1);

    let stats = home.stats();
    assert_eq!(stats.total_products, 500);
    assert_eq!(stats.total_downloads, 812);
    assert_eq!(stats.total_users, 18_500);
}

#[tokio::test]
async fn test_download_from_featured_card() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Home);
    sign_in(&h.storage);
    let mut home = Home::new(h.client, h.downloader);
    home.load().await;

    let report = home.download("p-ok").await;

    assert!(report.outcome.is_started());
    assert_eq!(home.featured()[0].downloads, 11);
    assert!(!home.is_downloading("p-ok"));
    assert_eq!(home.take_notices().len(), 1);
}
