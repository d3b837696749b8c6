use xeriwo::downloads::{
    DOWNLOAD_FAILED, DownloadOutcome, LIMIT_REACHED, LOGIN_TO_DOWNLOAD, PRODUCT_NOT_FOUND,
};
use xeriwo::notify::Level;
use xeriwo::sdk::DownloadEndpoint;

use crate::common::*;

#[tokio::test]
async fn test_download_without_session_never_hits_network() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);

    let report = h.downloader.download(DownloadEndpoint::Direct, "p-ok").await;

    assert_eq!(report.outcome, DownloadOutcome::LoginRequired);
    assert_eq!(report.outcome.notice().unwrap().text, LOGIN_TO_DOWNLOAD);
    assert_eq!(count(&backend.hits.downloads), 0);
    assert!(h.opener.opened().is_empty());
}

#[tokio::test]
async fn test_rejected_session_gets_same_prompt_and_is_purged() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);

    let report = h.downloader.download(DownloadEndpoint::Direct, "p-unauth").await;

    assert_eq!(count(&backend.hits.downloads), 1);
    assert_eq!(report.outcome, DownloadOutcome::LoginRequired);
    assert_eq!(report.outcome.notice().unwrap().text, LOGIN_TO_DOWNLOAD);
    assert!(report.quota.is_none());
    assert!(h.storage.get(keys::TOKEN).is_none());
    assert!(h.storage.get(keys::USER).is_none());
    assert_eq!(h.navigator.current(), View::Login);
    assert!(h.opener.opened().is_empty());

    // the session is gone, so a second click short-circuits
    h.downloader.download(DownloadEndpoint::Direct, "p-unauth").await;
    assert_eq!(count(&backend.hits.downloads), 1);
}

#[tokio::test]
async fn test_successful_download_opens_link_and_refreshes_quota() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);

    let report = h.downloader.download(DownloadEndpoint::Direct, "p-ok").await;

    assert!(report.outcome.is_started());
    assert_eq!(h.opener.opened(), vec!["https://files.example.com/p-ok.zip"]);
    assert_eq!(count(&backend.hits.stats), 1);
    let quota = report.quota.expect("quota refreshed");
    assert_eq!(quota.daily.used, 1);
    assert_eq!(quota.daily.remaining, 14);

    let notice = report.outcome.notice().unwrap();
    assert_eq!(notice.level, Level::Success);
    assert_eq!(notice.text, "Download started");
}

#[tokio::test]
async fn test_chatbot_endpoint_is_used_for_widget_downloads() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Home);
    sign_in(&h.storage);

    let report = h.downloader.download(DownloadEndpoint::Chatbot, "p-again").await;
    match report.outcome {
        DownloadOutcome::Started(grant) => assert!(grant.is_redownload),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_busy_product_is_not_requested_twice() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);
    let other = h.downloader.clone();

    let (first, second) = tokio::join!(
        h.downloader.download(DownloadEndpoint::Direct, "p-slow"),
        other.download(DownloadEndpoint::Direct, "p-slow"),
    );

    assert!(first.outcome.is_started());
    assert_eq!(second.outcome, DownloadOutcome::Busy);
    assert!(second.outcome.notice().is_none());
    assert_eq!(count(&backend.hits.downloads), 1);
    assert!(!h.downloader.busy().is_busy("p-slow"));
}

#[tokio::test]
async fn test_different_products_download_concurrently() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);

    let (slow, fast) = tokio::join!(
        h.downloader.download(DownloadEndpoint::Direct, "p-slow"),
        h.downloader.download(DownloadEndpoint::Direct, "p-ok"),
    );

    assert!(slow.outcome.is_started());
    assert!(fast.outcome.is_started());
    assert_eq!(count(&backend.hits.downloads), 2);
}

#[tokio::test]
async fn test_quota_rejections_name_the_period() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);

    let daily = h.downloader.download(DownloadEndpoint::Direct, "p-daily").await;
    assert_eq!(
        daily.outcome.notice().unwrap().text,
        "📅 Daily limit reached! Used 15/15. Try tomorrow!"
    );

    let monthly = h.downloader.download(DownloadEndpoint::Direct, "p-monthly").await;
    assert_eq!(
        monthly.outcome.notice().unwrap().text,
        "📊 Monthly limit reached! Used 350/350."
    );

    let bare = h.downloader.download(DownloadEndpoint::Direct, "p-nolimits").await;
    assert_eq!(bare.outcome.notice().unwrap().text, LIMIT_REACHED);

    // rejected attempts neither open anything nor refresh the quota
    assert!(h.opener.opened().is_empty());
    assert_eq!(count(&backend.hits.stats), 0);
}

#[tokio::test]
async fn test_not_found_and_server_failures() {
    let backend = spawn_backend().await;
    let h = harness(&backend, View::Products);
    sign_in(&h.storage);

    let gone = h.downloader.download(DownloadEndpoint::Direct, "p-gone").await;
    assert_eq!(gone.outcome, DownloadOutcome::NotFound);
    assert_eq!(gone.outcome.notice().unwrap().text, PRODUCT_NOT_FOUND);

    let boom = h.downloader.download(DownloadEndpoint::Direct, "p-boom").await;
    assert_eq!(
        boom.outcome,
        DownloadOutcome::Failed {
            message: Some("Storage offline".into())
        }
    );
    assert_eq!(boom.outcome.notice().unwrap().text, DOWNLOAD_FAILED);

    // a failed attempt leaves the session alone
    assert!(h.client.is_authenticated());
    assert_eq!(h.navigator.current(), View::Products);
}
