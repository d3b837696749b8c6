//! The download-limit contract: gate on session and busy flag, ask the
//! backend, open the link, refresh the quota. Nothing here retries and
//! nothing is rolled back; counters correct themselves on the next fetch.

mod busy;
mod opener;
mod policy;

pub use busy::{BusyFlags, BusyGuard};
pub use opener::{BrowserOpener, PrintOpener, RecordingOpener, UrlOpener};
pub use policy::*;

use std::sync::Arc;

use xeriwo_sdk::{Client, DownloadEndpoint, DownloadQuota, Product};

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub outcome: DownloadOutcome,
    /// Fresh quota, when the attempt succeeded and the refresh did too
    pub quota: Option<DownloadQuota>,
}

impl DownloadReport {
    fn only(outcome: DownloadOutcome) -> Self {
        Self {
            outcome,
            quota: None,
        }
    }
}

#[derive(Clone)]
pub struct Downloader {
    client: Client,
    busy: BusyFlags,
    opener: Arc<dyn UrlOpener>,
}

impl Downloader {
    pub fn new(client: Client, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            client,
            busy: BusyFlags::new(),
            opener,
        }
    }

    pub fn busy(&self) -> &BusyFlags {
        &self.busy
    }

    pub fn opener(&self) -> &dyn UrlOpener {
        self.opener.as_ref()
    }

    pub async fn download(&self, endpoint: DownloadEndpoint, product_id: &str) -> DownloadReport {
        if self.client.current_user().is_none() {
            tracing::debug!(product_id, "download blocked: no session");
            return DownloadReport::only(DownloadOutcome::LoginRequired);
        }

        let Some(_guard) = self.busy.try_acquire(product_id) else {
            tracing::debug!(product_id, "download already in flight");
            return DownloadReport::only(DownloadOutcome::Busy);
        };

        let outcome = classify(self.client.download(endpoint, product_id).await);
        tracing::info!(product_id, started = outcome.is_started(), "download attempt settled");

        let DownloadOutcome::Started(grant) = &outcome else {
            return DownloadReport::only(outcome);
        };

        if let Some(url) = grant.download_url.as_deref() {
            if let Err(e) = self.opener.open(url) {
                tracing::warn!(product_id, "Failed to open download link: {}", e);
            }
        }

        let quota = self.refresh_quota().await;
        DownloadReport { outcome, quota }
    }

    /// Best-effort re-read of the authoritative quota.
    pub async fn refresh_quota(&self) -> Option<DownloadQuota> {
        match self.client.download_stats().await {
            Ok(quota) => quota,
            Err(e) => {
                tracing::warn!("Quota refresh failed: {}", e);
                None
            }
        }
    }
}

/// Optimistically count one more download on the matching card.
pub fn bump_download_count(products: &mut [Product], product_id: &str) {
    if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
        product.downloads += 1;
    }
}
