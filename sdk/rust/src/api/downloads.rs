use serde::Deserialize;

use crate::client::{Auth, Client};
use crate::error::Result;
use crate::models::{DownloadEndpoint, DownloadGrant, DownloadQuota};

#[derive(Deserialize)]
struct StatsBody {
    #[serde(default)]
    stats: Option<DownloadQuota>,
}

impl Client {
    /// `POST /download/{id}` or `POST /chatbot/download/{id}`. Quota-gated:
    /// a 429 comes back as `ErrorCode::QuotaExceeded` with the limits in
    /// the error payload.
    pub async fn download(
        &self,
        endpoint: DownloadEndpoint,
        product_id: &str,
    ) -> Result<Option<DownloadGrant>> {
        self.post_empty(&endpoint.path(product_id), Auth::User).await
    }

    /// `GET /chatbot/stats`: the authoritative quota record.
    pub async fn download_stats(&self) -> Result<Option<DownloadQuota>> {
        let body: Option<StatsBody> = self.get("/chatbot/stats", Auth::User, &[]).await?;
        Ok(body.and_then(|b| b.stats))
    }
}
