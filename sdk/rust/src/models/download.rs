use serde::{Deserialize, Serialize};

use super::QuotaLimits;

/// Successful answer from `POST /download/{id}` or `POST /chatbot/download/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadGrant {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub is_redownload: bool,
    #[serde(default)]
    pub limits: Option<QuotaLimits>,
}

/// Which download endpoint a surface talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEndpoint {
    /// `POST /download/{id}`, used by the home and products views
    Direct,
    /// `POST /chatbot/download/{id}`, used by the assistant widget
    Chatbot,
}

impl DownloadEndpoint {
    pub fn path(&self, product_id: &str) -> String {
        match self {
            DownloadEndpoint::Direct => format!("/download/{}", product_id),
            DownloadEndpoint::Chatbot => format!("/chatbot/download/{}", product_id),
        }
    }
}
