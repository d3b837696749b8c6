use serde::{Deserialize, Serialize};

use super::{Product, QuotaLimits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Body of `POST /chatbot/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
}

/// A pre-labelled button that sends a canned request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub text: String,
    pub action: String,
}

impl QuickAction {
    pub fn new(text: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: action.into(),
        }
    }
}

/// What a `downloadSuccess` answer says was started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadData {
    pub product_title: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub limits: Option<QuotaLimits>,
}

/// The `response` object of a chat answer. The widget only switches on
/// these flags; it never interprets `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotReply {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub show_stats: bool,
    #[serde(default)]
    pub download_success: bool,
    #[serde(default)]
    pub download_data: Option<DownloadData>,
    #[serde(default)]
    pub limit_reached: bool,
    #[serde(default)]
    pub requires_login: bool,
    #[serde(default)]
    pub no_results: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
}
