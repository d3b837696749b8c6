//! The assistant widget: conversation history, typing and unread state,
//! cached quota, and in-chat downloads through the chatbot endpoint.

mod actions;
mod message;

pub use actions::{ActionKind, Resolved, resolve};
pub use message::{Card, ChatMessage, Sender};

use xeriwo_sdk::{
    BotReply, ChatContext, ChatRequest, Client, DownloadEndpoint, DownloadQuota, ErrorCode,
    Product, QuickAction, QuotaLimits, Result, User,
};

use crate::downloads::{DownloadOutcome, Downloader, QuotaExhaustion, limit_message};
use crate::notify::{Notice, Notices};

pub const TECHNICAL_DIFFICULTIES: &str =
    "😅 Sorry, I'm having technical difficulties. Please try again in a moment!";
pub const STATS_UNAVAILABLE: &str =
    "❌ Unable to load your statistics right now. Please try again later.";
pub const STATS_LOGIN_PROMPT: &str = "🔐 Please login to view your download statistics.\n\n\
**Why login?**\n• Track your downloads (15/day limit)\n• Access premium features\n\
• Personalized recommendations\n• Download history";
pub const DOWNLOAD_LOGIN_PROMPT: &str = "🔐 **Please login to download products!**\n\n\
Registration is completely free and includes:\n\n• **15 downloads per day**\n\
• **350 downloads per month**\n• Access to premium themes & plugins\n\
• Download history tracking\n• Priority support\n\n\
Upgrade to Premium for **500 downloads/month**!";

fn welcome(user: Option<&User>) -> ChatMessage {
    match user {
        Some(user) => ChatMessage::bot(format!(
            "👋 Welcome back, {}! I'm your WordPress assistant. I can help you find amazing themes and plugins!",
            user.name
        ))
        .with_actions([ActionKind::ShowStats.button("📊 My Stats")]),
        None => ChatMessage::bot(
            "👋 Hi! I'm your WordPress assistant. I can help you discover amazing themes and plugins! \
Login to download (15/day, 350/month free!).",
        ),
    }
}

/// Names the spent period (daily first) when the limits show one, else
/// repeats the backend's own explanation.
fn limit_text(message: Option<&str>, limits: Option<&QuotaLimits>) -> String {
    let headline = match (limits, message) {
        (Some(l), Some(m)) if QuotaExhaustion::from_limits(l).is_none() => m.to_string(),
        (None, Some(m)) => m.to_string(),
        _ => limit_message(limits),
    };
    let mut text = format!("🚫 **Download Limit Reached!**\n\n{}", headline);
    if let Some(limits) = limits {
        text.push_str(&format!(
            "\n\n📊 **Current Usage:**\n• Daily: {}/{} downloads\n• Monthly: {}/{} downloads",
            limits.daily.used, limits.daily.limit, limits.monthly.used, limits.monthly.limit
        ));
    }
    text.push_str(
        "\n\n💡 **Tip:** Limits reset automatically every 24 hours (daily) and monthly.",
    );
    text
}

pub struct ChatWidget {
    client: Client,
    downloader: Downloader,
    open: bool,
    typing: bool,
    messages: Vec<ChatMessage>,
    unread: u32,
    quota: Option<DownloadQuota>,
    notices: Notices,
}

impl ChatWidget {
    pub fn new(client: Client, downloader: Downloader) -> Self {
        Self {
            client,
            downloader,
            open: false,
            typing: false,
            messages: Vec::new(),
            unread: 0,
            quota: None,
            notices: Notices::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn unread(&self) -> u32 {
        self.unread
    }

    pub fn quota(&self) -> Option<&DownloadQuota> {
        self.quota.as_ref()
    }

    /// Most recent product card with this id anywhere in the conversation.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.messages
            .iter()
            .rev()
            .flat_map(|m| m.products.iter())
            .find(|p| p.id == product_id)
    }

    fn user(&self) -> Option<User> {
        self.client.current_user()
    }

    pub async fn open(&mut self) {
        self.open = true;
        self.unread = 0;
        let user = self.user();
        if self.messages.is_empty() {
            self.messages.push(welcome(user.as_ref()));
        }
        if user.is_some() {
            self.fetch_stats().await;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Unread badge text, if there is anything unread.
    pub fn badge(&self) -> Option<String> {
        match self.unread {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }

    pub fn header_subtitle(&self) -> String {
        match (self.user(), &self.quota) {
            (Some(_), Some(quota)) => format!(
                "{}/{} downloads left today",
                quota.daily.remaining, quota.daily.limit
            ),
            _ => "Login for downloads".to_string(),
        }
    }

    /// Whether product cards offer a download button right now.
    pub fn download_enabled(&self) -> bool {
        if self.user().is_none() {
            return true;
        }
        self.quota.is_none_or(|q| q.daily.remaining > 0)
    }

    /// Append the user's message and build the request. `None` for blank input.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.typing = true;

        let user = self.user();
        Some(ChatRequest {
            message: text.to_string(),
            context: ChatContext {
                is_logged_in: user.is_some(),
                user_id: user.as_ref().map(|u| u.id.clone()),
                user_email: user.map(|u| u.email),
            },
        })
    }

    pub fn finish_send(&mut self, result: Result<Option<BotReply>>) {
        match result {
            Ok(Some(reply)) => {
                self.messages.push(ChatMessage::from_reply(reply, self.quota));
                if !self.open {
                    self.unread += 1;
                }
            }
            Ok(None) => tracing::debug!("chat reply without success flag"),
            Err(e) => {
                tracing::error!("Chat error: {}", e);
                self.messages.push(ChatMessage::error(TECHNICAL_DIFFICULTIES).with_actions([
                    ActionKind::Help.button("🔄 Try Again"),
                    ActionKind::ShowThemes.button("🎨 Browse Themes"),
                ]));
                self.notices.push(Notice::error("Chat temporarily unavailable"));
            }
        }
        self.typing = false;
    }

    pub async fn send(&mut self, text: &str) {
        let Some(request) = self.begin_send(text) else {
            return;
        };
        let result = self.client.chat(&request).await;
        self.finish_send(result);
    }

    pub async fn quick_action(&mut self, action: &str) {
        match resolve(action) {
            Resolved::Send(prompt) => self.send(&prompt).await,
            Resolved::ShowStats => self.show_stats().await,
            Resolved::Navigate(view) => self.client.navigator().navigate(view),
        }
    }

    /// Re-read the quota. Failures leave the cached value alone.
    pub async fn fetch_stats(&mut self) -> Option<DownloadQuota> {
        self.user()?;
        match self.client.download_stats().await {
            Ok(Some(quota)) => {
                self.quota = Some(quota);
                Some(quota)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Error fetching stats: {}", e);
                let text = if e.code == ErrorCode::Unauthorized {
                    "Please login again to view your stats"
                } else {
                    "Failed to load download statistics"
                };
                self.notices.push(Notice::error(text));
                None
            }
        }
    }

    pub async fn show_stats(&mut self) {
        if self.user().is_none() {
            self.messages
                .push(ChatMessage::bot(STATS_LOGIN_PROMPT).with_card(Card::LoginRequired));
            return;
        }

        let message = match self.fetch_stats().await {
            Some(quota) => ChatMessage::bot("📊 Here are your current download statistics:")
                .with_card(Card::Stats(quota)),
            None => ChatMessage::error(STATS_UNAVAILABLE),
        };
        self.messages.push(message);
    }

    pub async fn download(&mut self, product: &Product) {
        let report = self
            .downloader
            .download(DownloadEndpoint::Chatbot, &product.id)
            .await;

        match &report.outcome {
            DownloadOutcome::Started(grant) => {
                self.messages.push(ChatMessage::bot(&grant.message).with_card(
                    Card::DownloadSuccess {
                        product_title: product.title.clone(),
                        download_url: grant.download_url.clone(),
                        limits: grant.limits,
                    },
                ));
                if let Some(quota) = report.quota {
                    self.quota = Some(quota);
                }
                self.notices
                    .push(Notice::success(format!("🎉 {} download started!", product.title)));
            }
            DownloadOutcome::LoginRequired => {
                self.messages.push(
                    ChatMessage::bot(DOWNLOAD_LOGIN_PROMPT)
                        .with_card(Card::LoginRequired)
                        .with_actions([
                            ActionKind::Login.button("🔑 Go to Login"),
                            ActionKind::Register.button("📝 Register Free"),
                        ]),
                );
                self.notices
                    .push(Notice::warning("Please login to download products"));
            }
            DownloadOutcome::QuotaExceeded { limits, message } => {
                let text = limit_text(message.as_deref(), limits.as_ref());
                self.messages.push(
                    ChatMessage::bot(text)
                        .with_card(Card::LimitReached { limits: *limits })
                        .with_actions([
                            ActionKind::ShowStats.button("📊 Check My Stats"),
                            ActionKind::ShowFeatured.button("⭐ Browse Featured"),
                        ]),
                );
                self.notices.push(Notice::error(limit_message(limits.as_ref())));
            }
            DownloadOutcome::NotFound => {
                let similar = if product.category.to_lowercase().contains("theme") {
                    ActionKind::ShowThemes
                } else {
                    ActionKind::ShowPlugins
                };
                self.messages.push(
                    ChatMessage::error(format!(
                        "❌ Sorry, \"{}\" was not found or is no longer available for download. \
It may have been removed or temporarily disabled.",
                        product.title
                    ))
                    .with_actions([
                        similar.button("🔄 Browse Similar"),
                        ActionKind::ShowFeatured.button("⭐ Show Featured"),
                    ]),
                );
                self.notices.push(Notice::error("Product not found"));
            }
            DownloadOutcome::Unverified | DownloadOutcome::Failed { .. } => {
                let detail = match &report.outcome {
                    DownloadOutcome::Failed {
                        message: Some(message),
                    } => message.clone(),
                    DownloadOutcome::Unverified => {
                        "Please verify your email to download products.".to_string()
                    }
                    _ => "Please try again later.".to_string(),
                };
                self.messages.push(
                    ChatMessage::error(format!(
                        "❌ Sorry, couldn't download \"{}\". {}\n\nIf this problem persists, please contact support.",
                        product.title, detail
                    ))
                    .with_actions([
                        ActionKind::Help.button("🔄 Try Again"),
                        QuickAction::new("📧 Contact Support", "support"),
                    ]),
                );
                let toast = match &report.outcome {
                    DownloadOutcome::Failed {
                        message: Some(message),
                    } => message.clone(),
                    _ => "Download failed".to_string(),
                };
                self.notices.push(Notice::error(toast));
            }
            DownloadOutcome::Declined | DownloadOutcome::Busy => {}
        }
    }

    pub fn preview(&mut self, product: &Product) {
        let opened = product.preview_url.as_deref().is_some_and(|url| {
            match self.downloader.opener().open(url) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to open preview: {}", e);
                    false
                }
            }
        });

        if opened {
            self.messages.push(ChatMessage::bot(format!(
                "🔍 Opening live preview for \"{}\" in a new tab! Take your time to explore all the features.",
                product.title
            )));
            self.notices.push(Notice::info("Preview opened in new tab"));
        } else {
            self.messages.push(ChatMessage::bot(format!(
                "😔 Sorry, live preview is not available for \"{}\" at the moment. You can still download it to see all its features!",
                product.title
            )));
            self.notices
                .push(Notice::info("Preview not available for this product"));
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
