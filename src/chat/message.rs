use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use xeriwo_sdk::{
    BotReply, DownloadData, DownloadQuota, Product, QuickAction, QuotaLimits, QuotaPeriod,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Structured block rendered under a bot message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Card {
    Stats(DownloadQuota),
    DownloadSuccess {
        product_title: String,
        download_url: Option<String>,
        limits: Option<QuotaLimits>,
    },
    LimitReached {
        limits: Option<QuotaLimits>,
    },
    LoginRequired,
    NoResults,
}

fn period_line(f: &mut fmt::Formatter<'_>, label: &str, period: &QuotaPeriod) -> fmt::Result {
    writeln!(
        f,
        "  {:<8} {:>4}/{:<4} used, {} left ({}%)",
        label,
        period.used,
        period.limit,
        period.remaining,
        period.percent_used()
    )
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Stats(quota) => {
                period_line(f, "Daily", &quota.daily)?;
                period_line(f, "Monthly", &quota.monthly)?;
                writeln!(f, "  Total downloads: {}", quota.total)?;
                write!(f, "  Plan: {}", quota.subscription.label())
            }
            Card::DownloadSuccess {
                product_title,
                download_url,
                limits,
            } => {
                writeln!(f, "  ✅ {}", product_title)?;
                if let Some(url) = download_url {
                    writeln!(f, "  {}", url)?;
                }
                if let Some(limits) = limits {
                    write!(
                        f,
                        "  {} downloads left today, {} this month",
                        limits.daily.remaining, limits.monthly.remaining
                    )?;
                }
                Ok(())
            }
            Card::LimitReached { limits } => match limits {
                Some(limits) => {
                    period_line(f, "Daily", &limits.daily)?;
                    period_line(f, "Monthly", &limits.monthly)
                }
                None => write!(f, "  No downloads left for now"),
            },
            Card::LoginRequired => write!(f, "  Login required"),
            Card::NoResults => write!(f, "  No matching products"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub products: Vec<Product>,
    pub suggestions: Vec<String>,
    pub quick_actions: Vec<QuickAction>,
    pub cards: Vec<Card>,
    pub is_error: bool,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            products: Vec::new(),
            suggestions: Vec::new(),
            quick_actions: Vec::new(),
            cards: Vec::new(),
            is_error: false,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::bot(text)
        }
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = QuickAction>) -> Self {
        self.quick_actions.extend(actions);
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    /// A backend answer. Every flag set on it adds its own card, in display
    /// order; the stats card needs a cached quota to show anything.
    pub fn from_reply(reply: BotReply, stats: Option<DownloadQuota>) -> Self {
        let mut cards = Vec::new();
        if reply.download_success {
            let data = reply.download_data.unwrap_or_else(|| DownloadData {
                product_title: reply
                    .products
                    .first()
                    .map(|p| p.title.clone())
                    .unwrap_or_default(),
                download_url: None,
                limits: None,
            });
            cards.push(Card::DownloadSuccess {
                product_title: data.product_title,
                download_url: data.download_url,
                limits: data.limits,
            });
        }
        if reply.limit_reached {
            cards.push(Card::LimitReached { limits: None });
        }
        if reply.show_stats {
            if let Some(quota) = stats {
                cards.push(Card::Stats(quota));
            }
        }
        if reply.requires_login {
            cards.push(Card::LoginRequired);
        }
        if reply.no_results {
            cards.push(Card::NoResults);
        }

        Self {
            products: reply.products,
            suggestions: reply.suggestions,
            quick_actions: reply.quick_actions,
            cards,
            ..Self::bot(reply.text)
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
