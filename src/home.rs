//! Landing view: featured products, headline numbers, quick search.

use serde::Serialize;
use xeriwo_sdk::{Client, DownloadEndpoint, Product, ProductQuery, SiteStats, View};

use crate::downloads::{DownloadReport, Downloader, bump_download_count};
use crate::notify::{Notice, Notices};

pub const FEATURED_COUNT: usize = 6;

/// Headline numbers on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HomeStats {
    pub total_products: u64,
    pub total_downloads: u64,
    pub total_users: u64,
    pub avg_rating: f32,
}

impl Default for HomeStats {
    fn default() -> Self {
        Self {
            total_products: 500,
            total_downloads: 25_000,
            total_users: 18_500,
            avg_rating: 4.9,
        }
    }
}

impl From<SiteStats> for HomeStats {
    /// Zero counts fall back to the marketing defaults; users and rating
    /// are not reported by the backend.
    fn from(stats: SiteStats) -> Self {
        let fallback = Self::default();
        Self {
            total_products: match stats.total_products {
                0 => fallback.total_products,
                n => n,
            },
            total_downloads: match stats.total_downloads {
                0 => fallback.total_downloads,
                n => n,
            },
            ..fallback
        }
    }
}

/// Products-view query for a quick search. `None` for blank input.
pub fn quick_search(term: &str) -> Option<String> {
    if term.trim().is_empty() {
        return None;
    }
    Some(format!(
        "{}?search={}",
        View::Products.path(),
        urlencoding::encode(term)
    ))
}

pub struct Home {
    client: Client,
    downloader: Downloader,
    featured: Vec<Product>,
    stats: HomeStats,
    notices: Notices,
}

impl Home {
    pub fn new(client: Client, downloader: Downloader) -> Self {
        Self {
            client,
            downloader,
            featured: Vec::new(),
            stats: HomeStats::default(),
            notices: Notices::default(),
        }
    }

    pub fn featured(&self) -> &[Product] {
        &self.featured
    }

    pub fn stats(&self) -> HomeStats {
        self.stats
    }

    pub async fn load(&mut self) {
        self.featured = self.load_featured().await;
        self.stats = match self.client.product_stats().await {
            Ok(Some(stats)) => stats.into(),
            Ok(None) => HomeStats::default(),
            Err(e) => {
                tracing::debug!("Stats endpoint failed, using defaults: {}", e);
                HomeStats::default()
            }
        };
    }

    async fn load_featured(&self) -> Vec<Product> {
        match self.client.featured_products().await {
            Ok(Some(products)) if !products.is_empty() => return products,
            Ok(_) => {}
            Err(e) => tracing::debug!("Featured endpoint failed, trying general products: {}", e),
        }

        let query = ProductQuery::with_limit(FEATURED_COUNT as u32);
        match self.client.list_products(&query).await {
            Ok(Some(page)) => page.products.into_iter().take(FEATURED_COUNT).collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::debug!("Products endpoint also failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn is_downloading(&self, product_id: &str) -> bool {
        self.downloader.busy().is_busy(product_id)
    }

    pub async fn download(&mut self, product_id: &str) -> DownloadReport {
        let report = self
            .downloader
            .download(DownloadEndpoint::Direct, product_id)
            .await;
        if report.outcome.is_started() {
            bump_download_count(&mut self.featured, product_id);
        }
        if let Some(notice) = report.outcome.notice() {
            self.notices.push(notice);
        }
        report
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
