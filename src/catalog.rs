//! Products listing: server-side filters and paging, client-side search over
//! the fetched page, URL-state sync, wishlist, and downloads.

use std::collections::BTreeSet;
use std::str::FromStr;

use strum::{Display, EnumString};
use xeriwo_sdk::{Client, DownloadEndpoint, Pagination, Product, ProductQuery};

use crate::downloads::{DownloadReport, Downloader, bump_download_count};
use crate::notify::{Notice, Notices};

pub const PAGE_SIZE: u32 = 24;
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Latest,
    Popular,
    Downloads,
    Rating,
    NameAsc,
    NameDesc,
}

impl SortBy {
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Latest => "Latest First",
            SortBy::Popular => "Most Popular",
            SortBy::Downloads => "Most Downloaded",
            SortBy::Rating => "Highest Rated",
            SortBy::NameAsc => "Name A-Z",
            SortBy::NameDesc => "Name Z-A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PriceRange {
    #[default]
    All,
    Free,
    Premium,
}

/// Top-level catalog sections offered as category filters.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("all", "All Categories"),
    ("wordpress-themes", "WordPress Themes"),
    ("wordpress-plugins", "WordPress Plugins"),
    ("html-templates", "HTML Templates"),
    ("graphics-design", "Graphics & Design"),
    ("video-audio", "Video & Audio"),
];

/// Display name of a category slug; unknown slugs are shown as they are.
pub fn category_label(slug: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
        .unwrap_or(slug)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilters {
    pub search: String,
    pub category: String,
    pub product_type: String,
    pub sort: SortBy,
    pub price: PriceRange,
    pub page: u32,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            product_type: ALL.to_string(),
            sort: SortBy::default(),
            price: PriceRange::default(),
            page: 1,
        }
    }
}

fn unless_all(value: &str) -> Option<String> {
    (value != ALL && !value.is_empty()).then(|| value.to_string())
}

impl CatalogFilters {
    /// One-line heading for the current filter state, e.g.
    /// `WordPress Themes · Most Popular`.
    pub fn summary(&self) -> String {
        let mut parts = vec![category_label(&self.category).to_string()];
        if self.price != PriceRange::All {
            parts.push(self.price.to_string());
        }
        parts.push(self.sort.label().to_string());
        if !self.search.trim().is_empty() {
            parts.push(format!("\"{}\"", self.search.trim()));
        }
        parts.join(" · ")
    }

    /// Server-side part of the filters. `search` stays client-side.
    pub fn to_product_query(&self) -> ProductQuery {
        ProductQuery {
            page: self.page.max(1),
            limit: PAGE_SIZE,
            sort: self.sort.to_string(),
            category: unless_all(&self.category),
            product_type: unless_all(&self.product_type),
            price: (self.price != PriceRange::All).then(|| self.price.to_string()),
        }
    }

    /// Shareable query string; defaults are left out.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(category) = unless_all(&self.category) {
            pairs.push(("category", category));
        }
        if let Some(product_type) = unless_all(&self.product_type) {
            pairs.push(("type", product_type));
        }
        if self.sort != SortBy::Latest {
            pairs.push(("sort", self.sort.to_string()));
        }
        if self.price != PriceRange::All {
            pairs.push(("price", self.price.to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Inverse of `to_query_string`. Unknown keys and unparsable values
    /// keep their defaults.
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, raw)) = pair.split_once('=') else {
                continue;
            };
            let plus_decoded = raw.replace('+', " ");
            let value = match urlencoding::decode(&plus_decoded) {
                Ok(v) => v.into_owned(),
                Err(_) => continue,
            };
            match key {
                "search" => filters.search = value,
                "category" => filters.category = value,
                "type" => filters.product_type = value,
                "sort" => {
                    if let Ok(sort) = SortBy::from_str(&value) {
                        filters.sort = sort;
                    }
                }
                "price" => {
                    if let Ok(price) = PriceRange::from_str(&value) {
                        filters.price = price;
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<u32>() {
                        filters.page = page.max(1);
                    }
                }
                _ => {}
            }
        }
        filters
    }
}

/// One slot in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// First, last and current±2 are shown; current±3 collapse into a gap.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    let current = current as i64;
    let total_i = total as i64;
    (1..=total_i)
        .filter_map(|page| {
            if page == 1 || page == total_i || (page >= current - 2 && page <= current + 2) {
                Some(PageItem::Page(page as u32))
            } else if page == current - 3 || page == current + 3 {
                Some(PageItem::Gap)
            } else {
                None
            }
        })
        .collect()
}

pub struct Catalog {
    client: Client,
    downloader: Downloader,
    pub filters: CatalogFilters,
    products: Vec<Product>,
    pagination: Pagination,
    wishlist: BTreeSet<String>,
    notices: Notices,
}

impl Catalog {
    pub fn new(client: Client, downloader: Downloader) -> Self {
        Self {
            client,
            downloader,
            filters: CatalogFilters::default(),
            products: Vec::new(),
            pagination: Pagination::default(),
            wishlist: BTreeSet::new(),
            notices: Notices::default(),
        }
    }

    pub fn with_filters(mut self, filters: CatalogFilters) -> Self {
        self.filters = filters;
        self
    }

    pub async fn load(&mut self) {
        let query = self.filters.to_product_query();
        match self.client.list_products(&query).await {
            Ok(Some(page)) => {
                tracing::debug!(count = page.products.len(), page = query.page, "catalog page loaded");
                self.products = page.products;
                self.pagination = page.pagination;
            }
            Ok(None) => {
                self.products.clear();
                self.pagination = Pagination::default();
            }
            Err(e) => {
                tracing::error!("Error loading products: {}", e);
                self.notices.push(Notice::error("Failed to load products"));
                self.products.clear();
                self.pagination = Pagination::default();
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// What the grid shows: the fetched page narrowed by the search box.
    pub fn visible(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches(&self.filters.search))
            .collect()
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages.max(1)
    }

    pub fn page_window(&self) -> Vec<PageItem> {
        page_window(self.filters.page, self.total_pages())
    }

    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page.clamp(1, self.total_pages());
    }

    pub fn reset_filters(&mut self) {
        self.filters = CatalogFilters::default();
    }

    /// Returns whether the product is now on the wishlist.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> bool {
        if self.wishlist.remove(product_id) {
            self.notices.push(Notice::info("Removed from wishlist"));
            false
        } else {
            self.wishlist.insert(product_id.to_string());
            self.notices.push(Notice::success("Added to wishlist"));
            true
        }
    }

    pub fn in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
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
            bump_download_count(&mut self.products, product_id);
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
