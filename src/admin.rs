//! Admin dashboard: product and category management behind the admin token.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use xeriwo_sdk::{
    Category, CategoryForm, Client, ErrorCode, LoginRequest, Product, ProductForm, SiteStats,
    View, XeriwoError,
};

use crate::notify::{Notice, Notices};

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)(\?.*)?$")
        .expect("Invalid image URL regex")
});

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const INVALID_IMAGE_URL: &str = "Please provide a valid image URL (jpg, jpeg, png, gif, webp)";
pub const CATEGORY_NAME_REQUIRED: &str = "Category name is required";
pub const CATEGORY_HAS_PRODUCTS: &str = "Cannot delete a category that still has products";
pub const CATEGORY_HAS_CHILDREN: &str = "Cannot delete a category that has subcategories";

pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url)
}

/// Client-side checks run before a product form is sent.
pub fn validate_product(form: &ProductForm) -> Result<(), XeriwoError> {
    let missing = form.title.trim().is_empty()
        || form.category.is_empty()
        || form.image_url.trim().is_empty()
        || form.preview_url.trim().is_empty()
        || form.download_url.trim().is_empty();
    if missing {
        return Err(XeriwoError::validation(REQUIRED_FIELDS));
    }
    if !is_valid_image_url(&form.image_url) {
        return Err(XeriwoError::validation(INVALID_IMAGE_URL));
    }
    Ok(())
}

pub fn validate_category(form: &CategoryForm) -> Result<(), XeriwoError> {
    if form.name.trim().is_empty() {
        return Err(XeriwoError::validation(CATEGORY_NAME_REQUIRED));
    }
    Ok(())
}

/// One row of the indented category table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub depth: usize,
    pub category: Category,
}

/// Depth-first flattening of the category tree.
pub fn category_rows(tree: &[Category]) -> Vec<CategoryRow> {
    fn walk(nodes: &[Category], depth: usize, rows: &mut Vec<CategoryRow>) {
        for node in nodes {
            rows.push(CategoryRow {
                depth,
                category: Category {
                    children: Vec::new(),
                    ..node.clone()
                },
            });
            walk(&node.children, depth + 1, rows);
        }
    }

    let mut rows = Vec::new();
    walk(tree, 0, &mut rows);
    rows
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_downloads: u64,
    pub total_categories: u64,
}

pub struct AdminDashboard {
    client: Client,
    products: Vec<Product>,
    categories: Vec<Category>,
    flat_categories: Vec<Category>,
    parent_categories: Vec<Category>,
    stats: Option<SiteStats>,
    editing_product: Option<String>,
    editing_category: Option<String>,
    notices: Notices,
}

impl AdminDashboard {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            products: Vec::new(),
            categories: Vec::new(),
            flat_categories: Vec::new(),
            parent_categories: Vec::new(),
            stats: None,
            editing_product: None,
            editing_category: None,
            notices: Notices::default(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn flat_categories(&self) -> &[Category] {
        &self.flat_categories
    }

    pub fn parent_categories(&self) -> &[Category] {
        &self.parent_categories
    }

    /// Categories a product may be filed under.
    pub fn active_categories(&self) -> impl Iterator<Item = &Category> {
        self.flat_categories.iter().filter(|c| c.is_active)
    }

    pub fn category_rows(&self) -> Vec<CategoryRow> {
        category_rows(&self.categories)
    }

    pub fn stats(&self) -> DashboardStats {
        let stats = self.stats.unwrap_or_default();
        DashboardStats {
            total_products: stats.total_products,
            total_downloads: stats.total_downloads,
            total_categories: stats
                .total_categories
                .filter(|n| *n > 0)
                .unwrap_or(self.flat_categories.len() as u64),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            self.notices.push(Notice::error("Please fill in all fields"));
            return false;
        }
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.client.admin_login(&request).await {
            Ok(Some(_)) if self.client.admin_token().is_some() => {
                tracing::info!(email = %request.email, "admin logged in");
                self.notices.push(Notice::success("Admin login successful!"));
                self.client.navigator().navigate(View::Admin);
                true
            }
            Ok(_) => {
                self.notices.push(Notice::error("Invalid admin credentials"));
                false
            }
            Err(e) => {
                self.notices.push(Notice::from_failure(&e, "Invalid admin credentials"));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.client.admin_logout();
        self.notices
            .push(Notice::success("Admin logged out successfully"));
        self.client.navigator().navigate(View::AdminLogin);
    }

    /// Without an admin token the dashboard is not shown at all.
    pub fn ensure_admin(&self) -> bool {
        if self.client.admin_token().is_some() {
            return true;
        }
        self.client.navigator().navigate(View::AdminLogin);
        false
    }

    pub async fn refresh(&mut self) {
        if !self.ensure_admin() {
            return;
        }

        let loaded = tokio::try_join!(
            self.client.admin_products(),
            self.client.admin_categories(),
            self.client.parent_categories(),
            self.client.product_stats(),
        );

        match loaded {
            Ok((products, listing, parents, stats)) => {
                if let Some(products) = products {
                    self.products = products;
                }
                if let Some(listing) = listing {
                    self.categories = listing.categories;
                    self.flat_categories = listing.flat_categories;
                }
                if let Some(parents) = parents {
                    self.parent_categories = parents;
                }
                if stats.is_some() {
                    self.stats = stats;
                }
                tracing::debug!(
                    products = self.products.len(),
                    categories = self.flat_categories.len(),
                    "dashboard loaded"
                );
            }
            Err(e) if e.code == ErrorCode::Unauthorized => {
                tracing::warn!("Admin session rejected: {}", e);
                self.client.admin_logout();
                self.client.navigator().navigate(View::AdminLogin);
            }
            Err(e) => {
                tracing::error!("Dashboard error: {}", e);
                self.notices
                    .push(Notice::error("Failed to load dashboard data"));
                self.products.clear();
                self.categories.clear();
                self.flat_categories.clear();
                self.parent_categories.clear();
                self.stats = None;
            }
        }
    }

    /// Pick a product to edit; the form is pre-filled from it.
    pub fn edit_product(&mut self, product_id: &str) -> Option<ProductForm> {
        let product = self.products.iter().find(|p| p.id == product_id)?;
        self.editing_product = Some(product.id.clone());
        Some(ProductForm::from(product))
    }

    pub fn edit_category(&mut self, category_id: &str) -> Option<CategoryForm> {
        let category = self.flat_categories.iter().find(|c| c.id == category_id)?;
        self.editing_category = Some(category.id.clone());
        Some(CategoryForm::from(category))
    }

    pub fn cancel_edit(&mut self) {
        self.editing_product = None;
        self.editing_category = None;
    }

    pub async fn submit_product(&mut self, form: &ProductForm) -> bool {
        if let Err(e) = validate_product(form) {
            self.notices.push(Notice::for_error(&e));
            return false;
        }

        let editing = self.editing_product.clone();
        let result = match &editing {
            Some(id) => self.client.update_product(id, form).await,
            None => self.client.create_product(form).await,
        };

        match result {
            Ok(Some(_)) => {
                let verb = if editing.is_some() { "updated" } else { "created" };
                self.notices
                    .push(Notice::success(format!("Product {} successfully!", verb)));
                self.editing_product = None;
                self.refresh().await;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Product submit error: {}", e);
                self.notices.push(Notice::from_failure(&e, "Failed to save product"));
                false
            }
        }
    }

    pub async fn delete_product(&mut self, product_id: &str) -> bool {
        match self.client.delete_product(product_id).await {
            Ok(Some(_)) => {
                self.notices
                    .push(Notice::success("Product deleted successfully"));
                self.refresh().await;
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.notices.push(Notice::from_failure(&e, "Failed to delete product"));
                false
            }
        }
    }

    pub async fn submit_category(&mut self, form: &CategoryForm) -> bool {
        if let Err(e) = validate_category(form) {
            self.notices.push(Notice::for_error(&e));
            return false;
        }

        let editing = self.editing_category.clone();
        let result = match &editing {
            Some(id) => self.client.update_category(id, form).await,
            None => self.client.create_category(form).await,
        };

        match result {
            Ok(Some(_)) => {
                let verb = if editing.is_some() { "updated" } else { "created" };
                self.notices
                    .push(Notice::success(format!("Category {} successfully!", verb)));
                self.editing_category = None;
                self.refresh().await;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Category submit error: {}", e);
                self.notices.push(Notice::from_failure(&e, "Failed to save category"));
                false
            }
        }
    }

    /// Why a category may not be deleted yet, if anything stops it.
    pub fn delete_blocker(&self, category_id: &str) -> Option<&'static str> {
        let category = self.flat_categories.iter().find(|c| c.id == category_id)?;
        if category.product_count > 0 {
            return Some(CATEGORY_HAS_PRODUCTS);
        }
        let has_children = !category.children.is_empty()
            || self
                .flat_categories
                .iter()
                .any(|c| c.parent.as_ref().is_some_and(|p| p.id() == category_id));
        has_children.then_some(CATEGORY_HAS_CHILDREN)
    }

    pub async fn delete_category(&mut self, category_id: &str) -> bool {
        if let Some(reason) = self.delete_blocker(category_id) {
            self.notices.push(Notice::error(reason));
            return false;
        }
        match self.client.delete_category(category_id).await {
            Ok(Some(_)) => {
                self.notices
                    .push(Notice::success("Category deleted successfully"));
                self.refresh().await;
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.notices.push(Notice::from_failure(&e, "Failed to delete category"));
                false
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
