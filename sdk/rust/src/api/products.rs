use serde::Deserialize;

use crate::client::{Auth, Client};
use crate::error::Result;
use crate::models::{Product, ProductForm, ProductPage, ProductQuery, SiteStats};

use super::Ack;

#[derive(Deserialize)]
struct ProductList {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct StatsBody {
    #[serde(default)]
    stats: Option<SiteStats>,
}

impl Client {
    /// `GET /products`
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Option<ProductPage>> {
        self.get("/products", Auth::User, &query.to_pairs()).await
    }

    /// `GET /products/featured`
    pub async fn featured_products(&self) -> Result<Option<Vec<Product>>> {
        let list: Option<ProductList> = self.get("/products/featured", Auth::User, &[]).await?;
        Ok(list.map(|l| l.products))
    }

    /// `GET /products/stats`. A success envelope without `stats` is still no data.
    pub async fn product_stats(&self) -> Result<Option<SiteStats>> {
        let body: Option<StatsBody> = self.get("/products/stats", Auth::User, &[]).await?;
        Ok(body.and_then(|b| b.stats))
    }

    /// `GET /products/admin`
    pub async fn admin_products(&self) -> Result<Option<Vec<Product>>> {
        let list: Option<ProductList> = self.get("/products/admin", Auth::Admin, &[]).await?;
        Ok(list.map(|l| l.products))
    }

    /// `POST /products`
    pub async fn create_product(&self, form: &ProductForm) -> Result<Option<Ack>> {
        self.post("/products", Auth::Admin, form).await
    }

    /// `PUT /products/{id}`
    pub async fn update_product(&self, id: &str, form: &ProductForm) -> Result<Option<Ack>> {
        self.put(&format!("/products/{}", id), Auth::Admin, form).await
    }

    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, id: &str) -> Result<Option<Ack>> {
        self.delete(&format!("/products/{}", id), Auth::Admin).await
    }
}
