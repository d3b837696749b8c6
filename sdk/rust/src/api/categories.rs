use serde::Deserialize;

use crate::client::{Auth, Client};
use crate::error::Result;
use crate::models::{Category, CategoryForm, CategoryListing};

use super::Ack;

#[derive(Deserialize)]
struct CategoryList {
    #[serde(default)]
    categories: Vec<Category>,
}

impl Client {
    /// `GET /categories/admin`
    pub async fn admin_categories(&self) -> Result<Option<CategoryListing>> {
        self.get("/categories/admin", Auth::Admin, &[]).await
    }

    /// `GET /categories/parents`
    pub async fn parent_categories(&self) -> Result<Option<Vec<Category>>> {
        let list: Option<CategoryList> = self.get("/categories/parents", Auth::Admin, &[]).await?;
        Ok(list.map(|l| l.categories))
    }

    /// `POST /categories`
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Option<Ack>> {
        self.post("/categories", Auth::Admin, form).await
    }

    /// `PUT /categories/{id}`
    pub async fn update_category(&self, id: &str, form: &CategoryForm) -> Result<Option<Ack>> {
        self.put(&format!("/categories/{}", id), Auth::Admin, form).await
    }

    /// `DELETE /categories/{id}`
    pub async fn delete_category(&self, id: &str) -> Result<Option<Ack>> {
        self.delete(&format!("/categories/{}", id), Auth::Admin).await
    }
}
