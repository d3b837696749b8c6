use serde::{Deserialize, Serialize};

/// A category's parent, sent either populated or as a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
}

impl ParentRef {
    pub fn id(&self) -> &str {
        match self {
            ParentRef::Populated { id, .. } => id,
            ParentRef::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    /// Products filed under this category
    #[serde(default)]
    pub product_count: u64,
    #[serde(default)]
    pub children: Vec<Category>,
}

fn active_by_default() -> bool {
    true
}

/// Body for `POST /categories` and `PUT /categories/{id}`.
/// An empty parent goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    pub parent: Option<String>,
    pub is_active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            is_active: true,
        }
    }
}

impl CategoryForm {
    pub fn new(name: impl Into<String>, parent: Option<&str>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::trim).filter(|p| !p.is_empty()).map(String::from),
            is_active,
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            parent: category.parent.as_ref().map(|p| p.id().to_string()),
            is_active: category.is_active,
        }
    }
}

/// `GET /categories/admin` returns both the tree and a flat list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub flat_categories: Vec<Category>,
}
