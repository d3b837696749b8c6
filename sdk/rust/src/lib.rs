//! # Xeriwo SDK
//!
//! Typed client for the Xeriwo marketplace backend: products, categories,
//! quota-gated downloads, the assistant chat endpoint and auth.
//!
//! Every response carries a `success` envelope. Calls return
//! `Result<Option<T>>`: `Err` for transport and HTTP failures, `Ok(None)`
//! when the backend answered but reported no data.
//!
//! ```no_run
//! use std::sync::Arc;
//! use xeriwo_sdk::{Client, ClientConfig, MemoryStorage, Navigator, ProductQuery};
//!
//! # async fn run() -> xeriwo_sdk::Result<()> {
//! let client = Client::new(
//!     ClientConfig::new("http://localhost:5000/api"),
//!     Arc::new(MemoryStorage::new()),
//!     Navigator::default(),
//! )?;
//! if let Some(page) = client.list_products(&ProductQuery::default()).await? {
//!     println!("{} products", page.products.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod navigation;
pub mod storage;

pub use api::Ack;
pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorCode, Result, XeriwoError};
pub use models::*;
pub use navigation::{Navigator, View};
pub use storage::{FileStorage, MemoryStorage, StorageAdapter};
