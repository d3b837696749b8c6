//! Endpoint bindings, one file per backend resource. Each returns
//! `Ok(None)` when the backend answered without `success: true`.

mod auth;
mod categories;
mod chatbot;
mod downloads;
mod products;

use serde::Deserialize;

/// Body of mutations that only report back a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}
