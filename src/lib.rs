//! Xeriwo marketplace client.
//!
//! Each storefront view (landing page, catalog, assistant widget, account
//! forms, admin dashboard) is a state-holding type driven by the `xeriwo`
//! binary. All of them share one [`xeriwo_sdk::Client`] and the download
//! contract in [`downloads`].

pub mod account;
pub mod admin;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod downloads;
pub mod home;
pub mod notify;

pub use xeriwo_sdk as sdk;
