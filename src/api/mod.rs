//! HTTP client wrapper and API facade

mod client;

pub use client::ApiClient;
