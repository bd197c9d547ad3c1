//! Crowdax client - talk to the Crowdax crowdfunding platform API
//!
//! This is the library interface for the Crowdax client, allowing
//! programmatic access to the backend: configuration resolution, the
//! persisted session, the authenticated HTTP facade, and the auth
//! lifecycle.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use auth::AuthService;
pub use config::Config;
pub use error::Error;
pub use session::SessionStore;
