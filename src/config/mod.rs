//! Configuration management for the Crowdax client

pub mod loader;
mod schema;

pub use loader::{load_config, load_config_from_path, resolve};
pub use schema::*;
