//! Authentication and session lifecycle

pub mod case;
pub mod models;
pub mod service;

pub use case::snake_case_keys;
pub use models::{AuthResponse, LoginCredentials, RegisterData, User, UserRole};
pub use service::AuthService;
