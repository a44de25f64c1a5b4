//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::board_service::BoardService`] - Link ordering engine (reorder, append, remove)
//! - [`services::profile_service::ProfileService`] - Signup, public profiles, settings
//! - [`services::auth_service::AuthService`] - Bearer token authentication
pub mod services;
