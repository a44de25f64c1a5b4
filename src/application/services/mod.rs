//! Business logic services for the application layer.

pub mod auth_service;
pub mod board_service;
pub mod profile_service;

pub use auth_service::AuthService;
pub use board_service::{BoardService, BoardSnapshot};
pub use profile_service::{ProfileService, PublicLink, PublicProfile, SignupInput};
