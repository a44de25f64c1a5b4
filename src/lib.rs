//! # LocalLinks
//!
//! A link-in-bio service for local businesses built with Axum and PostgreSQL.
//!
//! A business signs up with a slug, gets a public page at `<base>/<slug>`
//! listing its links in an owner-defined order, and manages that order from a
//! dashboard with drag-and-drop.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the link board, settings form, repository traits
//! - **Application Layer** ([`application`]) - Link ordering engine, profiles, authentication
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, in-memory store, Redis cache
//! - **API Layer** ([`api`]) - JSON handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Server-rendered public profile page
//!
//! ## Link ordering
//!
//! Reorders, appends and removes apply to the in-memory board at once and are
//! persisted afterwards. Every reorder issues a rank batch with a
//! per-business version; the store ignores a batch older than the last one it
//! applied, so responses arriving out of order still leave the latest order
//! persisted.
//!
//! ## Quick Start
//!
//! ```bash
//! export TOKEN_SIGNING_SECRET="change-me"
//! export STORAGE=memory          # or DATABASE_URL=postgres://...
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, BoardService, BoardSnapshot, ProfileService, PublicProfile,
    };
    pub use crate::domain::entities::{Business, Link, NewLink, RankBatch, RankWrite};
    pub use crate::domain::session::SessionContext;
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::MemoryStore;
    pub use crate::state::AppState;
}
