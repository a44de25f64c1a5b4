//! Server-rendered public pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and redirect handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
