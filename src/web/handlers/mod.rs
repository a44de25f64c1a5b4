//! Server-rendered page handlers.

pub mod profile;

pub use profile::{go_handler, profile_page_handler};
