//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - An entry in a business's ordered link list
//! - [`Business`] - A public profile that owns links
//!
//! Creation inputs use separate structs (`NewLink`, `NewBusiness`). Rank
//! reconciliation travels as a [`RankBatch`].

pub mod business;
pub mod link;

pub use business::{Business, DEFAULT_THEME_COLOR, NewBusiness};
pub use link::{Link, NewLink, RankAssignment, RankBatch, RankWrite};
