//! Utility functions shared across layers.
//!
//! - [`slug`] - Slug normalization and validation
//! - [`link_input`] - Link title and target URL validation
//! - [`token`] - Bearer token generation
//! - [`share`] - Public, share, map and phone links for a profile

pub mod link_input;
pub mod share;
pub mod slug;
pub mod token;
