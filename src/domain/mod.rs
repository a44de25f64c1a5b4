//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Links, businesses, rank batches
//! - [`repositories`] - Data service contracts
//! - [`board`] - The in-memory ordered link sequence
//! - [`settings`] - Enumerated profile settings form
//! - [`session`] - Session context and view-state machine
//! - [`click_event`] / [`click_worker`] - Asynchronous click counting
//!
//! The domain layer has no dependency on HTTP or on a concrete store.
//!
//! # Reorder Flow
//!
//! 1. A drag gesture arrives as `(source_id, target_id)`
//! 2. [`board::LinkBoard::reorder`] moves the link and renumbers ranks at once
//! 3. The returned [`entities::RankBatch`] is persisted through
//!    [`repositories::LinkRepository::apply_ranks`]
//! 4. Stale batches (older version) are discarded by the store

pub mod board;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod session;
pub mod settings;
