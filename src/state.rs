//! Shared application state handed to every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, BoardService, ProfileService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub board_service: Arc<BoardService>,
    pub profile_service: Arc<ProfileService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Queues a click for the background worker.
    ///
    /// Never waits: when the queue is full or closed the click is dropped and
    /// `false` is returned.
    pub fn track_click(&self, link_id: i64) -> bool {
        match self.click_sender.try_send(ClickEvent::new(link_id)) {
            Ok(()) => true,
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::warn!(link_id, error = %e, "Click dropped");
                false
            }
        }
    }
}
