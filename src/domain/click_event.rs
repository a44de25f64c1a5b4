//! Click event model for asynchronous click tracking.

/// A click on a public profile link, queued for the background worker.
///
/// Handlers push events with `try_send` and never wait for the counter to be
/// written; a full queue drops the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
}

impl ClickEvent {
    /// Creates a new click event.
    pub fn new(link_id: i64) -> Self {
        Self { link_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new(42);
        assert_eq!(event.link_id, 42);
    }
}
