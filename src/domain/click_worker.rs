//! Background worker that turns click events into counter increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

const MAX_RETRIES: usize = 3;

/// Consumes click events until the channel closes.
///
/// At most `concurrency` increments run at once. Each increment is retried
/// with exponential backoff; a click that still fails is logged and dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    links: Arc<dyn LinkRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let links = links.clone();

        tokio::spawn(async move {
            record(links.as_ref(), event).await;
            drop(permit);
        });
    }

    tracing::info!("Click worker stopped");
}

async fn record(links: &dyn LinkRepository, event: ClickEvent) {
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    match Retry::spawn(strategy, || links.record_click(event.link_id)).await {
        Ok(true) => {
            metrics::counter!("clicks_recorded_total").increment(1);
        }
        Ok(false) => {
            tracing::debug!(link_id = event.link_id, "Click for unknown link ignored");
        }
        Err(e) => {
            metrics::counter!("clicks_failed_total").increment(1);
            tracing::warn!(link_id = event.link_id, error = %e, "Failed to record click");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_worker_records_each_click() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_click()
            .withf(|id| *id == 7)
            .times(2)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new(7)).await.unwrap();
        tx.send(ClickEvent::new(7)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 2).await;
        // Let spawned increments finish before the mock checks its expectations.
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_failed_increment() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_record_click().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(true)
            }
        });

        record(&repo, ClickEvent::new(1)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_retries() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_record_click().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::internal("Database error", json!({})))
        });

        record(&repo, ClickEvent::new(1)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), MAX_RETRIES + 1);
    }
}
