//! Link ordering engine: optimistic board mutations reconciled with the store.

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::domain::board::LinkBoard;
use crate::domain::entities::{Link, NewLink, RankWrite};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::link_input::validate_link_input;

/// How often a reorder is reissued after the store reports a version
/// this board did not supersede itself.
const MAX_REISSUES: usize = 3;

fn save_order_failed(version: i64) -> AppError {
    AppError::internal(
        "Failed to save the new link order",
        json!({ "version": version }),
    )
}

/// Point-in-time view of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub business_id: i64,
    pub links: Vec<Link>,
    pub version: i64,
    pub synced: bool,
}

impl BoardSnapshot {
    fn of(board: &LinkBoard) -> Self {
        Self {
            business_id: board.business_id(),
            links: board.links().to_vec(),
            version: board.version(),
            synced: board.is_synced(),
        }
    }
}

/// Owns one [`LinkBoard`] per signed-in business and persists its mutations.
///
/// Every mutation is applied locally first. The per-board lock is released
/// before the remote call is issued, so further gestures are accepted while
/// earlier ones are still in flight.
pub struct BoardService {
    links: Arc<dyn LinkRepository>,
    boards: RwLock<HashMap<i64, Arc<Mutex<LinkBoard>>>>,
    rollback_on_failure: bool,
}

impl BoardService {
    /// Creates the engine.
    ///
    /// With `rollback_on_failure`, a failed rank batch restores the order
    /// that preceded it (if no newer move happened) and a failed delete puts
    /// the link back where it was. Otherwise the local state is left as-is.
    pub fn new(links: Arc<dyn LinkRepository>, rollback_on_failure: bool) -> Self {
        Self {
            links,
            boards: RwLock::new(HashMap::new()),
            rollback_on_failure,
        }
    }

    /// Loads a business's links from the store into a fresh board.
    ///
    /// Replaces any board already open for the business. The fresh board
    /// continues from the replaced board's version, so batches the old board
    /// still has in flight never share a version with new ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be read.
    pub async fn open(&self, business_id: i64) -> Result<BoardSnapshot, AppError> {
        let mut board = self.load(business_id).await?;

        let mut boards = self.boards.write().await;
        if let Some(replaced) = boards.get(&business_id) {
            board.carry_version(replaced.lock().await.version());
        }
        let snapshot = BoardSnapshot::of(&board);
        boards.insert(business_id, Arc::new(Mutex::new(board)));
        drop(boards);

        info!(business_id, links = snapshot.links.len(), "Board opened");
        Ok(snapshot)
    }

    /// Tears the board down and clears its local sequence.
    ///
    /// Remote calls still in flight complete against the detached board.
    pub async fn close(&self, business_id: i64) {
        if let Some(board) = self.boards.write().await.remove(&business_id) {
            board.lock().await.clear();
            info!(business_id, "Board closed");
        }
    }

    async fn load(&self, business_id: i64) -> Result<LinkBoard, AppError> {
        let links = self.links.list_by_business(business_id).await.map_err(|e| {
            error!(business_id, error = %e, "Failed to load links");
            AppError::internal("Failed to load links", json!({}))
        })?;
        let version = self.links.rank_version(business_id).await?;
        Ok(LinkBoard::new(business_id, links, version))
    }

    /// Returns the open board, loading it on first use.
    async fn board(&self, business_id: i64) -> Result<Arc<Mutex<LinkBoard>>, AppError> {
        if let Some(board) = self.boards.read().await.get(&business_id) {
            return Ok(board.clone());
        }

        let loaded = self.load(business_id).await?;
        let mut boards = self.boards.write().await;
        Ok(boards
            .entry(business_id)
            .or_insert_with(|| Arc::new(Mutex::new(loaded)))
            .clone())
    }

    /// `true` while `board` is the one open for the business.
    async fn is_attached(&self, business_id: i64, board: &Arc<Mutex<LinkBoard>>) -> bool {
        self.boards
            .read()
            .await
            .get(&business_id)
            .is_some_and(|current| Arc::ptr_eq(current, board))
    }

    /// Current local sequence of a business.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the board has to be loaded and the
    /// store cannot be read.
    pub async fn snapshot(&self, business_id: i64) -> Result<BoardSnapshot, AppError> {
        let board = self.board(business_id).await?;
        let board = board.lock().await;
        Ok(BoardSnapshot::of(&board))
    }

    /// Moves `source_id` onto the slot of `target_id` and persists every rank.
    ///
    /// A no-op (equal or unknown ids) returns the unchanged snapshot without
    /// any remote call. A batch the store reports as stale counts as success
    /// when a newer reorder from this board supersedes it. Otherwise the store
    /// holds a version issued elsewhere (a board replaced by sign-in) and the
    /// current order is reissued under a fresh version.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the rank batch could not be written.
    pub async fn reorder(
        &self,
        business_id: i64,
        source_id: i64,
        target_id: i64,
    ) -> Result<BoardSnapshot, AppError> {
        let board = self.board(business_id).await?;

        let mut batch = {
            let mut guard = board.lock().await;
            let Some(batch) = guard.reorder(source_id, target_id) else {
                debug!(business_id, source_id, target_id, "Reorder is a no-op");
                return Ok(BoardSnapshot::of(&guard));
            };
            guard.begin_remote();
            batch
        };

        metrics::counter!("link_reorders_total").increment(1);

        for attempt in 0..=MAX_REISSUES {
            let written = self.links.apply_ranks(&batch).await;
            let attached = match written {
                Ok(RankWrite::Stale) => self.is_attached(business_id, &board).await,
                _ => true,
            };

            let mut guard = board.lock().await;
            guard.finish_remote();

            match written {
                Ok(RankWrite::Applied) => {
                    debug!(business_id, version = batch.version, "Rank batch applied");
                    return Ok(BoardSnapshot::of(&guard));
                }
                Ok(RankWrite::Stale) => {
                    metrics::counter!("rank_batches_stale_total").increment(1);
                    if !attached || guard.version() != batch.version {
                        debug!(business_id, version = batch.version, "Stale rank batch superseded");
                        return Ok(BoardSnapshot::of(&guard));
                    }
                    if attempt == MAX_REISSUES {
                        break;
                    }
                }
                Err(e) => {
                    error!(business_id, version = batch.version, error = %e, "Failed to save link order");
                    if self.rollback_on_failure && guard.revert(&batch) {
                        warn!(business_id, version = batch.version, "Link order rolled back");
                    }
                    return Err(save_order_failed(batch.version));
                }
            }
            drop(guard);

            let stored = self.links.rank_version(business_id).await.map_err(|e| {
                error!(business_id, error = %e, "Failed to read rank version");
                save_order_failed(batch.version)
            })?;

            let mut guard = board.lock().await;
            if guard.version() != batch.version {
                return Ok(BoardSnapshot::of(&guard));
            }
            warn!(business_id, version = batch.version, stored, "Rank version taken elsewhere, reissuing");
            batch = guard.rebase(stored, std::mem::take(&mut batch.previous));
            guard.begin_remote();
        }

        error!(business_id, version = batch.version, "Rank batch kept coming back stale");
        Err(save_order_failed(batch.version))
    }

    /// Validates and persists a new link, appending it once the store confirms.
    ///
    /// The link gets the next free rank and `clicks = 0`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] on empty title, missing or malformed URL;
    ///   nothing is sent to the store
    /// - [`AppError::Internal`] if the store rejects the create; the local
    ///   sequence is unchanged
    pub async fn append(
        &self,
        business_id: i64,
        title: &str,
        url: &str,
    ) -> Result<Link, AppError> {
        validate_link_input(title, url)?;

        let board = self.board(business_id).await?;

        let rank = {
            let mut guard = board.lock().await;
            guard.begin_remote();
            guard.reserve_rank()
        };

        let created = self
            .links
            .create(NewLink {
                business_id,
                title: title.trim().to_string(),
                url: url.trim().to_string(),
                rank,
            })
            .await;

        let mut guard = board.lock().await;
        guard.finish_remote();
        guard.release_rank(rank);

        match created {
            Ok(link) => {
                info!(business_id, link_id = link.id, rank, "Link added");
                guard.push_confirmed(link.clone());
                Ok(link)
            }
            Err(e) => {
                error!(business_id, error = %e, "Failed to add link");
                Err(AppError::internal("Failed to add the link", json!({})))
            }
        }
    }

    /// Removes a link locally, then deletes it in the store.
    ///
    /// Surviving ranks are not renumbered; the gap closes on the next reorder.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the link is not on the board
    /// - [`AppError::Internal`] if the store delete fails
    pub async fn remove(&self, business_id: i64, link_id: i64) -> Result<(), AppError> {
        let board = self.board(business_id).await?;

        let removed = {
            let mut guard = board.lock().await;
            let removed = guard
                .remove(link_id)
                .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;
            guard.begin_remote();
            removed
        };

        let deleted = self.links.delete(link_id, business_id).await;

        let mut guard = board.lock().await;
        guard.finish_remote();

        match deleted {
            Ok(true) => {
                info!(business_id, link_id, "Link deleted");
                Ok(())
            }
            Ok(false) => {
                debug!(business_id, link_id, "Link was already gone from the store");
                Ok(())
            }
            Err(e) => {
                error!(business_id, link_id, error = %e, "Failed to delete link");
                if self.rollback_on_failure {
                    guard.restore(removed);
                    warn!(business_id, link_id, "Link delete rolled back");
                }
                Err(AppError::internal("Failed to delete the link", json!({ "id": link_id })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Business, DEFAULT_THEME_COLOR, NewBusiness, RankBatch};
    use crate::domain::repositories::{BusinessRepository, MockLinkRepository};
    use crate::infrastructure::memory::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn link(id: i64, title: &str, rank: i32) -> Link {
        Link::new(
            id,
            1,
            title.to_string(),
            format!("https://example.com/{}", title.to_lowercase()),
            rank,
            0,
            Utc::now(),
        )
    }

    fn abc_repo() -> MockLinkRepository {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_by_business()
            .returning(|_| Ok(vec![link(1, "A", 0), link(2, "B", 1), link(3, "C", 2)]));
        repo.expect_rank_version().returning(|_| Ok(0));
        repo
    }

    fn titles(snapshot: &BoardSnapshot) -> Vec<&str> {
        snapshot.links.iter().map(|l| l.title.as_str()).collect()
    }

    fn ranks(snapshot: &BoardSnapshot) -> Vec<i32> {
        snapshot.links.iter().map(|l| l.rank).collect()
    }

    fn db_error() -> AppError {
        AppError::internal("Database error", json!({}))
    }

    #[tokio::test]
    async fn test_reorder_persists_full_batch() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks()
            .withf(|batch| {
                batch.version == 1
                    && batch.ranks.iter().map(|r| (r.id, r.rank)).collect::<Vec<_>>()
                        == vec![(3, 0), (1, 1), (2, 2)]
            })
            .times(1)
            .returning(|_| Ok(RankWrite::Applied));

        let service = BoardService::new(Arc::new(repo), false);
        let snapshot = service.reorder(1, 3, 1).await.unwrap();

        assert_eq!(titles(&snapshot), vec!["C", "A", "B"]);
        assert_eq!(ranks(&snapshot), vec![0, 1, 2]);
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.synced);
    }

    #[tokio::test]
    async fn test_reorder_noop_skips_store() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks().never();

        let service = BoardService::new(Arc::new(repo), false);

        let same = service.reorder(1, 2, 2).await.unwrap();
        let missing = service.reorder(1, 99, 1).await.unwrap();

        assert_eq!(titles(&same), vec!["A", "B", "C"]);
        assert_eq!(titles(&missing), vec!["A", "B", "C"]);
        assert_eq!(missing.version, 0);
    }

    #[tokio::test]
    async fn test_reorder_failure_keeps_optimistic_order() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks().returning(|_| Err(db_error()));

        let service = BoardService::new(Arc::new(repo), false);
        let err = service.reorder(1, 3, 1).await.unwrap_err();

        assert_eq!(err.message(), "Failed to save the new link order");
        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(titles(&snapshot), vec!["C", "A", "B"]);
        assert!(snapshot.synced);
    }

    #[tokio::test]
    async fn test_reorder_failure_rolls_back_when_enabled() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks().returning(|_| Err(db_error()));

        let service = BoardService::new(Arc::new(repo), true);
        assert!(service.reorder(1, 3, 1).await.is_err());

        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(titles(&snapshot), vec!["A", "B", "C"]);
        assert_eq!(ranks(&snapshot), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_stale_latest_batch_is_reissued() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks()
            .withf(|batch| batch.version == 1)
            .times(1)
            .returning(|_| Ok(RankWrite::Stale));
        repo.expect_apply_ranks()
            .withf(|batch| {
                batch.version == 2
                    && batch.ranks.iter().map(|r| r.id).collect::<Vec<_>>() == vec![2, 1, 3]
            })
            .times(1)
            .returning(|_| Ok(RankWrite::Applied));

        let service = BoardService::new(Arc::new(repo), false);
        let snapshot = service.reorder(1, 1, 2).await.unwrap();

        assert_eq!(titles(&snapshot), vec!["B", "A", "C"]);
        assert_eq!(snapshot.version, 2);
        assert!(snapshot.synced);
    }

    #[tokio::test]
    async fn test_reorder_fails_when_store_keeps_reporting_stale() {
        let mut repo = abc_repo();
        repo.expect_apply_ranks()
            .times(MAX_REISSUES + 1)
            .returning(|_| Ok(RankWrite::Stale));

        let service = BoardService::new(Arc::new(repo), false);
        let err = service.reorder(1, 1, 2).await.unwrap_err();

        assert_eq!(err.message(), "Failed to save the new link order");
        assert!(service.snapshot(1).await.unwrap().synced);
    }

    #[tokio::test]
    async fn test_append_uses_next_rank() {
        let mut repo = abc_repo();
        repo.expect_create()
            .withf(|new_link: &NewLink| new_link.rank == 3 && new_link.title == "Menu")
            .times(1)
            .returning(|new_link| Ok(link(4, &new_link.title, new_link.rank)));

        let service = BoardService::new(Arc::new(repo), false);
        let created = service.append(1, "Menu", "https://x.com").await.unwrap();

        assert_eq!(created.rank, 3);
        assert_eq!(created.clicks, 0);
        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(titles(&snapshot), vec!["A", "B", "C", "Menu"]);
    }

    #[tokio::test]
    async fn test_append_validation_never_reaches_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().never();
        repo.expect_list_by_business().never();

        let service = BoardService::new(Arc::new(repo), false);

        let empty_title = service.append(1, "", "https://x.com").await.unwrap_err();
        let bad_url = service.append(1, "Title", "not-a-url").await.unwrap_err();

        assert!(matches!(empty_title, AppError::Validation { .. }));
        assert_eq!(bad_url.message(), "Invalid URL. Must be a valid http/https link.");
    }

    #[tokio::test]
    async fn test_append_failure_leaves_sequence_unchanged() {
        let mut repo = abc_repo();
        repo.expect_create().returning(|_| Err(db_error()));

        let service = BoardService::new(Arc::new(repo), false);
        assert!(service.append(1, "Menu", "https://x.com").await.is_err());

        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(snapshot.links.len(), 3);
    }

    #[tokio::test]
    async fn test_append_after_failed_append_reuses_rank() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut repo = abc_repo();
        repo.expect_create()
            .withf(|new_link: &NewLink| new_link.rank == 3)
            .times(2)
            .returning(move |new_link| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(db_error())
                } else {
                    Ok(link(4, &new_link.title, new_link.rank))
                }
            });

        let service = BoardService::new(Arc::new(repo), false);
        assert!(service.append(1, "Menu", "https://x.com").await.is_err());
        let created = service.append(1, "Menu", "https://x.com").await.unwrap();

        assert_eq!(created.rank, 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_append_remove_append_keeps_rank_dense() {
        let (store, business) = seeded_store().await;
        let service = BoardService::new(store, false);

        let d = service.append(business.id, "D", "https://d.example").await.unwrap();
        service.remove(business.id, d.id).await.unwrap();
        let e = service.append(business.id, "E", "https://e.example").await.unwrap();

        assert_eq!(d.rank, 3);
        assert_eq!(e.rank, 3);
        let snapshot = service.snapshot(business.id).await.unwrap();
        assert_eq!(ranks(&snapshot), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_remove_leaves_rank_gap() {
        let mut repo = abc_repo();
        repo.expect_delete()
            .withf(|id, business_id| *id == 2 && *business_id == 1)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = BoardService::new(Arc::new(repo), false);
        service.remove(1, 2).await.unwrap();

        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(titles(&snapshot), vec!["A", "C"]);
        assert_eq!(ranks(&snapshot), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_remove_unknown_link() {
        let service = BoardService::new(Arc::new(abc_repo()), false);
        let err = service.remove(1, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_failure_restores_when_enabled() {
        let mut repo = abc_repo();
        repo.expect_delete().returning(|_, _| Err(db_error()));

        let service = BoardService::new(Arc::new(repo), true);
        assert!(service.remove(1, 2).await.is_err());

        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(titles(&snapshot), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_close_drops_board() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_by_business()
            .times(2)
            .returning(|_| Ok(vec![link(1, "A", 0)]));
        repo.expect_rank_version().returning(|_| Ok(0));

        let service = BoardService::new(Arc::new(repo), false);
        service.open(1).await.unwrap();
        service.close(1).await;

        // reloaded from the store on next use
        let snapshot = service.snapshot(1).await.unwrap();
        assert_eq!(snapshot.links.len(), 1);
    }

    /// Holds each `apply_ranks` call until its gate is released.
    struct GatedLinks {
        store: Arc<MemoryStore>,
        gates: std::sync::Mutex<VecDeque<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl LinkRepository for GatedLinks {
        async fn list_by_business(&self, business_id: i64) -> Result<Vec<Link>, AppError> {
            self.store.list_by_business(business_id).await
        }

        async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
            LinkRepository::create(self.store.as_ref(), new_link).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
            LinkRepository::find_by_id(self.store.as_ref(), id).await
        }

        async fn delete(&self, id: i64, business_id: i64) -> Result<bool, AppError> {
            self.store.delete(id, business_id).await
        }

        async fn apply_ranks(&self, batch: &RankBatch) -> Result<RankWrite, AppError> {
            let gate = self.gates.lock().unwrap().pop_front();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.store.apply_ranks(batch).await
        }

        async fn rank_version(&self, business_id: i64) -> Result<i64, AppError> {
            self.store.rank_version(business_id).await
        }

        async fn record_click(&self, id: i64) -> Result<bool, AppError> {
            self.store.record_click(id).await
        }
    }

    async fn seeded_store() -> (Arc<MemoryStore>, Business) {
        let store = Arc::new(MemoryStore::new());
        let business = BusinessRepository::create(
            store.as_ref(),
            NewBusiness {
                owner: "owner".to_string(),
                slug: "cafe".to_string(),
                name: "Cafe".to_string(),
                theme_color: DEFAULT_THEME_COLOR.to_string(),
            },
        )
        .await
        .unwrap();

        for (rank, title) in ["A", "B", "C"].into_iter().enumerate() {
            LinkRepository::create(
                store.as_ref(),
                NewLink {
                    business_id: business.id,
                    title: title.to_string(),
                    url: "https://example.com".to_string(),
                    rank: rank as i32,
                },
            )
            .await
            .unwrap();
        }

        (store, business)
    }

    #[tokio::test]
    async fn test_out_of_order_completion_persists_latest_order() {
        let (store, business) = seeded_store().await;
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();

        let links = Arc::new(GatedLinks {
            store: store.clone(),
            gates: std::sync::Mutex::new(VecDeque::from([first_gate, second_gate])),
        });
        let service = BoardService::new(links, false);
        service.open(business.id).await.unwrap();

        let ids: Vec<i64> = service
            .snapshot(business.id)
            .await
            .unwrap()
            .links
            .iter()
            .map(|l| l.id)
            .collect();
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        let (first, second, ()) = tokio::join!(
            service.reorder(business.id, c, a),
            service.reorder(business.id, a, b),
            async {
                release_second.send(()).unwrap();
                while store.rank_version(business.id).await.unwrap() < 2 {
                    tokio::task::yield_now().await;
                }
                release_first.send(()).unwrap();
            }
        );
        first.unwrap();
        let latest = second.unwrap();

        let local: Vec<i64> = service
            .snapshot(business.id)
            .await
            .unwrap()
            .links
            .iter()
            .map(|l| l.id)
            .collect();
        let persisted: Vec<i64> = store
            .list_by_business(business.id)
            .await
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();

        assert_eq!(local, vec![c, b, a]);
        assert_eq!(persisted, local);
        assert_eq!(latest.version, 2);
        assert_eq!(store.rank_version(business.id).await.unwrap(), 2);
    }

    fn ids(links: &[Link]) -> Vec<i64> {
        links.iter().map(|l| l.id).collect()
    }

    #[tokio::test]
    async fn test_reopen_during_inflight_reorder_keeps_later_order() {
        let (store, business) = seeded_store().await;
        let (release, gate) = oneshot::channel();

        let links = Arc::new(GatedLinks {
            store: store.clone(),
            gates: std::sync::Mutex::new(VecDeque::from([gate])),
        });
        let service = BoardService::new(links, false);
        let opened = service.open(business.id).await.unwrap();
        let (a, b, c) = (opened.links[0].id, opened.links[1].id, opened.links[2].id);

        let (first, ()) = tokio::join!(service.reorder(business.id, c, a), async {
            service.open(business.id).await.unwrap();
            release.send(()).unwrap();
        });
        first.unwrap();

        let latest = service.reorder(business.id, a, b).await.unwrap();

        let persisted = store.list_by_business(business.id).await.unwrap();
        assert_eq!(ids(&latest.links), vec![b, a, c]);
        assert_eq!(ids(&persisted), ids(&latest.links));
        assert_eq!(latest.version, 2);
        assert_eq!(store.rank_version(business.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sign_in_after_sign_out_during_inflight_reorder_reissues() {
        let (store, business) = seeded_store().await;
        let (release, gate) = oneshot::channel();

        let links = Arc::new(GatedLinks {
            store: store.clone(),
            gates: std::sync::Mutex::new(VecDeque::from([gate])),
        });
        let service = BoardService::new(links, false);
        let opened = service.open(business.id).await.unwrap();
        let (a, b, c) = (opened.links[0].id, opened.links[1].id, opened.links[2].id);

        let (first, ()) = tokio::join!(service.reorder(business.id, c, a), async {
            service.close(business.id).await;
            service.open(business.id).await.unwrap();
            release.send(()).unwrap();
        });
        first.unwrap();

        // The fresh board issues version 1, which the detached board already used.
        let latest = service.reorder(business.id, a, b).await.unwrap();

        let persisted = store.list_by_business(business.id).await.unwrap();
        assert_eq!(ids(&latest.links), vec![b, a, c]);
        assert_eq!(ids(&persisted), ids(&latest.links));
        assert_eq!(latest.version, 2);
        assert_eq!(store.rank_version(business.id).await.unwrap(), 2);
    }
}
