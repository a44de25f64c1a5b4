//! In-memory ordered link sequence for one business.
//!
//! [`LinkBoard`] applies every mutation synchronously (optimistic update) and
//! hands back what must be persisted. It never talks to the store itself; the
//! caller ([`crate::application::services::BoardService`]) issues the remote
//! calls and reports their completion.

use std::collections::BTreeSet;

use crate::domain::entities::{Link, RankAssignment, RankBatch};

/// Moves the element at `from` to `to`, shifting the elements in between
/// one step towards `from`. Not a swap.
///
/// Both indices must be in bounds.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Rank stored for the link at `index`.
///
/// Saturates at `i32::MAX`; the column is a 32-bit integer.
pub fn rank_of(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// A link removed from the board, kept so a failed delete can restore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLink {
    pub link: Link,
    pub index: usize,
}

/// Ordered link sequence of a single business.
#[derive(Debug, Clone)]
pub struct LinkBoard {
    business_id: i64,
    links: Vec<Link>,
    version: i64,
    in_flight: usize,
    /// Ranks handed to appends whose create call has not completed.
    pending_ranks: BTreeSet<i32>,
}

impl LinkBoard {
    /// Builds a board from persisted links.
    ///
    /// `version` is the last rank version the store applied; the next reorder
    /// issues `version + 1`.
    pub fn new(business_id: i64, mut links: Vec<Link>, version: i64) -> Self {
        links.sort_by_key(|l| l.rank);
        Self {
            business_id,
            links,
            version,
            in_flight: 0,
            pending_ranks: BTreeSet::new(),
        }
    }

    pub fn business_id(&self) -> i64 {
        self.business_id
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Version of the most recently issued rank batch.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Raises the version to at least `version`.
    ///
    /// A board replacing another one for the same business must not reissue
    /// versions the old board already sent.
    pub fn carry_version(&mut self, version: i64) {
        self.version = self.version.max(version);
    }

    /// `true` when no remote call issued from this board is pending.
    pub fn is_synced(&self) -> bool {
        self.in_flight == 0
    }

    /// Marks a remote call as issued.
    pub fn begin_remote(&mut self) {
        self.in_flight += 1;
    }

    /// Marks a remote call as completed, successfully or not.
    pub fn finish_remote(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.links.iter().position(|l| l.id == id)
    }

    /// Moves `source_id` onto the slot of `target_id`.
    ///
    /// Returns `None` (and leaves the board untouched) when either id is
    /// missing or both are the same. Otherwise every rank is recomputed from
    /// its index and a batch covering the whole sequence is returned.
    pub fn reorder(&mut self, source_id: i64, target_id: i64) -> Option<RankBatch> {
        if source_id == target_id {
            return None;
        }
        let from = self.position(source_id)?;
        let to = self.position(target_id)?;

        let previous = self.links.clone();
        move_item(&mut self.links, from, to);
        self.renumber();

        self.version += 1;
        Some(RankBatch {
            business_id: self.business_id,
            version: self.version,
            ranks: self
                .links
                .iter()
                .map(|l| RankAssignment {
                    id: l.id,
                    rank: l.rank,
                })
                .collect(),
            previous,
        })
    }

    fn renumber(&mut self) {
        for (index, link) in self.links.iter_mut().enumerate() {
            link.rank = rank_of(index);
        }
    }

    /// Rank for the next appended link.
    ///
    /// Equals the length on a dense sequence; after deletes it stays past the
    /// highest surviving rank so the new link never shares a rank.
    pub fn next_rank(&self) -> i32 {
        let len = rank_of(self.links.len());
        let after_max = self
            .links
            .iter()
            .map(|l| l.rank.saturating_add(1))
            .max()
            .unwrap_or(0);
        len.max(after_max)
    }

    /// Hands out the rank for an append whose create call is about to be issued.
    ///
    /// Appends still in flight keep their rank, so two overlapping appends
    /// never receive the same one. Every reserved rank must be handed back
    /// with [`LinkBoard::release_rank`] once its create call completes.
    pub fn reserve_rank(&mut self) -> i32 {
        let after_pending = self
            .pending_ranks
            .last()
            .map_or(0, |rank| rank.saturating_add(1));
        let rank = self.next_rank().max(after_pending);
        self.pending_ranks.insert(rank);
        rank
    }

    /// Ends the reservation of `rank`, whether its create succeeded or not.
    pub fn release_rank(&mut self, rank: i32) {
        self.pending_ranks.remove(&rank);
    }

    /// Appends a link the store has confirmed.
    pub fn push_confirmed(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Removes a link without renumbering the survivors.
    pub fn remove(&mut self, id: i64) -> Option<RemovedLink> {
        let index = self.position(id)?;
        let link = self.links.remove(index);
        Some(RemovedLink { link, index })
    }

    /// Puts a removed link back at its former index.
    pub fn restore(&mut self, removed: RemovedLink) {
        if self.position(removed.link.id).is_some() {
            return;
        }
        let index = removed.index.min(self.links.len());
        self.links.insert(index, removed.link);
    }

    /// Restores the order that preceded `batch`.
    ///
    /// Only applies while `batch` is the latest reorder; a newer move wins.
    /// Links deleted or added since the batch was issued are respected.
    /// Returns `true` if the order was restored.
    pub fn revert(&mut self, batch: &RankBatch) -> bool {
        if batch.version != self.version {
            return false;
        }

        let mut restored: Vec<Link> = batch
            .previous
            .iter()
            .filter_map(|old| {
                self.links.iter().find(|l| l.id == old.id).map(|current| Link {
                    rank: old.rank,
                    ..current.clone()
                })
            })
            .collect();
        let added: Vec<Link> = self
            .links
            .iter()
            .filter(|l| !batch.previous.iter().any(|old| old.id == l.id))
            .cloned()
            .collect();
        restored.extend(added);

        self.links = restored;
        true
    }

    /// Reissues the current order under a version past `stored_version`.
    ///
    /// Used when the store already holds a version this board also issued,
    /// e.g. one sent by a board that was replaced. `previous` is carried over
    /// from the batch being reissued so a rollback still restores it.
    pub fn rebase(&mut self, stored_version: i64, previous: Vec<Link>) -> RankBatch {
        self.version = self.version.max(stored_version) + 1;
        RankBatch {
            business_id: self.business_id,
            version: self.version,
            ranks: self
                .links
                .iter()
                .map(|l| RankAssignment {
                    id: l.id,
                    rank: l.rank,
                })
                .collect(),
            previous,
        }
    }

    /// Drops every link, used on sign-out.
    pub fn clear(&mut self) {
        self.links.clear();
        self.pending_ranks.clear();
    }
}
