//! The mutable stats aggregate.
//!
//! One accumulator owns the snapshot and the durable store handle. Every
//! mutation is followed by a write-through of the full blob; writes are
//! fire-and-forget from the caller's perspective (a failed write is logged
//! and the in-memory state stays authoritative until the next write).

use crate::classifier::MessageDeltas;
use crate::store::{load_snapshot, save_snapshot, DurableStore};
use crate::types::{ChannelEntry, ServerEntry, StatsSnapshot};

/// Owns the [`StatsSnapshot`] and applies classified deltas to it.
pub struct StatsAccumulator {
    snapshot: StatsSnapshot,
    store: Box<dyn DurableStore>,
}

impl StatsAccumulator {
    /// Create an accumulator with the all-zero snapshot.
    ///
    /// Call [`reload`](Self::reload) to overlay whatever the store holds.
    pub fn new(store: Box<dyn DurableStore>) -> Self {
        StatsAccumulator {
            snapshot: StatsSnapshot::default(),
            store,
        }
    }

    /// Replace the snapshot with the store's contents merged over defaults.
    pub fn reload(&mut self) {
        self.snapshot = load_snapshot(self.store.as_ref());
    }

    /// Read view of the current state.
    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    /// Apply a classified message-created event.
    pub fn apply_message(&mut self, deltas: MessageDeltas) {
        if deltas.is_empty() {
            return;
        }

        self.snapshot.replies_received += deltas.replies_received;

        if let Some(own) = deltas.own {
            self.snapshot.messages += 1;
            self.snapshot.words += own.words;
            self.snapshot.chars += own.chars;
            self.snapshot.attachments += own.attachments;
            self.snapshot.emojis += own.emojis;
            if own.reply_sent {
                self.snapshot.replies_sent += 1;
            }

            if let Some(scope) = own.scope {
                let server = self
                    .snapshot
                    .servers
                    .entry(scope.server_id)
                    .or_insert_with(|| ServerEntry {
                        name: scope.server_name,
                        ..Default::default()
                    });
                let channel = server
                    .channels
                    .entry(scope.channel_id.clone())
                    .or_insert_with(|| ChannelEntry {
                        name: scope.channel_name,
                        id: scope.channel_id,
                        messages: 0,
                    });
                server.messages += 1;
                channel.messages += 1;
            }
        }

        self.persist();
    }

    /// Apply an own-message edit.
    pub fn apply_edit(&mut self) {
        self.snapshot.edits += 1;
        self.persist();
    }

    /// Apply an own reaction.
    pub fn apply_reaction(&mut self) {
        self.snapshot.reactions += 1;
        self.persist();
    }

    /// Restore the all-zero default, discarding server/channel data, and
    /// persist the empty snapshot.
    pub fn reset(&mut self) {
        self.snapshot = StatsSnapshot::default();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = save_snapshot(self.store.as_mut(), &self.snapshot) {
            tracing::warn!(error = %e, "failed to persist stats snapshot");
        }
    }
}
