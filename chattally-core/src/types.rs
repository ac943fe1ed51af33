//! Core domain types for chattally
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Server** | A community space containing channels (a "guild" in wire terms) |
//! | **Channel** | A message stream within a server |
//! | **Snapshot** | The in-memory value of the accumulator at a point in time |
//! | **Gateway event** | A lifecycle event delivered by the host chat client |
//!
//! The snapshot serializes with camelCase field names so the persisted blob
//! stays compatible with data written by earlier versions of the tracker.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Snapshot
// ============================================

/// Per-channel message tally inside a [`ServerEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelEntry {
    /// Channel display name, snapshotted when the entry was created
    pub name: String,
    /// Channel id (repeated here so flattened rankings keep it)
    pub id: String,
    /// Messages sent by the local user in this channel
    pub messages: u64,
}

/// Per-server activity entry, created lazily on the first message seen there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEntry {
    /// Server display name, snapshotted when the entry was created
    pub name: String,
    /// Messages sent by the local user in this server (sum of its channels)
    pub messages: u64,
    /// Per-channel breakdown, keyed by channel id
    pub channels: HashMap<String, ChannelEntry>,
}

/// The full accumulator state.
///
/// All counters are monotonically non-decreasing except on explicit reset.
/// Every field carries a serde default: loading a blob that misses a field
/// (older schema) leaves that field at its zero default, which is the whole
/// merge-over-defaults contract of the persistence bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Messages sent by the local user
    pub messages: u64,
    /// Whitespace-delimited tokens typed by the local user
    pub words: u64,
    /// UTF-16 code units typed by the local user
    pub chars: u64,
    /// Files attached to own messages
    pub attachments: u64,
    /// Reactions added by the local user
    pub reactions: u64,
    /// Emoji (standard pictographs and custom-emoji tags) in own messages
    pub emojis: u64,
    /// Own messages edited
    pub edits: u64,
    /// Own messages that referenced another message
    pub replies_sent: u64,
    /// Messages by anyone that referenced one of the local user's messages
    pub replies_received: u64,
    /// Per-server breakdown, keyed by server id
    pub servers: HashMap<String, ServerEntry>,
}

impl StatsSnapshot {
    /// Number of servers with at least one recorded message.
    ///
    /// Entries are only ever created on a recorded message, so this is just
    /// the entry count.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Number of distinct channels recorded across all servers.
    pub fn channel_count(&self) -> usize {
        self.servers.values().map(|s| s.channels.len()).sum()
    }
}

// ============================================
// Gateway events
// ============================================

/// The event kinds the tracker subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MessageCreate,
    MessageUpdate,
    ReactionAdd,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MessageCreate => "message_create",
            EventKind::MessageUpdate => "message_update",
            EventKind::ReactionAdd => "reaction_add",
        }
    }
}

/// A new message observed on the event bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCreated {
    /// Author of the new message
    pub author_id: String,
    /// Raw message text
    pub content: String,
    /// Number of files attached
    pub attachment_count: u64,
    /// Server the message was sent in; absent for direct messages
    pub guild_id: Option<String>,
    /// Channel the message was sent in
    pub channel_id: String,
    /// Author of the message this one replies to, if any
    pub referenced_author_id: Option<String>,
}

/// An edit to an existing message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageEdited {
    /// Author of the edited message
    pub author_id: String,
    /// Id of the edited message
    pub message_id: String,
}

/// A reaction added to some message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionAdded {
    /// The user who reacted
    pub user_id: String,
}

/// Envelope for everything the host gateway can deliver to us.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    MessageCreate(MessageCreated),
    MessageUpdate(MessageEdited),
    ReactionAdd(ReactionAdded),
}

impl GatewayEvent {
    /// The subscription kind this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            GatewayEvent::MessageCreate(_) => EventKind::MessageCreate,
            GatewayEvent::MessageUpdate(_) => EventKind::MessageUpdate,
            GatewayEvent::ReactionAdd(_) => EventKind::ReactionAdd,
        }
    }
}
