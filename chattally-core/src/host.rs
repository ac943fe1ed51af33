//! Seams to the host chat client.
//!
//! The tracker never talks to the host directly; it goes through these
//! traits so the core stays testable and host-agnostic. The host's user and
//! directory stores may be mid-handshake at any point, so every lookup can
//! come back absent and callers must degrade to a no-op.

use std::collections::HashMap;

/// Lookup-by-id into the host's user/server/channel directories.
pub trait Directory {
    /// Id of the local (logged-in) user, if one is resolvable yet.
    fn current_user_id(&self) -> Option<String>;

    /// Display name of a server, if the id resolves.
    fn server_name(&self, server_id: &str) -> Option<String>;

    /// Display name of a channel, if the id resolves.
    fn channel_name(&self, channel_id: &str) -> Option<String>;
}

/// The configuration toggles the host exposes for the tracker.
pub trait Settings {
    /// Gate for message-created and message-edited counting
    fn track_messages(&self) -> bool;
    /// Gate for reaction counting
    fn track_reactions(&self) -> bool;
    /// Whether command responses go out as the user's own message
    /// (otherwise as an ephemeral system-style message)
    fn send_as_user(&self) -> bool;
}

/// Map-backed [`Directory`] for replayed event logs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    /// Local user id, if known
    pub current_user: Option<String>,
    /// Server id → display name
    pub servers: HashMap<String, String>,
    /// Channel id → display name
    pub channels: HashMap<String, String>,
}

impl Directory for StaticDirectory {
    fn current_user_id(&self) -> Option<String> {
        self.current_user.clone()
    }

    fn server_name(&self, server_id: &str) -> Option<String> {
        self.servers.get(server_id).cloned()
    }

    fn channel_name(&self, channel_id: &str) -> Option<String> {
        self.channels.get(channel_id).cloned()
    }
}
