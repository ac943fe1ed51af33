//! Event classification: which counters does an incoming event touch?
//!
//! Everything here is pure over the event, the local-user identity, and the
//! host directory. The quirks are deliberate and load-bearing for people
//! with existing data:
//!
//! - `repliesReceived` fires whenever the referenced message's author is the
//!   local user, no matter who wrote the new message. Replies *from anyone*
//!   to the local user count; everything else only counts own messages.
//! - Word counting splits on runs of whitespace and counts the pieces,
//!   including empty ones. Empty content counts as one word, and leading
//!   whitespace yields an extra empty piece.
//! - Character counting is in UTF-16 code units, not bytes or graphemes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::host::Directory;
use crate::types::MessageCreated;

/// Standard emoji presentation, extended pictographs, or custom-emoji tags
/// of the form `<a?:name:id>`.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Emoji_Presentation}|\p{Extended_Pictographic}|<a?:[a-zA-Z0-9_]+:[0-9]+>")
        .expect("emoji pattern is valid")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("pattern is valid"));

/// Count whitespace-delimited pieces of `content`.
pub fn word_count(content: &str) -> u64 {
    WHITESPACE_RE.split(content).count() as u64
}

/// Length of `content` in UTF-16 code units.
pub fn char_count(content: &str) -> u64 {
    content.encode_utf16().count() as u64
}

/// Count emoji occurrences in `content`.
pub fn emoji_count(content: &str) -> u64 {
    EMOJI_RE.find_iter(content).count() as u64
}

/// Where a scoped (per-server, per-channel) increment lands.
///
/// Only produced when both the server and the channel resolved in the
/// directory; the names are snapshots taken now, used if the entry has to
/// be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageScope {
    pub server_id: String,
    pub server_name: String,
    pub channel_id: String,
    pub channel_name: String,
}

/// Deltas from the local user's own message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnMessageDelta {
    pub words: u64,
    pub chars: u64,
    pub attachments: u64,
    pub emojis: u64,
    pub reply_sent: bool,
    pub scope: Option<MessageScope>,
}

/// Everything a message-created event changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDeltas {
    /// 1 when someone (anyone) replied to the local user
    pub replies_received: u64,
    /// Present only when the local user authored the message
    pub own: Option<OwnMessageDelta>,
}

impl MessageDeltas {
    /// True when applying this would change no counter.
    pub fn is_empty(&self) -> bool {
        self.replies_received == 0 && self.own.is_none()
    }
}

/// Classify a message-created event against the local user `me`.
pub fn classify_message(
    event: &MessageCreated,
    me: &str,
    directory: &dyn Directory,
) -> MessageDeltas {
    let mut deltas = MessageDeltas::default();

    if event.referenced_author_id.as_deref() == Some(me) {
        deltas.replies_received = 1;
    }

    if event.author_id == me {
        let scope = event.guild_id.as_ref().and_then(|server_id| {
            let server_name = directory.server_name(server_id)?;
            let channel_name = directory.channel_name(&event.channel_id)?;
            Some(MessageScope {
                server_id: server_id.clone(),
                server_name,
                channel_id: event.channel_id.clone(),
                channel_name,
            })
        });

        deltas.own = Some(OwnMessageDelta {
            words: word_count(&event.content),
            chars: char_count(&event.content),
            attachments: event.attachment_count,
            emojis: emoji_count(&event.content),
            reply_sent: event.referenced_author_id.is_some(),
            scope,
        });
    }

    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticDirectory;

    fn directory() -> StaticDirectory {
        let mut dir = StaticDirectory {
            current_user: Some("me".to_string()),
            ..Default::default()
        };
        dir.servers.insert("s1".to_string(), "Rust Hub".to_string());
        dir.channels.insert("c1".to_string(), "general".to_string());
        dir
    }

    fn own_message(content: &str) -> MessageCreated {
        MessageCreated {
            author_id: "me".to_string(),
            content: content.to_string(),
            channel_id: "c1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_word_count_collapses_whitespace_runs() {
        assert_eq!(word_count("a b  c"), 3);
        assert_eq!(word_count("hello"), 1);
    }

    #[test]
    fn test_word_count_empty_content_is_one() {
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn test_word_count_leading_whitespace_adds_empty_piece() {
        // Split semantics, not trimming: " a" is ["", "a"].
        assert_eq!(word_count(" a"), 2);
    }

    #[test]
    fn test_char_count_utf16_units() {
        assert_eq!(char_count("abc"), 3);
        // Thumbs-up is a surrogate pair.
        assert_eq!(char_count("\u{1F44D}"), 2);
    }

    #[test]
    fn test_emoji_count_pictograph_and_custom_tag() {
        assert_eq!(emoji_count("hello \u{1F44D} world <a:custom:123456>"), 2);
        assert_eq!(emoji_count("<:static_one:42>"), 1);
        assert_eq!(emoji_count("plain text :) <notatag>"), 0);
    }

    #[test]
    fn test_own_message_counts_everything() {
        let dir = directory();
        let mut event = own_message("hi there \u{1F44D}");
        event.guild_id = Some("s1".to_string());
        event.attachment_count = 2;

        let deltas = classify_message(&event, "me", &dir);
        assert_eq!(deltas.replies_received, 0);
        let own = deltas.own.expect("own message");
        assert_eq!(own.words, 3);
        assert_eq!(own.chars, 11);
        assert_eq!(own.attachments, 2);
        assert_eq!(own.emojis, 1);
        assert!(!own.reply_sent);

        let scope = own.scope.expect("resolvable scope");
        assert_eq!(scope.server_name, "Rust Hub");
        assert_eq!(scope.channel_name, "general");
    }

    #[test]
    fn test_foreign_message_is_empty() {
        let dir = directory();
        let mut event = own_message("hi");
        event.author_id = "someone-else".to_string();

        let deltas = classify_message(&event, "me", &dir);
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_reply_to_me_counts_regardless_of_author() {
        let dir = directory();
        let mut event = own_message("hey");
        event.author_id = "someone-else".to_string();
        event.referenced_author_id = Some("me".to_string());

        let deltas = classify_message(&event, "me", &dir);
        assert_eq!(deltas.replies_received, 1);
        assert!(deltas.own.is_none());
    }

    #[test]
    fn test_own_reply_counts_sent_and_received() {
        // Replying to yourself hits both reply counters.
        let dir = directory();
        let mut event = own_message("self reply");
        event.referenced_author_id = Some("me".to_string());

        let deltas = classify_message(&event, "me", &dir);
        assert_eq!(deltas.replies_received, 1);
        assert!(deltas.own.expect("own").reply_sent);
    }

    #[test]
    fn test_unresolvable_server_skips_scope_only() {
        let dir = directory();
        let mut event = own_message("hello");
        event.guild_id = Some("unknown-server".to_string());

        let deltas = classify_message(&event, "me", &dir);
        let own = deltas.own.expect("own message");
        assert_eq!(own.words, 1);
        assert!(own.scope.is_none());
    }

    #[test]
    fn test_unresolvable_channel_skips_scope_only() {
        let dir = directory();
        let mut event = own_message("hello");
        event.guild_id = Some("s1".to_string());
        event.channel_id = "unknown-channel".to_string();

        let deltas = classify_message(&event, "me", &dir);
        assert!(deltas.own.expect("own message").scope.is_none());
    }

    #[test]
    fn test_direct_message_has_no_scope() {
        let dir = directory();
        let event = own_message("dm text");
        let deltas = classify_message(&event, "me", &dir);
        assert!(deltas.own.expect("own message").scope.is_none());
    }
}
