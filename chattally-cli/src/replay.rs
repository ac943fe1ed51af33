//! Replay exported event logs through the tracking pipeline.
//!
//! Hosts that cannot embed the tracker can export their gateway traffic as
//! JSONL and feed it through `chattally replay`. One record per line,
//! discriminated by a `type` field:
//!
//! ```text
//! {"type":"identity","user_id":"u1"}
//! {"type":"directory","servers":{"s1":"Rust Hub"},"channels":{"c1":"general"}}
//! {"type":"message_create","author_id":"u1","content":"hi","guild_id":"s1","channel_id":"c1"}
//! {"type":"message_update","author_id":"u1","message_id":"m1"}
//! {"type":"reaction_add","user_id":"u1"}
//! ```
//!
//! Identity and directory records may appear anywhere; they are collected
//! in a first pass so events replay against the complete directory.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;

use chattally_core::{
    Dispatcher, GatewayEvent, MessageCreated, MessageEdited, ReactionAdded, StaticDirectory,
    StatsTracker, TrackingConfig,
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayRecord {
    Identity {
        user_id: String,
    },
    Directory {
        #[serde(default)]
        servers: HashMap<String, String>,
        #[serde(default)]
        channels: HashMap<String, String>,
    },
    MessageCreate(MessageCreated),
    MessageUpdate(MessageEdited),
    ReactionAdd(ReactionAdded),
}

/// Outcome of a replay run.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub events: usize,
    pub skipped_lines: usize,
}

/// Parse `input` and run every event through a fresh tracker over `store`.
pub fn replay(
    input: &str,
    store: Box<dyn chattally_core::DurableStore>,
    tracking: TrackingConfig,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut directory = StaticDirectory::default();
    let mut events: Vec<GatewayEvent> = Vec::new();

    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: ReplayRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                eprintln!("warning: skipping line {}: {}", lineno + 1, e);
                summary.skipped_lines += 1;
                continue;
            }
        };
        match record {
            ReplayRecord::Identity { user_id } => directory.current_user = Some(user_id),
            ReplayRecord::Directory { servers, channels } => {
                directory.servers.extend(servers);
                directory.channels.extend(channels);
            }
            ReplayRecord::MessageCreate(msg) => events.push(GatewayEvent::MessageCreate(msg)),
            ReplayRecord::MessageUpdate(edit) => events.push(GatewayEvent::MessageUpdate(edit)),
            ReplayRecord::ReactionAdd(reaction) => {
                events.push(GatewayEvent::ReactionAdd(reaction))
            }
        }
    }

    let mut tracker = StatsTracker::new(store, Rc::new(directory), Rc::new(tracking));
    let mut bus = Dispatcher::new();
    tracker.start(&mut bus);
    for event in &events {
        bus.dispatch(event);
        summary.events += 1;
    }
    tracker.stop(&mut bus);

    Ok(summary)
}

/// [`replay`] over a file on disk.
pub fn replay_file(
    path: &Path,
    store: Box<dyn chattally_core::DurableStore>,
    tracking: TrackingConfig,
) -> Result<ReplaySummary> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {:?}", path))?;
    replay(&input, store, tracking)
}
