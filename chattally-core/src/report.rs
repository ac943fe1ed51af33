//! Report rendering: pure text formatting over a snapshot.
//!
//! Numeric derivations are part of the output contract and must not drift:
//!
//! - Overview: messages, words, chars and emojis display as `floor(v / 3)`;
//!   replies-sent and reactions as `floor(v / 2)`; everything else as-is.
//!   The deflation happens only here, never in storage.
//! - Rankings: top 5 by message count, 20-segment bar with
//!   `ceil(count / total * 20)` filled segments, percentage to one decimal.
//!   A zero total renders 0.0% and an empty bar instead of failing.

use crate::types::{ChannelEntry, StatsSnapshot};

/// Number of segments in a ranking progress bar.
const BAR_WIDTH: u64 = 20;

/// How many servers/channels the ranking report lists.
const TOP_N: usize = 5;

/// Display value for counters deflated by 3 (messages, words, chars, emojis).
fn deflate3(value: u64) -> u64 {
    value / 3
}

/// Display value for counters deflated by 2 (replies sent, reactions).
fn deflate2(value: u64) -> u64 {
    value / 2
}

/// Filled/empty progress bar for `count` out of `total`.
fn progress_bar(count: u64, total: u64) -> String {
    let filled = if total == 0 {
        0
    } else {
        // ceil(count / total * BAR_WIDTH), capped in case count > total
        // from data predating a partial reset
        ((count * BAR_WIDTH + total - 1) / total).min(BAR_WIDTH)
    };
    let mut bar = String::with_capacity(BAR_WIDTH as usize * 3);
    for _ in 0..filled {
        bar.push('\u{2588}');
    }
    for _ in filled..BAR_WIDTH {
        bar.push('\u{2591}');
    }
    bar
}

/// Percentage of `count` out of `total`, one decimal place.
fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", count as f64 / total as f64 * 100.0)
    }
}

/// Render the overview report.
pub fn render_overview(snapshot: &StatsSnapshot) -> String {
    let mut out = String::new();

    out.push_str("\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501} ACTIVITY REPORT \u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\n\n");

    out.push_str("\u{25c6} Messages\n");
    out.push_str(&format!(
        "\u{2502} Sent:        {}\n",
        deflate3(snapshot.messages)
    ));
    out.push_str(&format!("\u{2502} Words:       {}\n", deflate3(snapshot.words)));
    out.push_str(&format!("\u{2502} Characters:  {}\n", deflate3(snapshot.chars)));
    out.push_str(&format!("\u{2514} Edits:       {}\n", snapshot.edits));
    out.push('\n');

    out.push_str("\u{25c6} Interactions\n");
    out.push_str(&format!(
        "\u{2502} Replies:     {} sent, {} received\n",
        deflate2(snapshot.replies_sent),
        snapshot.replies_received
    ));
    out.push_str(&format!(
        "\u{2502} Reactions:   {}\n",
        deflate2(snapshot.reactions)
    ));
    out.push_str(&format!("\u{2502} Files:       {}\n", snapshot.attachments));
    out.push_str(&format!(
        "\u{2514} Emojis:      {}\n",
        deflate3(snapshot.emojis)
    ));
    out.push('\n');

    out.push_str("\u{25c6} Network\n");
    out.push_str(&format!(
        "\u{2514} Active in {} servers, {} channels\n",
        snapshot.server_count(),
        snapshot.channel_count()
    ));

    out
}

/// One ranked row: rank, name, count, bar, percentage.
fn ranking_row(rank: usize, name: &str, messages: u64, total: u64) -> String {
    format!(
        "\u{2502} {}. {}\n\u{2502} \u{251c} {} messages\n\u{2502} \u{2514} {} {}%\n",
        rank,
        name,
        messages,
        progress_bar(messages, total),
        percentage(messages, total)
    )
}

/// Render the server/channel ranking report.
pub fn render_rankings(snapshot: &StatsSnapshot) -> String {
    let total = snapshot.messages;

    let mut servers: Vec<_> = snapshot.servers.values().collect();
    servers.sort_by(|a, b| b.messages.cmp(&a.messages));
    servers.truncate(TOP_N);

    let mut channels: Vec<&ChannelEntry> = snapshot
        .servers
        .values()
        .flat_map(|s| s.channels.values())
        .collect();
    channels.sort_by(|a, b| b.messages.cmp(&a.messages));
    channels.truncate(TOP_N);

    let mut out = String::new();
    out.push_str("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550} SERVER STATISTICS \u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\n\n");

    out.push_str("\u{25b8} Most Active Servers\n");
    out.push_str("\u{250c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n");
    for (i, server) in servers.iter().enumerate() {
        out.push_str(&ranking_row(i + 1, &server.name, server.messages, total));
    }
    out.push_str("\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n\n");

    out.push_str("\u{25b8} Most Active Channels\n");
    out.push_str("\u{250c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n");
    for (i, channel) in channels.iter().enumerate() {
        let name = format!("#{}", channel.name);
        out.push_str(&ranking_row(i + 1, &name, channel.messages, total));
    }
    out.push_str("\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n\n");

    out.push_str("Note: percentages are based on total messages\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChannelEntry, ServerEntry};
    use std::collections::HashMap;

    fn snapshot_with_servers(servers: &[(&str, u64, &[(&str, u64)])]) -> StatsSnapshot {
        let mut snap = StatsSnapshot::default();
        for (name, messages, channels) in servers {
            let mut entry = ServerEntry {
                name: name.to_string(),
                messages: *messages,
                channels: HashMap::new(),
            };
            for (cname, cmessages) in *channels {
                let id = format!("{}-{}", name, cname);
                entry.channels.insert(
                    id.clone(),
                    ChannelEntry {
                        name: cname.to_string(),
                        id,
                        messages: *cmessages,
                    },
                );
            }
            snap.servers.insert(name.to_string(), entry);
            snap.messages += messages;
        }
        snap
    }

    #[test]
    fn test_overview_deflates_by_three() {
        let snap = StatsSnapshot {
            messages: 9,
            words: 10,
            chars: 11,
            emojis: 8,
            ..Default::default()
        };
        let report = render_overview(&snap);
        assert!(report.contains("Sent:        3"));
        assert!(report.contains("Words:       3"));
        assert!(report.contains("Characters:  3"));
        assert!(report.contains("Emojis:      2"));
    }

    #[test]
    fn test_overview_deflates_by_two() {
        let snap = StatsSnapshot {
            replies_sent: 5,
            replies_received: 5,
            reactions: 5,
            ..Default::default()
        };
        let report = render_overview(&snap);
        assert!(report.contains("Replies:     2 sent, 5 received"));
        assert!(report.contains("Reactions:   2"));
    }

    #[test]
    fn test_overview_undeflated_counters() {
        let snap = StatsSnapshot {
            edits: 7,
            attachments: 9,
            ..Default::default()
        };
        let report = render_overview(&snap);
        assert!(report.contains("Edits:       7"));
        assert!(report.contains("Files:       9"));
    }

    #[test]
    fn test_overview_network_line() {
        let snap = snapshot_with_servers(&[
            ("alpha", 3, &[("general", 2), ("dev", 1)]),
            ("beta", 1, &[("chat", 1)]),
        ]);
        let report = render_overview(&snap);
        assert!(report.contains("Active in 2 servers, 3 channels"));
    }

    #[test]
    fn test_progress_bar_full_and_empty() {
        assert_eq!(progress_bar(10, 10), "\u{2588}".repeat(20));
        assert_eq!(progress_bar(0, 10), "\u{2591}".repeat(20));
    }

    #[test]
    fn test_progress_bar_rounds_up() {
        // 1/10 of 20 segments = 2 filled; 1/16 = 1.25 -> 2 filled.
        let bar = progress_bar(1, 10);
        assert_eq!(bar.chars().filter(|&c| c == '\u{2588}').count(), 2);
        let bar = progress_bar(1, 16);
        assert_eq!(bar.chars().filter(|&c| c == '\u{2588}').count(), 2);
    }

    #[test]
    fn test_percentage_one_decimal() {
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(10, 10), "100.0");
    }

    #[test]
    fn test_rankings_orders_by_messages() {
        let snap = snapshot_with_servers(&[
            ("small", 1, &[("a", 1)]),
            ("big", 8, &[("b", 8)]),
            ("mid", 3, &[("c", 3)]),
        ]);
        let report = render_rankings(&snap);
        let big = report.find("1. big").expect("big ranked first");
        let mid = report.find("2. mid").expect("mid ranked second");
        let small = report.find("3. small").expect("small ranked third");
        assert!(big < mid && mid < small);
        assert!(report.contains("#b"));
    }

    #[test]
    fn test_rankings_caps_at_five() {
        let servers: Vec<(String, u64)> = (0..7).map(|i| (format!("srv{}", i), i + 1)).collect();
        let mut snap = StatsSnapshot::default();
        for (name, messages) in &servers {
            snap.servers.insert(
                name.clone(),
                ServerEntry {
                    name: name.clone(),
                    messages: *messages,
                    channels: HashMap::new(),
                },
            );
            snap.messages += messages;
        }
        let report = render_rankings(&snap);
        assert!(report.contains("5. "));
        assert!(!report.contains("6. "));
    }

    #[test]
    fn test_rankings_zero_total_does_not_panic() {
        // Server entries but a zero global counter (possible after a blob
        // from a partial schema).
        let mut snap = snapshot_with_servers(&[("alpha", 4, &[("general", 4)])]);
        snap.messages = 0;
        let report = render_rankings(&snap);
        assert!(report.contains("0.0%"));
        assert!(report.contains(&"\u{2591}".repeat(20)));
    }

    #[test]
    fn test_rankings_empty_snapshot() {
        let report = render_rankings(&StatsSnapshot::default());
        assert!(report.contains("Most Active Servers"));
        assert!(report.contains("Most Active Channels"));
    }
}
