//! Command surface: `stats`, `serverstats`, `resetstats`.
//!
//! Each command produces a [`CommandResponse`]; delivering it (own message
//! vs ephemeral) is the host's job. Reset responses are always ephemeral —
//! nobody wants their confirmation slip posted to the channel.

use crate::accumulator::StatsAccumulator;
use crate::host::Settings;
use crate::report;

/// How a command response should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// Post as the local user's own chat message
    AsUser,
    /// Show as an ephemeral system-style message, visible only to the user
    Ephemeral,
}

/// A rendered command response, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub content: String,
    pub mode: SendMode,
}

fn report_mode(settings: &dyn Settings) -> SendMode {
    if settings.send_as_user() {
        SendMode::AsUser
    } else {
        SendMode::Ephemeral
    }
}

/// `stats` — the overview report.
pub fn stats(accumulator: &StatsAccumulator, settings: &dyn Settings) -> CommandResponse {
    CommandResponse {
        content: report::render_overview(accumulator.snapshot()),
        mode: report_mode(settings),
    }
}

/// `serverstats` — the server/channel ranking report.
pub fn server_stats(accumulator: &StatsAccumulator, settings: &dyn Settings) -> CommandResponse {
    CommandResponse {
        content: report::render_rankings(accumulator.snapshot()),
        mode: report_mode(settings),
    }
}

/// `resetstats <confirmation>` — destructive reset behind a typed guard.
///
/// The confirmation must equal `"confirm"`, case-insensitively; anything
/// else leaves the stats untouched and returns a warning.
pub fn reset_stats(accumulator: &mut StatsAccumulator, confirmation: &str) -> CommandResponse {
    if !confirmation.eq_ignore_ascii_case("confirm") {
        return CommandResponse {
            content: "To reset your stats, pass 'confirm'. This action cannot be undone!"
                .to_string(),
            mode: SendMode::Ephemeral,
        };
    }

    accumulator.reset();
    CommandResponse {
        content: "All your activity stats have been reset to zero.".to_string(),
        mode: SendMode::Ephemeral,
    }
}
