//! Edit-time reminders: the complexity tax on oversized writes and the nag to
//! refresh session state once it has drifted.

use hygiene_store::ProjectStore;
use time::{Duration, OffsetDateTime};

use crate::config::{HygieneConfig, Profile};
use crate::dispatch::Ignored;
use crate::parse::EditEvent;
use crate::render::{self, HookEvent, Reminder};

/// Check one file edit. Size warning first, then staleness; either, both, or neither.
///
/// Edits to persistence files never produce a reminder.
pub fn check(
    store: &dyn ProjectStore,
    config: &HygieneConfig,
    edit: &EditEvent<'_>,
    now: OffsetDateTime,
) -> Result<Option<Reminder>, Ignored> {
    if config.is_persistence_path(edit.file_path) {
        return Ok(None);
    }

    let mut warnings = Vec::new();

    if let (Some(max), Some(content)) = (config.max_lines, edit.content) {
        if exceeds_line_limit(content, max) {
            warnings.push(render::complexity_tax(max));
        }
    }

    if state_is_stale(store, config, now)? {
        warnings.push(match config.profile {
            Profile::Baseline => render::stale_reminder(&config.state_file, &config.decisions_file),
            Profile::Strict => {
                render::stale_reminder_strict(&config.state_file, &config.decisions_file)
            }
        });
    }

    Ok(Reminder::from_fragments(HookEvent::PostToolUse, warnings))
}

/// Whether the state file exists and was last written more than `stale_after` ago.
pub fn state_is_stale(
    store: &dyn ProjectStore,
    config: &HygieneConfig,
    now: OffsetDateTime,
) -> Result<bool, Ignored> {
    if !store.exists(&config.state_file) {
        return Ok(false);
    }
    let modified = store
        .last_modified(&config.state_file)
        .map_err(|source| Ignored::store(&config.state_file, source))?;
    Ok(is_stale(modified, now, config.stale_after))
}

/// Strictly older than `threshold`. Exactly at the threshold is not yet stale, and
/// a modification time in the future never is.
pub fn is_stale(modified: OffsetDateTime, now: OffsetDateTime, threshold: Duration) -> bool {
    now - modified > threshold
}

/// Line count as `content.split('\n')`: a trailing newline adds an empty last line.
pub fn exceeds_line_limit(content: &str, max_lines: usize) -> bool {
    content.split('\n').count() > max_lines
}
