//! Profiles and configuration for both hooks.
//!
//! Every knob resolves env var → `.claude/hygiene.json` → profile default.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use time::Duration;

use crate::render;

/// Instructions file, read first at session start.
pub const INSTRUCTIONS_FILE: &str = "CLAUDE.md";
/// Rolling session snapshot; its mtime is the staleness clock.
pub const STATE_FILE: &str = "SESSION_STATE.md";
/// Append-style decision log.
pub const DECISIONS_FILE: &str = "DECISIONS.md";

/// Default persistence files, in bootstrap order.
pub const PERSISTENCE_FILES: &[&str] = &[INSTRUCTIONS_FILE, STATE_FILE, DECISIONS_FILE];

const BASELINE_STALE_SECS: i64 = 180; // 3 minutes
const STRICT_STALE_SECS: i64 = 300; // 5 minutes
const STRICT_MAX_LINES: usize = 200;

/// Project config file, relative to the project root.
pub const CONFIG_FILE: &str = ".claude/hygiene.json";

/// Parameter set shared by the bootstrap loader and the edit reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Loads persistence files; nags after 3 minutes of state drift.
    #[default]
    Baseline,
    /// Adds the session primer and the size check; nags after 5 minutes.
    Strict,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown profile '{other}' (expected 'baseline' or 'strict')"
            )),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HygieneConfig {
    pub profile: Profile,
    /// Ordered persistence file names; edits to paths containing any of them never nag.
    pub persistence_files: Vec<String>,
    pub state_file: String,
    pub decisions_file: String,
    /// State older than this (strictly) is stale.
    pub stale_after: Duration,
    /// Whole-file writes longer than this pay the complexity tax. `None` disables.
    pub max_lines: Option<usize>,
    /// Section appended unconditionally at session start.
    pub primer: Option<String>,
}

impl HygieneConfig {
    /// Built-in defaults for a profile.
    pub fn for_profile(profile: Profile) -> Self {
        let strict = profile == Profile::Strict;
        Self {
            profile,
            persistence_files: PERSISTENCE_FILES.iter().map(|s| s.to_string()).collect(),
            state_file: STATE_FILE.to_string(),
            decisions_file: DECISIONS_FILE.to_string(),
            stale_after: Duration::seconds(if strict {
                STRICT_STALE_SECS
            } else {
                BASELINE_STALE_SECS
            }),
            max_lines: strict.then_some(STRICT_MAX_LINES),
            primer: strict.then(|| render::SESSION_PRIMER.to_string()),
        }
    }

    /// Resolve from the process environment and the project config file.
    pub fn resolve(root: &Path, cli_profile: Option<Profile>) -> Self {
        Self::resolve_with(root, cli_profile, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit env lookup.
    pub fn resolve_with(
        root: &Path,
        cli_profile: Option<Profile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let file = read_config_file(root);
        let lookup = |key: &str| file.as_ref().and_then(|v| config_value(v, key));

        let profile = cli_profile
            .or_else(|| env("HYGIENE_PROFILE").and_then(|v| v.parse().ok()))
            .or_else(|| lookup("profile").and_then(|v| v.as_str()?.parse().ok()))
            .unwrap_or_default();
        let mut config = Self::for_profile(profile);

        if let Some(files) = lookup("persistence_files").and_then(|v| string_list(&v)) {
            config.persistence_files = files;
        }
        if let Some(name) = lookup("state_file").and_then(|v| v.as_str().map(String::from)) {
            config.state_file = name;
        }
        if let Some(name) = lookup("decisions_file").and_then(|v| v.as_str().map(String::from)) {
            config.decisions_file = name;
        }

        let stale_secs = env("HYGIENE_STALE_SECS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .or_else(|| lookup("reminder.stale_after_secs").and_then(|v| v.as_i64()));
        if let Some(secs) = stale_secs.filter(|s| *s >= 0) {
            config.stale_after = Duration::seconds(secs);
        }

        let max_lines = env("HYGIENE_MAX_LINES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .or_else(|| {
                lookup("reminder.max_lines")
                    .and_then(|v| v.as_u64())
                    .map(|v| v as usize)
            });
        if let Some(n) = max_lines {
            // 0 turns the size check off.
            config.max_lines = (n > 0).then_some(n);
        }

        if let Some(on) = lookup("bootstrap.primer").and_then(|v| v.as_bool()) {
            config.primer = on.then(|| render::SESSION_PRIMER.to_string());
        }

        config
    }

    /// Whether an edited path is itself one of the persistence files, the state
    /// file, or the decisions log.
    pub fn is_persistence_path(&self, file_path: &str) -> bool {
        self.persistence_files
            .iter()
            .chain([&self.state_file, &self.decisions_file])
            .any(|name| !name.is_empty() && file_path.contains(name.as_str()))
    }
}

// ── Config File ──

/// Parse `.claude/hygiene.json`; missing or malformed files read as absent.
fn read_config_file(root: &Path) -> Option<serde_json::Value> {
    let content = fs::read_to_string(root.join(CONFIG_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Look up a dot-notation key (`reminder.max_lines`).
fn config_value(root: &serde_json::Value, key: &str) -> Option<serde_json::Value> {
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current.clone())
}

fn string_list(v: &serde_json::Value) -> Option<Vec<String>> {
    v.as_array()?
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}
