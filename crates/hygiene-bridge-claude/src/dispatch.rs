use std::io;
use std::path::Path;

use hygiene_store::FsStore;
use time::OffsetDateTime;

use crate::config::{HygieneConfig, Profile};
use crate::parse::HookInput;
use crate::{bootstrap, reminder};

// ── Hook Result ──

/// Result from a hook dispatch.
///
/// `stdout` is the JSON object for Claude Code; `None` means "no reminder" and
/// nothing at all is printed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HookResult {
    pub stdout: Option<String>,
}

impl HookResult {
    /// Construct a result with stdout.
    pub fn output(stdout: String) -> Self {
        Self {
            stdout: Some(stdout),
        }
    }

    /// Construct an empty result (no output, exit 0).
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<Option<String>> for HookResult {
    fn from(stdout: Option<String>) -> Self {
        Self { stdout }
    }
}

// ── Ignored ──

/// Why a hook produced nothing.
///
/// Every variant is handled the same way by the CLI: log at debug level, print
/// nothing, exit 0. The distinction only exists for logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum Ignored {
    #[error("empty hook payload")]
    EmptyPayload,
    #[error("malformed hook payload: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("cannot read hook payload: {0}")]
    Stdin(#[source] io::Error),
    #[error("project root unavailable: {0}")]
    ProjectRoot(#[source] io::Error),
    #[error("cannot read {name}: {source}")]
    Store {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot render hook output: {0}")]
    Render(#[source] serde_json::Error),
}

impl Ignored {
    pub(crate) fn store(name: &str, source: io::Error) -> Self {
        Self::Store {
            name: name.to_string(),
            source,
        }
    }
}

// ── Hook dispatch ──

/// Which handler the host invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// Bootstrap loader.
    SessionStart,
    /// Edit reminder.
    PostEdit,
    /// Route on the payload's `hook_event_name`.
    Auto,
}

/// Tools whose PostToolUse counts as a file mutation when routing on `Auto`.
const FILE_MUTATING_TOOLS: &[&str] = &["Edit", "Write", "MultiEdit", "NotebookEdit"];

/// Hook entrypoint: resolve the project root from the environment, then dispatch.
pub fn run_hook(
    kind: HookKind,
    stdin: &str,
    profile: Option<Profile>,
) -> Result<HookResult, Ignored> {
    let root = hygiene_store::project_root().map_err(Ignored::ProjectRoot)?;
    run_hook_in(
        kind,
        stdin,
        &root,
        profile,
        OffsetDateTime::now_utc(),
        |key| std::env::var(key).ok(),
    )
}

/// Dispatch against an explicit project root, clock, and env lookup.
///
/// The payload is validated before anything touches the filesystem, so malformed
/// input is ignored for both handlers.
pub fn run_hook_in(
    kind: HookKind,
    stdin: &str,
    root: &Path,
    profile: Option<Profile>,
    now: OffsetDateTime,
    env: impl Fn(&str) -> Option<String>,
) -> Result<HookResult, Ignored> {
    if stdin.trim().is_empty() {
        return Err(Ignored::EmptyPayload);
    }
    let input = HookInput::from_stdin(stdin).map_err(Ignored::Payload)?;
    let store = FsStore::open(root).map_err(Ignored::ProjectRoot)?;
    let config = HygieneConfig::resolve_with(root, profile, env);

    let kind = match kind {
        HookKind::Auto => match route(&input) {
            Some(k) => k,
            None => {
                tracing::debug!(
                    event = input.hook_event_name.as_deref().unwrap_or(""),
                    tool = input.tool_name.as_deref().unwrap_or(""),
                    "event not handled"
                );
                return Ok(HookResult::empty());
            }
        },
        k => k,
    };

    let outcome = match kind {
        HookKind::SessionStart => bootstrap::load(&store, &config)?,
        _ => reminder::check(&store, &config, &input.edit_event(), now)?,
    };

    match outcome {
        Some(r) => {
            tracing::debug!(
                event = %r.event,
                fragments = r.fragments.len(),
                profile = %config.profile,
                "reminder"
            );
            Ok(HookResult::output(r.to_json().map_err(Ignored::Render)?))
        }
        None => {
            tracing::debug!(profile = %config.profile, "nothing to report");
            Ok(HookResult::empty())
        }
    }
}

/// Pick a handler from the payload's event name (and tool, for PostToolUse).
fn route(input: &HookInput) -> Option<HookKind> {
    match input.hook_event_name.as_deref()? {
        "SessionStart" => Some(HookKind::SessionStart),
        "PostToolUse" => match input.tool_name.as_deref() {
            Some(tool) if !FILE_MUTATING_TOOLS.contains(&tool) => None,
            _ => Some(HookKind::PostEdit),
        },
        _ => None,
    }
}
