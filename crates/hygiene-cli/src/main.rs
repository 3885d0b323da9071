mod cmd_bridge;
mod cmd_hook;
mod cmd_status;

use clap::{Parser, Subcommand};
use hygiene_bridge_claude::{HookKind, Profile};

#[derive(Parser)]
#[command(
    name = "hygiene",
    version,
    about = "Session bootstrap and persistence reminders for coding agents"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hook entrypoint (called by Claude Code hooks; reads stdin JSON, always exits 0)
    Hook {
        #[command(subcommand)]
        cmd: HookCmd,
        /// Profile: baseline or strict (overrides HYGIENE_PROFILE and .claude/hygiene.json)
        #[arg(long, global = true)]
        profile: Option<Profile>,
    },
    /// Bridge operations (install/uninstall hooks for Claude Code)
    Bridge {
        #[command(subcommand)]
        cmd: BridgeCmd,
    },
    /// Health check for the hook integration
    Doctor {
        /// Profile to evaluate staleness with
        #[arg(long)]
        profile: Option<Profile>,
    },
    /// Show persistence files and whether session state is stale
    Status {
        /// Profile to evaluate staleness with
        #[arg(long)]
        profile: Option<Profile>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum HookCmd {
    /// SessionStart: load persistence files into context
    SessionStart,
    /// PostToolUse (Edit|Write): size and staleness reminders
    PostEdit,
    /// Route on the payload's hook_event_name
    Claude,
}

#[derive(Subcommand)]
enum BridgeCmd {
    /// Install hygiene hooks into .claude/settings.local.json
    Install {
        /// Profile the installed hooks run with
        #[arg(long, default_value = "baseline")]
        profile: Profile,
    },
    /// Uninstall hygiene hooks from .claude/settings.local.json
    Uninstall,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // A hook must never fail the host, not even on a bad flag.
        Err(e) if is_hook_invocation() => {
            tracing::debug!(error = %e, "hook arguments rejected");
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    match cli.cmd {
        Command::Hook { cmd, profile } => {
            let kind = match cmd {
                HookCmd::SessionStart => HookKind::SessionStart,
                HookCmd::PostEdit => HookKind::PostEdit,
                HookCmd::Claude => HookKind::Auto,
            };
            cmd_hook::execute(kind, profile)
        }
        Command::Bridge { cmd } => {
            let repo_root = hygiene_store::project_root()?;
            match cmd {
                BridgeCmd::Install { profile } => cmd_bridge::install(&repo_root, profile),
                BridgeCmd::Uninstall => cmd_bridge::uninstall(&repo_root),
            }
        }
        Command::Doctor { profile } => {
            let repo_root = hygiene_store::project_root()?;
            cmd_bridge::doctor(&repo_root, profile)
        }
        Command::Status { profile, json } => {
            let repo_root = hygiene_store::project_root()?;
            cmd_status::execute(&repo_root, profile, json)
        }
    }
}

fn is_hook_invocation() -> bool {
    std::env::args_os().nth(1).is_some_and(|arg| arg == "hook")
}

/// Debug logging goes to a temp file, never to the hook's stdout or stderr.
/// Enabled by `HYGIENE_DEBUG`; filter via `HYGIENE_LOG` (default `debug`).
fn init_tracing() {
    if std::env::var_os("HYGIENE_DEBUG").is_none() {
        return;
    }
    let log_path = std::env::temp_dir().join("hygiene-hook-debug.log");
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("HYGIENE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
