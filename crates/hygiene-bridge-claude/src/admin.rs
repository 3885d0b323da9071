use std::fs;
use std::path::{Path, PathBuf};

use hygiene_store::{FsStore, ProjectStore};
use time::OffsetDateTime;

use crate::config::{HygieneConfig, Profile};
use crate::reminder;

// ── Install / Uninstall ──

const HOOK_COMMAND_PREFIX: &str = "hygiene hook";

/// Hook events hygiene manages: (event, matcher, hook subcommand).
const HOOKS: &[(&str, &str, &str)] = &[
    ("SessionStart", "", "session-start"),
    ("PostToolUse", "Edit|Write|MultiEdit", "post-edit"),
];

fn hook_command(subcommand: &str, profile: Profile) -> String {
    match profile {
        Profile::Baseline => format!("{HOOK_COMMAND_PREFIX} {subcommand}"),
        Profile::Strict => format!("{HOOK_COMMAND_PREFIX} {subcommand} --profile strict"),
    }
}

/// Check if a matcher group (Claude Code hook format) contains a hygiene hook.
fn matcher_group_contains_hygiene(group: &serde_json::Value) -> bool {
    // { "matcher": "", "hooks": [{ "type": "command", "command": "hygiene hook ..." }] }
    if let Some(hooks_arr) = group.get("hooks").and_then(|h| h.as_array()) {
        return hooks_arr.iter().any(|hook| {
            hook.get("command")
                .and_then(|c| c.as_str())
                .is_some_and(|cmd| cmd.contains(HOOK_COMMAND_PREFIX))
        });
    }
    // Legacy format: plain command string
    group
        .as_str()
        .is_some_and(|s| s.contains(HOOK_COMMAND_PREFIX))
}

fn settings_path(repo_root: &Path) -> PathBuf {
    repo_root.join(".claude").join("settings.local.json")
}

/// Install hygiene hooks into `.claude/settings.local.json`.
///
/// Foreign matcher groups are preserved; previously installed hygiene groups are
/// replaced, so switching profiles is a re-install.
pub fn install(repo_root: &Path, profile: Profile) -> anyhow::Result<()> {
    let path = settings_path(repo_root);

    let mut settings: serde_json::Value = if path.exists() {
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).unwrap_or_else(|_| serde_json::json!({}))
    } else {
        serde_json::json!({})
    };

    // Backup existing file
    if path.exists() {
        let ts = backup_timestamp()?;
        let backup = path.with_extension(format!("json.hygiene.bak.{ts}"));
        fs::copy(&path, &backup)?;
    }

    let hooks_obj = settings
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("settings is not an object"))?
        .entry("hooks")
        .or_insert_with(|| serde_json::json!({}))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("hooks is not an object"))?;

    for (event_name, matcher, subcommand) in HOOKS {
        let group = serde_json::json!({
            "matcher": matcher,
            "hooks": [
                {
                    "type": "command",
                    "command": hook_command(subcommand, profile)
                }
            ]
        });

        let existing = hooks_obj.get(*event_name).and_then(|v| v.as_array()).cloned();
        let mut groups: Vec<serde_json::Value> = existing
            .unwrap_or_default()
            .into_iter()
            .filter(|g| !matcher_group_contains_hygiene(g))
            .collect();
        groups.push(group);

        hooks_obj.insert(event_name.to_string(), serde_json::Value::Array(groups));
    }

    let output = serde_json::to_string_pretty(&settings)?;
    hygiene_store::write_atomic(&path, output.as_bytes())?;

    println!(
        "Installed hygiene hooks ({profile} profile) into {}",
        path.display()
    );
    Ok(())
}

/// Uninstall hygiene hooks from `.claude/settings.local.json`.
pub fn uninstall(repo_root: &Path) -> anyhow::Result<()> {
    let path = settings_path(repo_root);

    if !path.exists() {
        println!("No settings file found at {}", path.display());
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let mut settings: serde_json::Value = serde_json::from_str(&content)?;

    if let Some(hooks) = settings
        .as_object_mut()
        .and_then(|obj| obj.get_mut("hooks"))
        .and_then(|h| h.as_object_mut())
    {
        for (event_name, _, _) in HOOKS {
            if let Some(arr) = hooks.get(*event_name).and_then(|v| v.as_array()).cloned() {
                let filtered: Vec<serde_json::Value> = arr
                    .into_iter()
                    .filter(|v| !matcher_group_contains_hygiene(v))
                    .collect();
                if filtered.is_empty() {
                    hooks.remove(*event_name);
                } else {
                    hooks.insert(event_name.to_string(), serde_json::Value::Array(filtered));
                }
            }
        }
    }

    let output = serde_json::to_string_pretty(&settings)?;
    hygiene_store::write_atomic(&path, output.as_bytes())?;

    println!("Uninstalled hygiene hooks from {}", path.display());
    Ok(())
}

fn backup_timestamp() -> anyhow::Result<String> {
    let now = OffsetDateTime::now_utc()
        .replace_nanosecond(0)?
        .format(&time::format_description::well_known::Rfc3339)?;
    Ok(now.replace(':', "-"))
}

// ── Doctor ──

/// Print `[OK]`/`[WARN]` lines for the binary, the installed hooks, and each
/// persistence file.
pub fn doctor(repo_root: &Path, config: &HygieneConfig) -> anyhow::Result<()> {
    let in_path = which_hygiene();
    println!(
        "[{}] hygiene in PATH: {}",
        status(in_path.is_some()),
        in_path.unwrap_or_else(|| "not found".into())
    );

    let path = settings_path(repo_root);
    let has_hooks = fs::read_to_string(&path)
        .map(|content| content.contains(HOOK_COMMAND_PREFIX))
        .unwrap_or(false);
    println!("[{}] hooks in {}", status(has_hooks), path.display());

    let store = FsStore::open(repo_root)?;
    for name in &config.persistence_files {
        println!("[{}] {name}", status(store.exists(name)));
    }

    if store.exists(&config.state_file) {
        let stale = reminder::state_is_stale(&store, config, OffsetDateTime::now_utc())?;
        println!(
            "[{}] {} updated within {}s",
            status(!stale),
            config.state_file,
            config.stale_after.whole_seconds()
        );
    }

    Ok(())
}

fn status(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "WARN"
    }
}

fn which_hygiene() -> Option<String> {
    let path_var = std::env::var_os("PATH")?;
    let exe_name = if cfg!(windows) {
        "hygiene.exe"
    } else {
        "hygiene"
    };
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(exe_name))
        .find(|candidate| candidate.is_file())
        .map(|p| p.to_string_lossy().to_string())
}
