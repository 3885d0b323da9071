use std::path::Path;

use anyhow::Context;
use hygiene_bridge_claude::{reminder, HygieneConfig, Profile};
use hygiene_store::{FsStore, ProjectStore};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
struct FileStatus {
    name: String,
    present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age_secs: Option<i64>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    profile: String,
    stale_after_secs: i64,
    max_lines: Option<usize>,
    state_file: String,
    state_stale: bool,
    files: Vec<FileStatus>,
}

/// `hygiene status`
pub fn execute(repo_root: &Path, profile: Option<Profile>, json: bool) -> anyhow::Result<()> {
    let store = FsStore::open(repo_root)
        .with_context(|| format!("cannot open project root {}", repo_root.display()))?;
    let config = HygieneConfig::resolve(repo_root, profile);
    let report = build_report(&store, &config, OffsetDateTime::now_utc())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Profile: {} (stale after {}s, size check: {})",
        report.profile,
        report.stale_after_secs,
        report
            .max_lines
            .map(|n| format!(">{n} lines"))
            .unwrap_or_else(|| "off".into())
    );
    for f in &report.files {
        match (f.bytes, f.age_secs) {
            (Some(bytes), Some(age)) => {
                println!("  {:<20} {bytes} bytes, {}", f.name, format_age(age))
            }
            _ => println!("  {:<20} (missing)", f.name),
        }
    }
    if report.state_stale {
        println!("{} is stale.", report.state_file);
    }
    Ok(())
}

fn build_report(
    store: &dyn ProjectStore,
    config: &HygieneConfig,
    now: OffsetDateTime,
) -> anyhow::Result<StatusReport> {
    let mut files = Vec::new();
    for name in &config.persistence_files {
        if !store.exists(name) {
            files.push(FileStatus {
                name: name.clone(),
                present: false,
                bytes: None,
                age_secs: None,
            });
            continue;
        }
        let content = store
            .read_text(name)
            .with_context(|| format!("cannot read {name}"))?;
        let modified = store
            .last_modified(name)
            .with_context(|| format!("cannot stat {name}"))?;
        files.push(FileStatus {
            name: name.clone(),
            present: true,
            bytes: Some(content.len()),
            age_secs: Some((now - modified).whole_seconds()),
        });
    }

    Ok(StatusReport {
        profile: config.profile.to_string(),
        stale_after_secs: config.stale_after.whole_seconds(),
        max_lines: config.max_lines,
        state_file: config.state_file.clone(),
        state_stale: reminder::state_is_stale(store, config, now)?,
        files,
    })
}

fn format_age(secs: i64) -> String {
    match secs {
        s if s < 0 => "modified in the future".into(),
        s if s < 60 => format!("{s}s ago"),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86_400),
    }
}
