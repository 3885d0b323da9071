use std::path::Path;

use hygiene_bridge_claude::{HygieneConfig, Profile};

/// `hygiene bridge install`
pub fn install(repo_root: &Path, profile: Profile) -> anyhow::Result<()> {
    hygiene_bridge_claude::install(repo_root, profile)
}

/// `hygiene bridge uninstall`
pub fn uninstall(repo_root: &Path) -> anyhow::Result<()> {
    hygiene_bridge_claude::uninstall(repo_root)
}

/// `hygiene doctor`
pub fn doctor(repo_root: &Path, profile: Option<Profile>) -> anyhow::Result<()> {
    let config = HygieneConfig::resolve(repo_root, profile);
    hygiene_bridge_claude::doctor(repo_root, &config)
}
