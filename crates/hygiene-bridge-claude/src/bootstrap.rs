//! Session-start context assembly.

use hygiene_store::ProjectStore;

use crate::config::HygieneConfig;
use crate::dispatch::Ignored;
use crate::render::{self, HookEvent, Reminder};

/// Concatenate the persistence files (in configured order) plus the profile's primer.
///
/// Missing or whitespace-only files contribute nothing. Returns `None` when there is
/// neither file content nor a primer. A file that exists but cannot be read fails the
/// whole load.
pub fn load(store: &dyn ProjectStore, config: &HygieneConfig) -> Result<Option<Reminder>, Ignored> {
    let mut sections = Vec::new();
    for name in &config.persistence_files {
        if !store.exists(name) {
            continue;
        }
        let content = store
            .read_text(name)
            .map_err(|source| Ignored::store(name, source))?;
        let content = content.trim();
        if !content.is_empty() {
            sections.push(render::file_section(name, content));
        }
    }

    if let Some(primer) = &config.primer {
        sections.push(primer.clone());
    }

    Ok(Reminder::from_fragments(HookEvent::SessionStart, sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use hygiene_store::MemStore;
    use time::OffsetDateTime;

    fn store_with(files: &[(&str, &str)]) -> MemStore {
        let mut store = MemStore::new();
        for (name, content) in files {
            store.insert(name, content, OffsetDateTime::UNIX_EPOCH);
        }
        store
    }

    #[test]
    fn sections_follow_configured_order() {
        // Inserted out of order on purpose.
        let store = store_with(&[
            ("DECISIONS.md", "- use sqlite"),
            ("SESSION_STATE.md", "parser half done"),
            ("CLAUDE.md", "be terse"),
        ]);
        let config = HygieneConfig::for_profile(Profile::Baseline);
        let r = load(&store, &config).unwrap().unwrap();
        assert_eq!(r.event, HookEvent::SessionStart);
        assert_eq!(
            r.additional_context(),
            "=== CLAUDE.md ===\nbe terse\n\n\
             === SESSION_STATE.md ===\nparser half done\n\n\
             === DECISIONS.md ===\n- use sqlite"
        );
    }

    #[test]
    fn content_is_trimmed_and_blank_files_skipped() {
        let store = store_with(&[("CLAUDE.md", "\n\n  rules  \n"), ("SESSION_STATE.md", " \n\t")]);
        let config = HygieneConfig::for_profile(Profile::Baseline);
        let r = load(&store, &config).unwrap().unwrap();
        assert_eq!(r.fragments, vec!["=== CLAUDE.md ===\nrules".to_string()]);
    }

    #[test]
    fn baseline_with_nothing_emits_nothing() {
        let store = store_with(&[("SESSION_STATE.md", "")]);
        let config = HygieneConfig::for_profile(Profile::Baseline);
        assert!(load(&store, &config).unwrap().is_none());
    }

    #[test]
    fn strict_always_has_primer_last() {
        let config = HygieneConfig::for_profile(Profile::Strict);

        let empty = MemStore::new();
        let r = load(&empty, &config).unwrap().unwrap();
        assert_eq!(r.fragments, vec![render::SESSION_PRIMER.to_string()]);

        let store = store_with(&[("SESSION_STATE.md", "state")]);
        let r = load(&store, &config).unwrap().unwrap();
        assert_eq!(r.fragments.len(), 2);
        assert_eq!(r.fragments[0], "=== SESSION_STATE.md ===\nstate");
        assert_eq!(r.fragments[1], render::SESSION_PRIMER);
    }

    #[test]
    fn unreadable_file_fails_the_load() {
        let mut store = store_with(&[("CLAUDE.md", "rules")]);
        store.insert_unreadable("DECISIONS.md");
        let config = HygieneConfig::for_profile(Profile::Strict);
        let err = load(&store, &config).unwrap_err();
        assert!(err.to_string().contains("DECISIONS.md"));
    }

    #[test]
    fn unlisted_files_are_not_loaded() {
        let store = store_with(&[("NOTES.md", "scratch")]);
        let config = HygieneConfig::for_profile(Profile::Baseline);
        assert!(load(&store, &config).unwrap().is_none());
    }

    #[test]
    fn repeated_loads_are_identical() {
        let store = store_with(&[("CLAUDE.md", "a"), ("DECISIONS.md", "b")]);
        let config = HygieneConfig::for_profile(Profile::Strict);
        let first = load(&store, &config).unwrap().unwrap().to_json().unwrap();
        let second = load(&store, &config).unwrap().unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }
}
