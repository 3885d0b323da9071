//! Hook output rendering: the fixed message texts and the `hookSpecificOutput` envelope.

use std::fmt;

use serde::Serialize;

// ── Hook Output ──

/// Hook event a reminder answers; serialized as Claude Code's `hookEventName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HookEvent {
    SessionStart,
    PostToolUse,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionStart => f.write_str("SessionStart"),
            Self::PostToolUse => f.write_str("PostToolUse"),
        }
    }
}

/// Advisory text to inject into the assistant's next turn.
///
/// Only built when at least one fragment triggered; "no reminder" is `None`, never
/// an empty `Reminder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub event: HookEvent,
    pub fragments: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HookOutput<'a> {
    hook_specific_output: HookSpecificOutput<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HookSpecificOutput<'a> {
    hook_event_name: HookEvent,
    additional_context: &'a str,
}

impl Reminder {
    /// Wrap fragments into a reminder; `None` when there is nothing to say.
    pub fn from_fragments(event: HookEvent, fragments: Vec<String>) -> Option<Self> {
        if fragments.is_empty() {
            None
        } else {
            Some(Self { event, fragments })
        }
    }

    /// Fragments joined by a blank line.
    pub fn additional_context(&self) -> String {
        self.fragments.join("\n\n")
    }

    /// The JSON object written to the hook's stdout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let context = self.additional_context();
        serde_json::to_string(&HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: self.event,
                additional_context: &context,
            },
        })
    }
}

// ── Session Start ──

/// One persistence file as a labeled bootstrap section.
pub fn file_section(name: &str, content: &str) -> String {
    format!("=== {name} ===\n{content}")
}

/// Priming section the strict profile appends at session start: a forced
/// time-box question and a forced definition-of-done question.
pub const SESSION_PRIMER: &str = "=== SESSION PRIMER ===\n\
\n\
**PARKINSON'S BUSTER:** You have half the time you think you need. What do you cut? \
What's the minimum viable path?\n\
\n\
**EXIT CRITERIA:** Before doing anything, write down: \"I am done when ___.\" \
If you can't complete that sentence, clarify with the user first.\n\
\n\
Now proceed.";

// ── Post Edit ──

/// Baseline staleness nudge.
pub fn stale_reminder(state_file: &str, decisions_file: &str) -> String {
    format!("Remember: Update {state_file} and {decisions_file} if needed.")
}

/// Strict staleness nudge.
pub fn stale_reminder_strict(state_file: &str, decisions_file: &str) -> String {
    format!(
        "**PERSISTENCE:** Update {state_file} with current progress. \
         Update {decisions_file} if you made any calls."
    )
}

/// Size warning for a whole-file write longer than `max_lines`.
pub fn complexity_tax(max_lines: usize) -> String {
    format!(
        "**COMPLEXITY TAX:** This file is >{max_lines} lines. Can it be split? \
         Large files are where bugs hide."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragments_is_no_reminder() {
        assert!(Reminder::from_fragments(HookEvent::PostToolUse, vec![]).is_none());
    }

    #[test]
    fn to_json_uses_claude_code_shape() {
        let r = Reminder::from_fragments(
            HookEvent::PostToolUse,
            vec!["first".into(), "second".into()],
        )
        .unwrap();
        let out: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(
            out,
            serde_json::json!({
                "hookSpecificOutput": {
                    "hookEventName": "PostToolUse",
                    "additionalContext": "first\n\nsecond"
                }
            })
        );
    }

    #[test]
    fn session_start_event_name() {
        let r = Reminder::from_fragments(HookEvent::SessionStart, vec!["x".into()]).unwrap();
        assert!(r.to_json().unwrap().contains(r#""hookEventName":"SessionStart""#));
        assert_eq!(HookEvent::SessionStart.to_string(), "SessionStart");
    }

    #[test]
    fn message_texts() {
        assert_eq!(
            stale_reminder("SESSION_STATE.md", "DECISIONS.md"),
            "Remember: Update SESSION_STATE.md and DECISIONS.md if needed."
        );
        assert_eq!(
            stale_reminder_strict("SESSION_STATE.md", "DECISIONS.md"),
            "**PERSISTENCE:** Update SESSION_STATE.md with current progress. \
             Update DECISIONS.md if you made any calls."
        );
        assert_eq!(
            complexity_tax(200),
            "**COMPLEXITY TAX:** This file is >200 lines. Can it be split? \
             Large files are where bugs hide."
        );
        assert_eq!(file_section("CLAUDE.md", "rules"), "=== CLAUDE.md ===\nrules");
    }

    #[test]
    fn primer_carries_both_directives() {
        assert!(SESSION_PRIMER.starts_with("=== SESSION PRIMER ==="));
        assert!(SESSION_PRIMER.contains("PARKINSON'S BUSTER"));
        assert!(SESSION_PRIMER.contains("I am done when ___."));
        assert!(SESSION_PRIMER.ends_with("Now proceed."));
    }
}
