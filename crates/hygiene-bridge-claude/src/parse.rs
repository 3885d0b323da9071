use serde::Deserialize;

// ── Hook stdin parsing ──

/// Fields of the Claude Code hook payload that the hooks consume.
///
/// Claude Code sends snake_case, some wrappers forward camelCase; both are accepted.
/// Everything not listed here is ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct HookInput {
    #[serde(default, alias = "hookEventName")]
    pub hook_event_name: Option<String>,
    #[serde(default, alias = "toolName")]
    pub tool_name: Option<String>,
    #[serde(default, alias = "toolInput")]
    pub tool_input: Option<ToolInput>,
    /// Present on PostToolUse, never inspected.
    #[serde(default, alias = "toolResponse")]
    pub tool_response: Option<serde_json::Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ToolInput {
    #[serde(default, alias = "filePath")]
    pub file_path: Option<String>,
    /// Full file body; only whole-file writes carry it.
    #[serde(default)]
    pub content: Option<String>,
}

/// The slice of a PostToolUse payload the edit reminder looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent<'a> {
    pub file_path: &'a str,
    pub content: Option<&'a str>,
}

impl HookInput {
    /// Parse a hook payload. The top level must be a JSON object.
    pub(crate) fn from_stdin(stdin: &str) -> Result<Self, serde_json::Error> {
        let val: serde_json::Value = serde_json::from_str(stdin)?;
        if !val.is_object() {
            return Err(serde::de::Error::custom("hook payload is not a JSON object"));
        }
        serde_json::from_value(val)
    }

    /// View this payload as an edit. A missing `file_path` reads as the empty path.
    pub fn edit_event(&self) -> EditEvent<'_> {
        let tool_input = self.tool_input.as_ref();
        EditEvent {
            file_path: tool_input
                .and_then(|ti| ti.file_path.as_deref())
                .unwrap_or(""),
            content: tool_input.and_then(|ti| ti.content.as_deref()),
        }
    }
}
