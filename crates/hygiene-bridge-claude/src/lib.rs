pub mod bootstrap;
pub mod config;
pub mod reminder;
pub mod render;

mod admin;
mod dispatch;
mod parse;

// Re-export public API (CLI consumers)
pub use admin::{doctor, install, uninstall};
pub use config::{HygieneConfig, Profile};
pub use dispatch::{run_hook, run_hook_in, HookKind, HookResult, Ignored};
pub use parse::{EditEvent, HookInput, ToolInput};
pub use render::{HookEvent, Reminder};
