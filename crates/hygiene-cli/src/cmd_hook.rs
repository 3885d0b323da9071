use std::io::Read;

use hygiene_bridge_claude::{HookKind, Ignored, Profile};

/// `hygiene hook <kind>` — read stdin, dispatch, print at most one JSON object.
///
/// Always returns `Ok`: an ignored hook prints nothing and the process exits 0.
pub fn execute(kind: HookKind, profile: Option<Profile>) -> anyhow::Result<()> {
    match dispatch(kind, profile) {
        Ok(result) => {
            if let Some(output) = &result.stdout {
                tracing::debug!(?kind, bytes = output.len(), "hook output");
                print!("{output}");
            } else {
                tracing::debug!(?kind, "hook ok (no output)");
            }
        }
        Err(e) => {
            // Exit 0 on internal errors — never block the host agent
            tracing::debug!(?kind, error = %e, "hook ignored");
        }
    }
    Ok(())
}

fn dispatch(
    kind: HookKind,
    profile: Option<Profile>,
) -> Result<hygiene_bridge_claude::HookResult, Ignored> {
    let mut stdin_buf = String::new();
    std::io::stdin()
        .read_to_string(&mut stdin_buf)
        .map_err(Ignored::Stdin)?;
    tracing::debug!(bytes = stdin_buf.len(), "stdin");
    hygiene_bridge_claude::run_hook(kind, &stdin_buf, profile)
}
