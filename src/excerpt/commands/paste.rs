use crate::clipboard::normalize_line_endings;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Excerpt;
use crate::paste::{PasteOutcome, apply_paste};

/// Imports a Books excerpt into `excerpt`. Empty input changes nothing and
/// says so quietly; unrecognized input is an error.
pub fn run(excerpt: &mut Excerpt, raw: &str) -> Result<CmdResult> {
    let raw = normalize_line_endings(raw);
    let mut result = CmdResult::default();

    let outcome = apply_paste(excerpt, &raw)?;
    match outcome {
        PasteOutcome::Applied => {
            result.add_message(CmdMessage::success(format!(
                "Imported excerpt from {}",
                excerpt.share_title()
            )));
        }
        PasteOutcome::Unchanged => {
            result.add_message(CmdMessage::info("Nothing pasted"));
        }
    }

    Ok(result
        .with_excerpt(excerpt.clone())
        .with_paste_outcome(outcome))
}
