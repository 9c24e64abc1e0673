use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Excerpt, ExcerptKind};
use crate::prefs::{self, PreferencesStore};

pub fn show<P: PreferencesStore>(prefs: &P) -> Result<CmdResult> {
    let kind = prefs::initial_kind(prefs)?;
    let mut result = CmdResult::default().with_kind(kind);
    result.add_message(CmdMessage::info(kind.to_string()));
    Ok(result)
}

/// Changes the kind of the excerpt being edited and remembers it for next time.
pub fn set<P: PreferencesStore>(
    prefs: &mut P,
    excerpt: &mut Excerpt,
    kind: ExcerptKind,
) -> Result<CmdResult> {
    excerpt.kind = kind;
    prefs::remember_kind(prefs, kind)?;
    let mut result = CmdResult::default()
        .with_kind(kind)
        .with_excerpt(excerpt.clone());
    result.add_message(CmdMessage::success(format!("Excerpt kind set to {}", kind)));
    Ok(result)
}
