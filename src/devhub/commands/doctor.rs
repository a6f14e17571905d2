use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Prunes invariant violations left behind by older snapshots.
pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>) -> Result<CmdResult> {
    let report = store.repair()?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    if report.dangling_comments > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - Removed {} comment(s) pointing at deleted posts.",
            report.dangling_comments
        )));
    }
    if report.orphan_favorites > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - Dropped {} favorite(s) referencing no post.",
            report.orphan_favorites
        )));
    }
    if report.duplicate_ids > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - Deduplicated {} entry(ies) sharing an id.",
            report.duplicate_ids
        )));
    }
    Ok(result)
}
