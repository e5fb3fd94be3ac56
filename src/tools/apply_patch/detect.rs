use super::model::Hunk;

/// Heuristic: every hunk that adds something has its new text present in `original`
/// and its old text gone. Pure deletions cannot prove anything and are skipped.
///
/// New text that happens to exist in the file for unrelated reasons yields a false
/// positive; callers accept that in exchange for idempotent resubmission.
pub fn is_already_applied(original: &str, hunks: &[Hunk]) -> bool {
    if hunks.is_empty() {
        return false;
    }
    hunks.iter().all(|h| {
        let old = h.old_text.trim_matches('\n');
        let new = h.new_text.trim_matches('\n');
        if new.is_empty() {
            return true;
        }
        original.contains(new) && (old.is_empty() || !original.contains(old))
    })
}
