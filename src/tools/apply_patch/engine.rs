use super::applying::apply_all_hunks;
use super::blocks::extract_blocks;
use super::detect::is_already_applied;
use super::error::PatchError;
use super::model::Outcome;
use super::parsing::{STRATEGIES, parse_loose};
use crate::tools::workspace::Workspace;

/// Pure stage for one block: run the grammar cascade against `original`.
///
/// Strict, then unified; when both fail, a block whose effect is already present is
/// reported as such, otherwise the loose grammar gets the last word. If that fails too
/// the error carries both the strict and the loose failure.
pub fn patch_text(original: &str, body: &str) -> Result<Outcome, PatchError> {
    let mut first_err: Option<PatchError> = None;
    for (grammar, parse) in STRATEGIES {
        match parse(body).and_then(|hunks| apply_all_hunks(original, &hunks)) {
            Ok(text) => {
                tracing::trace!(grammar, "hunks applied");
                return Ok(Outcome::Patched(text));
            }
            Err(e) => {
                tracing::trace!(grammar, error = %e, "grammar did not apply");
                first_err.get_or_insert(e);
            }
        }
    }

    let hunks = parse_loose(body);
    if is_already_applied(original, &hunks) {
        return Ok(Outcome::AlreadyApplied);
    }
    if hunks.is_empty() {
        return Err(PatchError::NothingRecognized);
    }
    apply_all_hunks(original, &hunks)
        .map(Outcome::Patched)
        .map_err(|fallback| match first_err {
            Some(strict) => PatchError::Exhausted {
                strict: Box::new(strict),
                fallback: Box::new(fallback),
            },
            None => fallback,
        })
}

/// Apply every block of `document` to files in `workspace`.
///
/// Each block is read once, computed in memory and written at most once, and only when
/// the text changed. Blocks are independent: a failure leaves earlier writes in place.
pub fn apply_patch<W: Workspace + ?Sized>(document: &str, workspace: &W) -> Result<(), PatchError> {
    let blocks = extract_blocks(document).map_err(|e| PatchError::Header(Box::new(e)))?;

    for block in blocks {
        let path = workspace.resolve(&block.target_path);
        let original = workspace
            .read_text(&path)
            .map_err(|e| PatchError::read(path.clone(), e))?;

        match patch_text(&original, &block.body)? {
            Outcome::AlreadyApplied => {
                tracing::debug!(path = %path.display(), "already applied, skipping");
            }
            Outcome::Patched(text) if text == original => {
                tracing::debug!(path = %path.display(), "no changes");
            }
            Outcome::Patched(text) => {
                workspace
                    .write_text(&path, &text)
                    .map_err(|e| PatchError::write(path.clone(), e))?;
                tracing::debug!(path = %path.display(), "patched");
            }
        }
    }
    Ok(())
}
