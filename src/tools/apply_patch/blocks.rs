use super::error::PatchError;
use super::model::PatchBlock;
use super::text::normalize_eol;

const BEGIN_MARKER: &str = "*** Begin Patch";
const END_MARKER: &str = "*** End Patch";
const UPDATE_DIRECTIVE: &str = "*** Update File:";

/// Split a patch document into per-file blocks.
///
/// Every block must name its target with `*** Update File:`; one block without it fails
/// the whole document. Markers are matched as line prefixes and are not nested: a begin
/// marker inside a block is an ordinary body line.
pub fn extract_blocks(document: &str) -> Result<Vec<PatchBlock>, PatchError> {
    let src = normalize_eol(document);
    let lines: Vec<&str> = src.lines().collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !lines[i].starts_with(BEGIN_MARKER) {
            i += 1;
            continue;
        }
        i += 1;

        let mut body: Vec<String> = Vec::new();
        let mut target_path: Option<String> = None;
        while i < lines.len() && !lines[i].starts_with(END_MARKER) {
            let line = lines[i];
            if let Some(rest) = line.strip_prefix(UPDATE_DIRECTIVE) {
                let path = rest.trim().to_string();
                body.push(format!("--- a/{path}"));
                body.push(format!("+++ b/{path}"));
                target_path = Some(path);
            } else {
                body.push(line.to_string());
            }
            i += 1;
        }
        // step over the end marker, if the block had one
        if i < lines.len() {
            i += 1;
        }

        let target_path = match target_path {
            Some(path) if !path.is_empty() => path,
            _ => return Err(PatchError::MissingUpdateDirective),
        };
        let mut body = body.join("\n");
        body.push('\n');
        blocks.push(PatchBlock { target_path, body });
    }

    if blocks.is_empty() {
        return Err(PatchError::NoBlocks);
    }
    tracing::trace!(count = blocks.len(), "extracted patch blocks");
    Ok(blocks)
}
