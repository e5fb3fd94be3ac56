use super::error::PatchError;
use super::model::Hunk;
use super::text::{find_lines_window, snippet, split_keep_ends};

/// Apply hunks in order, each against the result of the previous one.
/// Stops at the first hunk whose context cannot be located.
pub fn apply_all_hunks(before: &str, hunks: &[Hunk]) -> Result<String, PatchError> {
    let mut text = before.to_string();
    for (idx, h) in hunks.iter().enumerate() {
        text = apply_hunk(&text, h).map_err(|snippet| PatchError::ContextNotFound {
            index: idx + 1,
            snippet,
        })?;
    }
    Ok(text)
}

/// Replace the first window matching the hunk's old lines, or append when there is no
/// context. On failure returns a snippet of the context that was not found.
pub fn apply_hunk(before: &str, h: &Hunk) -> Result<String, String> {
    if h.is_append() {
        let mut out = String::from(before);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&h.new_text);
        return Ok(out);
    }

    let before_lines = split_keep_ends(before);
    let old_lines = split_keep_ends(&h.old_text);

    let Some((s, e)) = find_lines_window(&before_lines, &old_lines) else {
        return Err(snippet(old_lines[0]));
    };

    let mut out = String::with_capacity(before.len() + h.new_text.len());
    for line in &before_lines[..s] {
        out.push_str(line);
    }
    out.push_str(&h.new_text);
    for line in &before_lines[e..] {
        out.push_str(line);
    }
    Ok(out)
}
