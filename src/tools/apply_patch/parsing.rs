use super::error::PatchError;
use super::model::Hunk;

/// A body grammar: turns a block body into ordered hunks.
pub type ParseFn = fn(&str) -> Result<Vec<Hunk>, PatchError>;

fn is_removal(line: &str) -> bool {
    line.starts_with('-') && !line.starts_with("---")
}

fn is_addition(line: &str) -> bool {
    line.starts_with('+') && !line.starts_with("+++")
}

/// Collect `-` runs and the `+` run right after each, skipping everything else.
fn scan_minimal(body: &str) -> Vec<(Vec<&str>, Vec<&str>)> {
    let lines: Vec<&str> = body.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !is_removal(lines[i]) {
            i += 1;
            continue;
        }
        let mut old_lines = Vec::new();
        while i < lines.len() && is_removal(lines[i]) {
            old_lines.push(&lines[i][1..]);
            i += 1;
        }
        let mut new_lines = Vec::new();
        while i < lines.len() && is_addition(lines[i]) {
            new_lines.push(&lines[i][1..]);
            i += 1;
        }
        out.push((old_lines, new_lines));
    }
    out
}

/// Strict minimal grammar: no `@@` headers, each hunk is one or more `-` lines naming the
/// context followed by the optional `+` replacement lines.
pub fn parse_strict(body: &str) -> Result<Vec<Hunk>, PatchError> {
    let mut hunks = Vec::new();
    for (old_lines, new_lines) in scan_minimal(body) {
        if old_lines.iter().all(|l| l.is_empty()) {
            return Err(PatchError::HunkWithoutContext);
        }
        hunks.push(Hunk::from_lines(&old_lines, &new_lines));
    }
    if hunks.is_empty() {
        return Err(PatchError::NoHunks);
    }
    Ok(hunks)
}

/// Unified-diff grammar: `@@` separated hunks with ` `, `-` and `+` lines.
/// Context lines land on both sides, which lets git-style output match.
pub fn parse_unified(body: &str) -> Result<Vec<Hunk>, PatchError> {
    let mut hunks = Vec::new();
    let mut old_lines: Vec<&str> = Vec::new();
    let mut new_lines: Vec<&str> = Vec::new();
    let mut in_hunk = false;

    fn flush<'a>(hunks: &mut Vec<Hunk>, old: &mut Vec<&'a str>, new: &mut Vec<&'a str>) {
        if !old.is_empty() || !new.is_empty() {
            hunks.push(Hunk::from_lines(old, new));
            old.clear();
            new.clear();
        }
    }

    for line in body.lines() {
        if line.starts_with("@@") {
            flush(&mut hunks, &mut old_lines, &mut new_lines);
            in_hunk = true;
            continue;
        }
        if !in_hunk {
            continue;
        }

        if let Some(text) = line.strip_prefix(' ') {
            old_lines.push(text);
            new_lines.push(text);
        } else if is_removal(line) {
            old_lines.push(&line[1..]);
        } else if is_addition(line) {
            new_lines.push(&line[1..]);
        } else {
            in_hunk = false;
            flush(&mut hunks, &mut old_lines, &mut new_lines);
        }
    }
    flush(&mut hunks, &mut old_lines, &mut new_lines);

    if hunks.is_empty() {
        return Err(PatchError::NoUnifiedHunks);
    }
    Ok(hunks)
}

/// Loose grammar: the strict one without its checks. Blank context is kept and a body
/// with no `-` lines yields no hunks instead of an error.
pub fn parse_loose(body: &str) -> Vec<Hunk> {
    scan_minimal(body)
        .into_iter()
        .map(|(old_lines, new_lines)| Hunk::from_lines(&old_lines, &new_lines))
        .collect()
}

/// Grammars tried before the already-applied check, in order.
pub const STRATEGIES: [(&str, ParseFn); 2] = [("strict", parse_strict), ("unified", parse_unified)];
