pub fn normalize_eol(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split into lines, each keeping its `\n` terminator; the last line may lack one.
pub fn split_keep_ends(s: &str) -> Vec<&str> {
    s.split_inclusive('\n').collect()
}

/// Whitespace-tolerant line comparison: indentation differences are ignored.
pub fn eq_line_relaxed(a: &str, b: &str) -> bool {
    a.trim_start() == b.trim_start()
}

pub fn find_lines_window(before: &[&str], old: &[&str]) -> Option<(usize, usize)> {
    if old.is_empty() || before.len() < old.len() {
        return None;
    }
    'outer: for start in 0..=before.len() - old.len() {
        for k in 0..old.len() {
            if !eq_line_relaxed(before[start + k], old[k]) {
                continue 'outer;
            }
        }
        return Some((start, start + old.len()));
    }
    None
}

const SNIPPET_CHARS: usize = 80;

/// Short single-line excerpt of a context line for error messages.
pub fn snippet(line: &str) -> String {
    let t = line.trim();
    if t.is_empty() {
        return "<newline>".to_string();
    }
    if t.chars().count() > SNIPPET_CHARS {
        t.chars().take(SNIPPET_CHARS).collect()
    } else {
        t.to_string()
    }
}
