/// One file-scoped unit of a patch document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchBlock {
    pub target_path: String,
    /// Block content with the update directive rewritten into `--- a/` / `+++ b/` headers.
    pub body: String,
}

/// One (old text, new text) replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hunk {
    pub old_text: String,
    pub new_text: String,
}

impl Hunk {
    /// Join each side with newlines; an empty side stays an empty string.
    pub fn from_lines(old_lines: &[&str], new_lines: &[&str]) -> Self {
        Self {
            old_text: join_terminated(old_lines),
            new_text: join_terminated(new_lines),
        }
    }

    /// True when there is nothing to search for and the new text goes at end of file.
    pub fn is_append(&self) -> bool {
        self.old_text.is_empty() || self.old_text == "\n"
    }
}

fn join_terminated(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// What the pure stage decided for one block.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Patched(String),
    AlreadyApplied,
}
