use std::io::ErrorKind;
use std::sync::Arc;

use super::common::{Param, ParamType, ToolResult, content_response};
use super::workspace::Workspace;
use serde::Deserialize;
use serde_json::{Map, Value};

const RESPONSE_LIMIT: usize = 5000;

#[derive(Deserialize)]
pub struct Args {
    file_path: Option<String>,
    region: Option<Map<String, Value>>,
}

/// Line bound from the region object; anything but a non-negative integer means "open".
fn bound(region: &Map<String, Value>, key: &str) -> Option<usize> {
    region
        .get(key)
        .and_then(Value::as_i64)
        .filter(|&n| n != -1)
        .map(|n| n.max(0) as usize)
}

/// Inclusive line range `[a, b]` clamped to the file; `None` when it is empty.
fn clamp_region(a: Option<usize>, b: Option<usize>, total: usize) -> Option<(usize, usize)> {
    if total == 0 {
        return None;
    }
    let a = a.unwrap_or(0).min(total);
    let b = b.unwrap_or(total).min(total - 1);
    (a <= b).then_some((a, b))
}

/// Return lines `a..=b` of a file (0-based) as `{"content": ...}`.
pub async fn call(args: Args, workspace: Arc<dyn Workspace>) -> ToolResult {
    let (Some(file_path), Some(region)) = (args.file_path.as_ref(), args.region.as_ref()) else {
        return Err(format!(
            "Wrong attributes passed: file_path={:?}, region={:?}",
            args.file_path, args.region
        ));
    };

    let path = workspace.resolve(file_path);
    let text = match workspace.read_text(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(format!("File under path not found: {}", path.display()));
        }
        Err(e) => return Err(format!("Unable to read {}: {e}", path.display())),
    };

    // A trailing newline leaves an empty last line, as an editor shows it.
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let content = match clamp_region(bound(region, "a"), bound(region, "b"), lines.len()) {
        Some((a, b)) => lines[a..=b].join("\n"),
        None => String::new(),
    };
    Ok(content_response(&content, RESPONSE_LIMIT))
}

pub fn spec() -> (&'static str, &'static str, Vec<Param>) {
    (
        "read_region_content",
        "Read a range of lines from a file. Lines are 0-based and the range is inclusive; -1 or a missing bound means the start or end of the file.",
        vec![
            Param {
                name: "file_path",
                desc: "Absolute path, or relative to the project root",
                param_type: ParamType::String,
                required: true,
            },
            Param {
                name: "region",
                desc: "Object with optional integer bounds `a` (first line) and `b` (last line)",
                param_type: ParamType::Object,
                required: true,
            },
        ],
    )
}
