use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::common::{Param, ParamType, ToolResult, content_response};
use super::workspace::Workspace;
use ignore::WalkBuilder;
use serde::Deserialize;

const RESPONSE_LIMIT: usize = 2000;

#[derive(Deserialize)]
pub struct Args {
    #[serde(default)]
    directory_path: Option<String>,
}

fn resolve_directory(workspace: &dyn Workspace, directory_path: Option<&str>) -> PathBuf {
    match directory_path {
        None | Some("" | "." | "./") => workspace.root().to_path_buf(),
        Some(p) => workspace.resolve(p),
    }
}

/// Files under `base`, relative to `root`, honoring ignore files and never entering `.git`.
fn collect_files(base: &Path, root: &Path) -> Vec<String> {
    let walker = WalkBuilder::new(base)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        files.push(rel.display().to_string());
    }
    files.sort();
    files
}

/// List the project's files as `{"content": "<one path per line>"}`.
pub async fn call(args: Args, workspace: Arc<dyn Workspace>) -> ToolResult {
    let base = resolve_directory(&*workspace, args.directory_path.as_deref());
    if !base.is_dir() {
        return Err(format!("Directory not found: {}", base.display()));
    }

    let files = collect_files(&base, workspace.root());
    tracing::debug!(base = %base.display(), count = files.len(), "listed directory");
    Ok(content_response(&files.join("\n"), RESPONSE_LIMIT))
}

pub fn spec() -> (&'static str, &'static str, Vec<Param>) {
    (
        "get_working_directory_content",
        "List files under a directory of the project, recursively, skipping anything the project's ignore files exclude. Paths are relative to the project root.",
        vec![Param {
            name: "directory_path",
            desc: "Directory to list; defaults to the project root",
            param_type: ParamType::String,
            required: false,
        }],
    )
}
