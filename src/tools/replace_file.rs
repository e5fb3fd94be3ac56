use std::fs;
use std::sync::Arc;

use super::common::{Param, ParamType, ToolResult};
use super::workspace::Workspace;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Args {
    file_path: Option<String>,
    create: Option<bool>,
    content: Option<String>,
}

/// Overwrite a file with the given content, optionally creating parent directories.
pub async fn call(args: Args, workspace: Arc<dyn Workspace>) -> ToolResult {
    let (Some(file_path), Some(create), Some(content)) = (args.file_path, args.create, args.content)
    else {
        return Err(
            "Wrong attributes passed: file_path(str), create(bool), content(str) required"
                .to_string(),
        );
    };

    let path = workspace.resolve(&file_path);
    if create
        && let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {e}"))?;
    }

    workspace
        .write_text(&path, &content)
        .map_err(|e| format!("Failed to write file: {e}"))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "file replaced");
    Ok("Done!".to_string())
}

pub fn spec() -> (&'static str, &'static str, Vec<Param>) {
    (
        "replace_text_for_whole_file",
        "Replace the whole content of a file, or create it. Use for new files or rewrites too large for a patch.",
        vec![
            Param {
                name: "file_path",
                desc: "Absolute path, or relative to the project root",
                param_type: ParamType::String,
                required: true,
            },
            Param {
                name: "create",
                desc: "Create missing parent directories first",
                param_type: ParamType::Boolean,
                required: true,
            },
            Param {
                name: "content",
                desc: "New file content, written verbatim",
                param_type: ParamType::String,
                required: true,
            },
        ],
    )
}
