mod applying;
mod blocks;
mod detect;
mod engine;
mod error;
mod model;
mod parsing;
mod text;

use std::sync::Arc;

use super::common::{Param, ParamType, ToolResult};
use super::workspace::Workspace;
use serde::Deserialize;

use engine::apply_patch;

#[derive(Deserialize)]
pub struct Args {
    /// Patch document; anything but a string is rejected.
    patch: Option<serde_json::Value>,
}

pub async fn call(args: Args, workspace: Arc<dyn Workspace>) -> ToolResult {
    let Some(patch) = args.patch.as_ref().and_then(|p| p.as_str()) else {
        return Err("Wrong attributes passed: patch must be a string".to_string());
    };

    match apply_patch(patch, &*workspace) {
        Ok(()) => Ok("Done!".to_string()),
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "apply_patch failed");
            Err(e.to_string())
        }
    }
}

pub fn spec() -> (&'static str, &'static str, Vec<Param>) {
    (
        "apply_patch",
        "Apply edits to existing files. Wrap each file's changes between '*** Begin Patch' and '*** End Patch' and name the file with '*** Update File: <path>'. Each change is one or more '-' lines with the current text followed by the '+' lines replacing it; unified diffs with '@@' headers and ' ' context lines are accepted too. Indentation of '-' lines need not match exactly, and a patch that is already applied is left alone.",
        vec![Param {
            name: "patch",
            desc: "Patch document with one or more Begin/End Patch blocks",
            param_type: ParamType::String,
            required: true,
        }],
    )
}

#[cfg(test)]
mod tests;
