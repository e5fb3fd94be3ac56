use std::collections::BTreeMap;
use std::sync::Arc;

pub mod common;
pub mod workspace;
use self::common::{AsyncFn, Param, ToolResult, with_args};
use self::workspace::Workspace;

mod apply_patch;
mod list_directory;
mod read_region;
mod replace_file;

/// Exposed tools are represented as a map keyed by function name.
pub type ExposedTools = BTreeMap<&'static str, (&'static str, AsyncFn, Vec<Param>)>;

pub fn all_tools() -> ExposedTools {
    macro_rules! collect_tools {
      ($($module:ident),+ $(,)?) => {{
        let mut map: ExposedTools = BTreeMap::new();
        $(
            let (name, desc, params) = $module::spec();
            let call: AsyncFn = with_args::<$module::Args, _, _>($module::call);
            map.insert(name, (desc, call, params));
        )+
        map
      }};
    }

    collect_tools![apply_patch, replace_file, read_region, list_directory]
}

pub async fn invoke(
    tools: &ExposedTools,
    workspace: Arc<dyn Workspace>,
    name: &str,
    args: serde_json::Value,
) -> ToolResult {
    let Some((_, work, _)) = tools.get(name) else {
        return Err(format!("Called function doesn't exist: {name}"));
    };
    tracing::debug!("executing: {name}");
    work(args, workspace).await
}

/// Run a function by name with raw JSON arguments. Keeps the outcome's success bit for
/// callers that care; the text is what gets shown either way.
pub async fn perform_function(
    workspace: Arc<dyn Workspace>,
    name: &str,
    raw_args: &str,
) -> ToolResult {
    let args: serde_json::Value = match serde_json::from_str(raw_args) {
        Ok(v) => v,
        Err(e) => return Err(format!("Wrong attributes passed: {e}")),
    };
    invoke(&all_tools(), workspace, name, args).await
}
