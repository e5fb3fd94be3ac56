//! Startup settings: where the project lives and how loud to log.
use eyre::{Result, eyre};
use std::path::PathBuf;

const ROOT_VAR: &str = "MEND_ROOT";
const LOG_VAR: &str = "MEND_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Relative paths in every function call resolve against this directory.
    pub project_root: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Settings {
    /// `--root` wins over `MEND_ROOT`, which wins over the current directory.
    pub fn resolve(root_flag: Option<String>) -> Result<Self> {
        let project_root = match root_flag.or_else(|| non_empty_var(ROOT_VAR)) {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };
        if !project_root.is_dir() {
            return Err(eyre!(
                "project root is not a directory: {}",
                project_root.display()
            ));
        }
        let log_filter = non_empty_var(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            project_root,
            log_filter,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Remove `--root <dir>` / `--root=<dir>` from `args`, returning the directory.
pub fn take_root_flag(args: &mut Vec<String>) -> Result<Option<String>> {
    let Some(pos) = args
        .iter()
        .position(|a| a == "--root" || a.starts_with("--root="))
    else {
        return Ok(None);
    };
    let flag = args.remove(pos);
    if let Some(value) = flag.strip_prefix("--root=") {
        return Ok(Some(value.to_string()));
    }
    if pos < args.len() {
        Ok(Some(args.remove(pos)))
    } else {
        Err(eyre!("--root requires a directory"))
    }
}
