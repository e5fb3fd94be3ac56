use eyre::{Result, eyre};
use serde_json::json;
use std::sync::Arc;

use crate::cli::io;
use crate::cli::specials;
use crate::config::{Settings, take_root_flag};
use crate::display;
use crate::tools::perform_function;
use crate::tools::workspace::{ProjectDir, Workspace};

/// Turn the argument text into a JSON payload. Raw text is accepted as the patch for
/// `apply_patch`; every other function needs JSON. Nothing at all means no arguments.
fn arguments_payload(function: &str, raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok("{}".to_string());
    }
    if serde_json::from_str::<serde_json::Value>(raw).is_ok() {
        return Ok(raw.to_string());
    }
    if function == "apply_patch" {
        return Ok(json!({ "patch": raw }).to_string());
    }
    Err(eyre!("arguments for `{function}` must be JSON"))
}

/// CLI entrypoint: `mend <function> [<json-args>]`, with stdin standing in for the
/// arguments when they are not given on the command line.
pub async fn run() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let root_flag = take_root_flag(&mut args)?;
    let settings = Settings::resolve(root_flag)?;
    crate::logging::setup_tracing(&settings.log_filter);

    let display = display::make_display();
    if specials::handle_specials_if_needed(&args, &display)? {
        return Ok(());
    }

    let Some(function) = args.first().cloned() else {
        eprintln!("{}", specials::USAGE);
        std::process::exit(2);
    };

    let inline = args[1..].join(" ");
    let raw = if inline.trim().is_empty() {
        io::read_whole_stdin()?.unwrap_or_default()
    } else {
        inline
    };
    let payload = arguments_payload(&function, &raw)?;

    tracing::debug!(root = %settings.project_root.display(), %function, "dispatching");
    let workspace: Arc<dyn Workspace> = Arc::new(ProjectDir::new(settings.project_root));
    let outcome = perform_function(workspace, &function, &payload).await;
    display.show_outcome(&outcome);

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
