use eyre::Result;

use crate::display::Display;
use crate::tools::all_tools;

pub const USAGE: &str = concat!(
    "mend: apply loosely formatted patches and other file edits\n\n",
    "  $ mend apply_patch < change.patch\n",
    "  $ mend read_region_content '{\"file_path\": \"src/main.rs\", \"region\": {\"a\": 0, \"b\": 9}}'\n",
    "  $ mend get_working_directory_content '{\"directory_path\": \"src\"}'\n",
    "  $ mend list\n\n",
    "Relative paths resolve against --root <dir>, $MEND_ROOT, or the current directory.\n",
    "Set MEND_LOG (e.g. debug) for diagnostics on stderr.\n"
);

/// Handle special one-shot commands like `--help`, `--version`, or `list`.
/// Returns true if a special action was handled and the program should exit.
pub fn handle_specials_if_needed(args: &[String], display: &Display) -> Result<bool> {
    let arg = args.first().map(String::as_str).unwrap_or_default();

    if matches!(arg, "help" | "--help" | "-H" | "-h" | "-?") {
        println!("{USAGE}");
        return Ok(true);
    }

    if matches!(arg, "version" | "--version" | "-V" | "-v") {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    if matches!(arg, "list" | "functions") {
        display.show_functions(&all_tools());
        return Ok(true);
    }

    // Otherwise, not a special
    Ok(false)
}
