use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::tools::common::ToolResult;

/// Prints function results to stdout.
pub struct Display {
    /// We can emit ANSI color sequences to stdout.
    colorful: bool,
}

pub fn make_display() -> Display {
    Display {
        colorful: atty::is(atty::Stream::Stdout),
    }
}

impl Display {
    /// Show the text of an outcome; failures stand out when stdout is a terminal.
    pub fn show_outcome(&self, outcome: &ToolResult) {
        match outcome {
            Ok(text) => println!("{text}"),
            Err(text) if self.colorful => {
                let _ = crossterm::execute!(
                    std::io::stdout(),
                    SetForegroundColor(Color::Red),
                    Print(text),
                    ResetColor,
                    Print("\n"),
                );
            }
            Err(text) => println!("{text}"),
        }
    }

    /// One line per function with its parameters, for `mend list`.
    pub fn show_functions(&self, tools: &crate::tools::ExposedTools) {
        for (name, (desc, _, params)) in tools {
            if self.colorful {
                let _ = crossterm::execute!(
                    std::io::stdout(),
                    SetForegroundColor(Color::DarkCyan),
                    Print(name),
                    ResetColor,
                    Print("\n"),
                );
            } else {
                println!("{name}");
            }
            println!("    {desc}");
            for p in params {
                let required = if p.required { "required" } else { "optional" };
                println!(
                    "    - {} ({}, {required}): {}",
                    p.name,
                    p.param_type.as_str(),
                    p.desc
                );
            }
        }
    }
}
