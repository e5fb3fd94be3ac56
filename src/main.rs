//! Command-line entrypoint: run one file-editing function and print its result.
use eyre::Result;

pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
