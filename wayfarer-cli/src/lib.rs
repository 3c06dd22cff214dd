//! Command-line interface for the Wayfarer destination-matching engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;

pub use error::CliError;

/// Run the Wayfarer CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging, or the
/// requested command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => recommend::run(args),
        Command::Styles => {
            let stdout = std::io::stdout();
            list_styles(&mut stdout.lock())
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Interactive travel destination recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run an interactive matching session and print recommendations.
    Recommend(recommend::RecommendArgs),
    /// List the available travel style presets.
    Styles,
}

fn list_styles<W: std::io::Write>(out: &mut W) -> Result<(), CliError> {
    for style in wayfarer_core::TravelStyle::ALL {
        writeln!(
            out,
            "{:<18} {} - {}",
            style.key(),
            style.display_name(),
            style.description()
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
