mod classify;
mod cutout;
mod try_on;
mod utils;

use tryon::TryOnResult;

use crate::cli::{Cli, Commands, GlobalOptions};

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> TryOnResult<()> {
    let Cli { global, command } = cli;
    dispatch(&global, command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(global: &GlobalOptions, command: Commands) -> TryOnResult<()> {
    match command {
        Commands::TryOn(cmd) => try_on::run(global, cmd),
        Commands::Cutout(cmd) => cutout::run(cmd),
        Commands::Classify(cmd) => classify::run(cmd),
    }
}
