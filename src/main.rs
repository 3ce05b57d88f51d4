mod cli;
mod commands;
mod report;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = commands::run(cli) {
        report::report_error(&err);
        std::process::exit(1);
    }
}
