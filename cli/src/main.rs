use std::process::ExitCode;

use app::Outcome;
use args::Args;
use clap::Parser;

mod app;
mod args;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let stdout = std::io::stdout();
    match app::run(&args, &mut stdout.lock())? {
        Outcome::Solved => Ok(ExitCode::SUCCESS),
        Outcome::NoSolution => Ok(ExitCode::FAILURE),
    }
}
