use clap::Parser;
use gbce::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
