use appkeeper::cli::{self, run_cli};
use appkeeper::output::OutputFormatter;
use clap::Parser;
use std::process;

fn main() {
    let args = cli::Args::parse();

    cli::install_interrupt_handler();

    if let Err(e) = run_cli(&args) {
        OutputFormatter::error(&e);
        process::exit(1);
    }
}
