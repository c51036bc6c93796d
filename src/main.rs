use clap::Parser;
use kuota_calc::{cli::Cli, config, handle_calculate};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> kuota_calc::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let config = config::load_config(cli.config.as_deref())?;
    handle_calculate(cli.calculate_options(&config))
}
