use clap::Parser;
use loglens::runtime::{boot, cli::{self, Cli}};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let args = Cli::parse();
    let config = boot::load_config(args.config.as_deref())?;

    let failures = cli::run(&args, config, &mut std::io::stdout().lock())?;
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
