//! CLI entry point for evolving random noise into a monochrome target image

use clap::Parser;
use pixelclimb::io::cli::{Cli, Runner};

fn main() -> pixelclimb::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    Runner::new(cli).run()?;
    Ok(())
}
