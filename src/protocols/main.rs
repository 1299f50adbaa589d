use anyhow::{Context, Result};
use clap::Parser;
use homomorphic_protocols::cli_utils::Args;
use homomorphic_protocols::protocols::run;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("{:?}", args);

    run(args).with_context(|| "Failed to run the protocol.")?;

    Ok(())
}
