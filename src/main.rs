use anyhow::Result;
use clap::Parser;
use estoque::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
