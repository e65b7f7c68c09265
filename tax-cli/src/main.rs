use clap::Parser;
use tax_cli::{
    cli::{Cli, run},
    logging::init_logging,
};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    debug!(?cli, "parsed arguments");

    let output = run(&cli)?;
    print!("{output}");
    Ok(())
}
