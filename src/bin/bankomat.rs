use std::{fs::File, io};

use anyhow::{Context, Result};
use bankomat::{
    bin_utils::Service,
    client::Bank,
    inventory::{Denomination, Inventory},
    processor::ProcessError,
};
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected an operation script as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let inventory = parse_inventory(args)?;

    let service = Service {
        bank: Bank::new("bankomat"),
        inventory,
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err {
                ProcessError::OperationErr(err) => eprintln!("Error at line {line}: {err}"),
                // these are not technical errors, just rejected operations
                ProcessError::DirectoryErr(err) => warn!("Line {line}: {err}"),
                ProcessError::DispenserErr(err) => warn!("Line {line}: {err}"),
            }
        }),
    };
    service.run()
}

/// Remaining arguments seed the note stock, one `face=count` pair each,
/// e.g. `5000=3 100=10`.
fn parse_inventory(args: impl Iterator<Item = String>) -> Result<Inventory> {
    let mut pairs = Vec::new();
    for arg in args {
        let (face, count) = arg
            .split_once('=')
            .with_context(|| format!("Expected `face=count`, got `{arg}`"))?;
        let face: u64 = face
            .parse()
            .with_context(|| format!("Invalid face value in `{arg}`"))?;
        let denomination = Denomination::try_from(face)?;
        let count: u32 = count
            .parse()
            .with_context(|| format!("Invalid note count in `{arg}`"))?;
        pairs.push((denomination, count));
    }
    Ok(pairs.into_iter().collect())
}
