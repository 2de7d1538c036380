use clap::Parser;
use meteorite_sorter::cli::{run, Cli};
use meteorite_sorter::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
