use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Extract photo GPS metadata and render a travel map
#[derive(Parser)]
struct Cli {
    /// Directory/folder to scan for photos
    dir: PathBuf,
    /// Path of the map document to write
    #[arg(short, long, default_value = "map.html")]
    output: PathBuf,
    /// Keep the intermediate CSV files instead of deleting them
    #[arg(short, long)]
    keep_intermediates: bool,
}

fn main() -> Result<()> {
    phototrail::setup::init_logger();
    let args = Cli::parse();

    phototrail::run(&args.dir, &args.output, args.keep_intermediates)
}
