mod args;
mod validators;

use anyhow::Result;
use args::Args;
use std::io;
use tile_paths::{print_paths, Config};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .init();

    let dry_run = args.dry_run;
    let config: Config = args.into();
    log::debug!("{:?}", config);

    if dry_run {
        let count = config.paths().count();

        eprintln!(
            "would list {} {} (approx {} of tiles, assuming 10 kb per tile)",
            count,
            if config.meta { "metatiles" } else { "tiles" },
            pretty_bytes::converter::convert(config.bounds().tile_count() as f64 * 10_000f64)
        );

        Ok(())
    } else {
        let stdout = io::stdout();
        print_paths(&config, stdout.lock())?;

        Ok(())
    }
}
