use anyhow::{Context, Result};
use log::info;
use std::io::{ErrorKind, Write};

use crate::config::Config;

/// Writes the path of every tile (or metatile) specified in `cfg` to `out`,
/// one per line, and returns the number of lines written.
///
/// A reader going away early (broken pipe) ends the listing without an error.
///
/// # Example
/// ```rust
/// use tile_paths::{print_paths, BoundingBox, Config};
///
/// let config = Config::new(BoundingBox::new((-85.0, 85.0), (-179.9, 179.9)), 0, 1);
/// let mut out = Vec::new();
///
/// assert_eq!(print_paths(&config, &mut out).unwrap(), 5);
/// assert!(String::from_utf8(out).unwrap().starts_with("/var/lib/mod_tile/0/0/0.png\n"));
/// ```
pub fn print_paths<W: Write>(cfg: &Config, mut out: W) -> Result<u64> {
    let mut count = 0;

    for path in cfg.paths() {
        match writeln!(out, "{}", path.display()) {
            Ok(()) => count += 1,
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                info!("output closed after {} paths", count);
                return Ok(count);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed writing path {}", path.display()))
            }
        }
    }

    match out.flush() {
        Err(e) if e.kind() != ErrorKind::BrokenPipe => {
            return Err(e).context("failed flushing output");
        }
        _ => {}
    }

    info!("listed {} paths", count);

    Ok(count)
}
