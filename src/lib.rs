//! List the mod_tile cache files of all tiles inside a bounding box.
//!
//! Converts a latitude/longitude extent into the slippy-map tiles covering it
//! on a range of zoom levels and prints the on-disk path of every tile, or of
//! every metatile (8x8 tiles stored as one file by mod_tile/renderd). Nothing
//! is read from or written to the tile cache, the paths are only computed.
//!
//! # Usage
//!
//! The tool features a CLI you can access via `-h` / `--help`. It is also
//! available as a library.
//!
//! # CLI Example
//!
//! ```bash
//! tile-paths \
//!   --lat 50.7492 50.811 \
//!   --lng 6.031 6.1649 \
//!   --zooms 10 14 \
//!   --basedir /var/lib/mod_tile \
//!   --meta
//! ```
//!
//! # Library Example
//! ```rust
//! use tile_paths::{print_paths, BoundingBox, Config};
//!
//! let mut config = Config::new(BoundingBox::new((50.7492, 50.811), (6.031, 6.1649)), 10, 14);
//! config.meta = true;
//!
//! print_paths(&config, std::io::stdout()).expect("failed listing tiles");
//! ```

mod bounding_box;
mod config;
pub mod metatile;
mod point;
mod print;
mod tile;

pub use bounding_box::BoundingBox;
pub use config::{Config, DEFAULT_BASEDIR};
pub use metatile::{Metatile, META_EXT, META_SIZE};
pub use point::{latlong_to_zxy, Bound, Bounds, Point};
pub use print::print_paths;
pub use tile::{Tile, TILE_EXT};
