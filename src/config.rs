use std::path::PathBuf;

use crate::bounding_box::BoundingBox;
use crate::metatile::{Metatile, META_SIZE};
use crate::point::Bounds;
use crate::tile::{Tile, TILE_EXT};

/// Default mod_tile cache directory.
pub const DEFAULT_BASEDIR: &str = "/var/lib/mod_tile";

/// Tile listing configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Area to list the tiles of.
    pub bounding_box: BoundingBox,

    /// First zoom level to list. May be larger than `zoom_end`.
    pub zoom_start: u8,

    /// Last zoom level to list.
    pub zoom_end: u8,

    /// The tile cache directory the paths are rooted in.
    pub basedir: PathBuf,

    /// Style name inserted below `basedir`. Empty for none.
    pub style: String,

    /// Tile file extension including the leading dot.
    pub ext: String,

    /// Whether to list metatile files instead of single tiles.
    pub meta: bool,

    /// Edge length of a metatile in tiles.
    pub meta_size: u32,
}

impl Config {
    pub fn new(bounding_box: BoundingBox, zoom_start: u8, zoom_end: u8) -> Self {
        Self {
            bounding_box,
            zoom_start,
            zoom_end,
            basedir: DEFAULT_BASEDIR.into(),
            style: String::new(),
            ext: TILE_EXT.to_owned(),
            meta: false,
            meta_size: META_SIZE,
        }
    }

    /// The tile bounds of every zoom level, in ascending zoom order.
    pub fn bounds(&self) -> Bounds {
        self.bounding_box.bounds(self.zoom_start, self.zoom_end)
    }

    /// Creates an iterator over the file paths of all tiles (or metatiles)
    /// in the bounding box.
    ///
    /// In metatile mode a path equal to the one yielded right before it is
    /// skipped. The same metatile showing up again later (e.g. on the next
    /// column) is yielded again.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut last: Option<PathBuf> = None;

        self.bounds()
            .into_iter()
            .flat_map(|bound| bound.points())
            .map(move |p| {
                let tile = Tile::from_point(p, &self.style, &self.ext);
                if self.meta {
                    Metatile::from_tile_with_size(&tile, self.meta_size).filepath(&self.basedir)
                } else {
                    tile.filepath(&self.basedir)
                }
            })
            .filter(move |path| {
                if !self.meta {
                    return true;
                }
                if last.as_ref() == Some(path) {
                    return false;
                }

                last = Some(path.clone());
                true
            })
    }
}
