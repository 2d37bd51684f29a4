//! Metatiles as laid out on disk by mod_tile.
//!
//! A metatile bundles a block of `META_SIZE` x `META_SIZE` tiles into one
//! file. Its location is derived from the block's anchor (top left tile):
//! x and y are split into five nibbles each and every directory level holds
//! one nibble of x (high half) and one of y (low half), most significant
//! first.
//!
//! ref: https://wiki.openstreetmap.org/wiki/Meta_tiles

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::point::{Bound, Point};
use crate::tile::Tile;

/// Edge length of a metatile in tiles.
pub const META_SIZE: u32 = 8;

/// Extension of metatile files.
pub const META_EXT: &str = ".meta";

/// Number of directory levels (including the file name) in a metatile path.
const HASH_LEVELS: usize = 5;

lazy_static! {
    static ref META_URL_RE: Regex =
        Regex::new(r"(\w+)/(\d+)/(\d+)/(\d+)/(\d+)/(\d+)/(\d+)\.meta").unwrap();
}

/// Computes the path hashes of the metatile containing tile `x`/`y`.
///
/// # Example
/// ```rust
/// # use tile_paths::metatile::xy_to_hashes;
/// assert_eq!(xy_to_hashes(697, 321), [0, 0, 33, 180, 128]);
/// ```
pub fn xy_to_hashes(x: u32, y: u32) -> [u8; HASH_LEVELS] {
    anchor_hashes(x & !(META_SIZE - 1), y & !(META_SIZE - 1))
}

fn anchor_hashes(mut x: u32, mut y: u32) -> [u8; HASH_LEVELS] {
    let mut hashes = [0u8; HASH_LEVELS];
    for hash in hashes.iter_mut().rev() {
        *hash = (((x & 0x0f) << 4) | (y & 0x0f)) as u8;
        x >>= 4;
        y >>= 4;
    }

    hashes
}

/// Recovers the anchor coordinates from metatile path hashes.
pub fn hashes_to_xy(hashes: [u8; HASH_LEVELS]) -> (u32, u32) {
    hashes.iter().fold((0, 0), |(x, y), &hash| {
        let hash = u32::from(hash);
        ((x << 4) | ((hash & 0xf0) >> 4), (y << 4) | (hash & 0x0f))
    })
}

/// A block of tiles stored in a single file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metatile {
    pub z: u8,
    /// Column of the top left tile.
    pub x: u32,
    /// Row of the top left tile.
    pub y: u32,
    /// Edge length in tiles.
    pub size: u32,
    pub style: String,
}

impl Metatile {
    /// The metatile of default size containing `tile`.
    ///
    /// # Example
    /// ```rust
    /// # use tile_paths::{Metatile, Tile};
    /// let tile = Tile::with_style(10, 697, 321, "mapname", ".png");
    /// assert_eq!(
    ///     Metatile::from_tile(&tile).to_string(),
    ///     "Metatile(z:10, x:696-703, y:320-327, style:mapname)",
    /// );
    /// ```
    pub fn from_tile(tile: &Tile) -> Self {
        Self::from_tile_with_size(tile, META_SIZE)
    }

    /// The metatile of `size` x `size` tiles containing `tile`.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn from_tile_with_size(tile: &Tile, size: u32) -> Self {
        assert!(size > 0, "metatile size must be > 0");

        Self {
            z: tile.z,
            x: tile.x - tile.x % size,
            y: tile.y - tile.y % size,
            size,
            style: tile.style.clone(),
        }
    }

    /// Parses a metatile location of the form `style/z/h0/h1/h2/h3/h4.meta`.
    /// Leading directories (such as the cache base directory) are ignored.
    pub fn from_url(url: &str) -> Result<Self> {
        let caps = META_URL_RE
            .captures(url)
            .ok_or_else(|| anyhow!("unable to convert `{}` to a metatile", url))?;

        let z = caps[2]
            .parse()
            .with_context(|| format!("invalid zoom level in `{}`", url))?;

        let mut hashes = [0u8; HASH_LEVELS];
        for (i, hash) in hashes.iter_mut().enumerate() {
            *hash = caps[i + 3]
                .parse()
                .with_context(|| format!("invalid hash `{}` in `{}`", &caps[i + 3], url))?;
        }
        let (x, y) = hashes_to_xy(hashes);

        Ok(Self {
            z,
            x,
            y,
            size: META_SIZE,
            style: caps[1].to_owned(),
        })
    }

    pub fn hashes(&self) -> [u8; HASH_LEVELS] {
        anchor_hashes(self.x, self.y)
    }

    /// Edge length of the part of the metatile lying on the map. Low zoom
    /// levels have fewer tiles than a full metatile holds.
    pub fn len(&self) -> u32 {
        1u32.checked_shl(u32::from(self.z))
            .map_or(self.size, |n| n.min(self.size))
    }

    pub fn max_x(&self) -> u32 {
        self.x + self.len() - 1
    }

    pub fn max_y(&self) -> u32 {
        self.y + self.len() - 1
    }

    /// All tile positions on the map covered by this metatile.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        Bound::new(self.z, self.x, self.max_x(), self.y, self.max_y()).points()
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        tile.style == self.style
            && tile.z == self.z
            && (self.x..=self.max_x()).contains(&tile.x)
            && (self.y..=self.max_y()).contains(&tile.y)
    }

    /// Location of the metatile below `basedir`, laid out as
    /// `<basedir>/[<style>/]<z>/<h0>/<h1>/<h2>/<h3>/<h4>.meta`.
    ///
    /// # Example
    /// ```rust
    /// # use tile_paths::Metatile;
    /// # use std::path::Path;
    /// let mt = Metatile::from_url("mapname/10/0/1/2/3/4.meta").unwrap();
    /// assert_eq!(mt.filepath("/cache"), Path::new("/cache/mapname/10/0/1/2/3/4.meta"));
    /// ```
    pub fn filepath<P: AsRef<Path>>(&self, basedir: P) -> PathBuf {
        let hashes = self.hashes();

        let mut target = basedir.as_ref().to_path_buf();
        if !self.style.is_empty() {
            target.push(&self.style);
        }
        target.push(self.z.to_string());
        for hash in &hashes[..HASH_LEVELS - 1] {
            target.push(hash.to_string());
        }
        target.push(format!("{}{}", hashes[HASH_LEVELS - 1], META_EXT));

        target
    }
}

impl fmt::Display for Metatile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metatile(z:{}, x:{}-{}, y:{}-{}, style:{})",
            self.z,
            self.x,
            self.max_x(),
            self.y,
            self.max_y(),
            self.style
        )
    }
}

/// The distinct metatiles covering `bound`, in the order they are first hit
/// while walking the bound.
///
/// # Example
/// ```rust
/// # use tile_paths::{metatile::bound_to_metatiles, Bound};
/// let bound = Bound::new(10, 692, 703, 318, 324);
/// let metatiles: Vec<String> = bound_to_metatiles(&bound, "mapname")
///     .map(|mt| mt.to_string())
///     .collect();
///
/// assert_eq!(metatiles, vec![
///     "Metatile(z:10, x:688-695, y:312-319, style:mapname)",
///     "Metatile(z:10, x:688-695, y:320-327, style:mapname)",
///     "Metatile(z:10, x:696-703, y:312-319, style:mapname)",
///     "Metatile(z:10, x:696-703, y:320-327, style:mapname)",
/// ]);
/// ```
pub fn bound_to_metatiles<'a>(bound: &Bound, style: &'a str) -> impl Iterator<Item = Metatile> + 'a {
    let mut seen = HashSet::new();

    bound.points().filter_map(move |p| {
        let metatile = Metatile::from_tile(&Tile::from_point(p, style, ""));
        if seen.insert((metatile.x, metatile.y)) {
            Some(metatile)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_of_known_tile() {
        assert_eq!(xy_to_hashes(697, 321), [0, 0, 33, 180, 128]);
        assert_eq!(xy_to_hashes(696, 320), xy_to_hashes(703, 327));
        assert_ne!(xy_to_hashes(696, 320), xy_to_hashes(704, 320));
    }

    #[test]
    fn hashes_round_trip() {
        for &(x, y) in &[(0, 0), (696, 320), (1_048_568, 8), (123_456, 654_320)] {
            assert_eq!(hashes_to_xy(xy_to_hashes(x, y)), (x, y));
        }
    }

    #[test]
    fn anchor_is_multiple_of_size() {
        let mt = Metatile::from_tile(&Tile::new(10, 697, 321));
        assert_eq!((mt.x, mt.y), (696, 320));
        assert_eq!(mt.x % META_SIZE, 0);
        assert_eq!(mt.y % META_SIZE, 0);

        let mt = Metatile::from_tile_with_size(&Tile::new(10, 697, 321), 16);
        assert_eq!((mt.x, mt.y), (688, 320));
    }

    #[test]
    #[should_panic]
    fn zero_size_panics() {
        Metatile::from_tile_with_size(&Tile::new(1, 0, 0), 0);
    }

    #[test]
    fn path_of_known_tile() {
        let tile = Tile::with_style(10, 697, 321, "mapname", ".png");
        assert_eq!(
            Metatile::from_tile(&tile).filepath(""),
            Path::new("mapname/10/0/0/33/180/128.meta")
        );

        let tile = Tile::new(10, 697, 321);
        assert_eq!(
            Metatile::from_tile(&tile).filepath("/var/lib/mod_tile"),
            Path::new("/var/lib/mod_tile/10/0/0/33/180/128.meta")
        );
    }

    #[test]
    fn from_url() {
        let mt = Metatile::from_url("mapname/10/0/0/33/180/128.meta").unwrap();
        assert_eq!(mt.to_string(), "Metatile(z:10, x:696-703, y:320-327, style:mapname)");
        assert_eq!(mt, Metatile::from_tile(&Tile::with_style(10, 700, 324, "mapname", "")));

        let other = Metatile::from_url("/cache/mapname/10/0/0/33/180/0.meta").unwrap();
        assert_ne!(mt, other);
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(Metatile::from_url("mapname/10/0/0/33/180.meta").is_err());
        assert!(Metatile::from_url("mapname/10/0/0/33/180/128.png").is_err());
        assert!(Metatile::from_url("mapname/10/0/0/33/999/128.meta").is_err());
    }

    #[test]
    fn low_zoom_metatiles_are_clipped() {
        let mt = Metatile::from_tile(&Tile::with_style(1, 1, 1, "mapname", ""));
        assert_eq!(mt.len(), 2);
        assert_eq!(mt.points().count(), 4);

        let mt = Metatile::from_tile(&Tile::new(12, 5, 5));
        assert_eq!(mt.len(), META_SIZE);
        assert_eq!(mt.points().count(), 64);
    }

    #[test]
    fn contains() {
        let mt = Metatile::from_tile(&Tile::with_style(10, 696, 320, "", ".png"));

        assert!(mt.contains(&Tile::with_style(10, 696, 320, "", ".png")));
        assert!(mt.contains(&Tile::with_style(10, 703, 327, "", ".png")));
        assert!(!mt.contains(&Tile::with_style(10, 704, 328, "", ".png")));
        assert!(!mt.contains(&Tile::with_style(10, 695, 319, "", ".png")));
        assert!(!mt.contains(&Tile::with_style(10, 700, 324, "other", ".png")));
        assert!(!mt.contains(&Tile::with_style(11, 700, 324, "", ".png")));
    }
}
