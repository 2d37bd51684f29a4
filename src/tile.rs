use std::path::{Path, PathBuf};

use crate::point::Point;

/// Default tile image extension.
pub const TILE_EXT: &str = ".png";

/// A single rendered tile image of a map style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tile {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    /// Style (map) name, empty for the default style.
    pub style: String,
    /// File extension including the leading dot.
    pub ext: String,
}

impl Tile {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self::with_style(z, x, y, "", TILE_EXT)
    }

    pub fn with_style(z: u8, x: u32, y: u32, style: &str, ext: &str) -> Self {
        Self {
            z,
            x,
            y,
            style: style.to_owned(),
            ext: ext.to_owned(),
        }
    }

    pub fn from_point(p: Point, style: &str, ext: &str) -> Self {
        Self::with_style(p.z, p.x, p.y, style, ext)
    }

    pub fn point(&self) -> Point {
        Point::new(self.z, self.x, self.y)
    }

    /// Location of the tile below `basedir`, laid out as
    /// `<basedir>/[<style>/]<z>/<x>/<y><ext>`.
    ///
    /// # Example
    /// ```rust
    /// # use tile_paths::Tile;
    /// # use std::path::Path;
    /// let tile = Tile::new(5, 3, 4);
    /// assert_eq!(tile.filepath("/base"), Path::new("/base/5/3/4.png"));
    /// ```
    pub fn filepath<P: AsRef<Path>>(&self, basedir: P) -> PathBuf {
        let mut target = basedir.as_ref().to_path_buf();
        if !self.style.is_empty() {
            target.push(&self.style);
        }
        target.push(self.z.to_string());
        target.push(self.x.to_string());
        target.push(format!("{}{}", self.y, self.ext));

        target
    }
}
