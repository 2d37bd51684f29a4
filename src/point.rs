use std::f64::consts::PI;
use std::fmt;

/// Latitude at which the Web Mercator grid ends, `atan(sinh(π))` in degrees.
const LAT_MAX: f64 = 85.051_128_779_806_59;

/// A slippy-map grid position at a given zoom level.
/// ref: https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

/// Projects a latitude/longitude pair (in degrees) onto the tile grid of the
/// given zoom level using the Web Mercator projection.
///
/// Coordinates outside of the projectable range aren't rejected, the result
/// is clamped to the grid `[0, 2^zoom)` instead. This covers the poles (where
/// the projection diverges) and the antimeridian at 180°. Grids wider than
/// `u32` are cut off at `u32::MAX`.
///
/// # Example
/// ```rust
/// # use tile_paths::{latlong_to_zxy, Point};
/// assert_eq!(latlong_to_zxy(50.7929, 6.0402, 18), Point::new(18, 135470, 87999));
/// ```
pub fn latlong_to_zxy(lat: f64, lng: f64, zoom: u8) -> Point {
    // scale factor
    let n = 2_f64.powi(zoom as i32);

    let lat_rad = lat.max(-LAT_MAX).min(LAT_MAX).to_radians();

    let x = n * (lng + 180_f64) / 360_f64;
    let y = n * (1_f64 - (lat_rad.tan() + 1_f64 / lat_rad.cos()).ln() / PI) / 2_f64;

    let max = n - 1_f64;
    // `f64::max` maps NaN to zero, `as` saturates above `u32::MAX`
    let clamp = |v: f64| v.floor().max(0_f64).min(max) as u32;

    Point::new(zoom, clamp(x), clamp(y))
}

/// A rectangular, inclusive range of tiles on a single zoom level.
///
/// The corners must already be normalized (`x_min <= x_max`, `y_min <= y_max`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bound {
    pub z: u8,
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl Bound {
    pub fn new(z: u8, x_min: u32, x_max: u32, y_min: u32, y_max: u32) -> Self {
        debug_assert!(x_min <= x_max);
        debug_assert!(y_min <= y_max);

        Self {
            z,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Creates the bound spanned by two arbitrary corners of the same zoom level.
    pub fn from_corners(start: Point, end: Point) -> Self {
        debug_assert_eq!(start.z, end.z, "corners must share a zoom level");

        Self::new(
            start.z,
            start.x.min(end.x),
            start.x.max(end.x),
            start.y.min(end.y),
            start.y.max(end.y),
        )
    }

    /// Iterates over every point of the bound, column by column.
    pub fn points(&self) -> impl Iterator<Item = Point> + Clone + fmt::Debug {
        let Bound {
            z,
            x_min,
            x_max,
            y_min,
            y_max,
        } = *self;

        (x_min..=x_max).flat_map(move |x| (y_min..=y_max).map(move |y| Point::new(z, x, y)))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.z == self.z
            && (self.x_min..=self.x_max).contains(&p.x)
            && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Number of tiles inside the bound, saturating at `u64::MAX`.
    pub fn tile_count(&self) -> u64 {
        let width = u64::from(self.x_max - self.x_min) + 1;
        let height = u64::from(self.y_max - self.y_min) + 1;

        width.saturating_mul(height)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bound(z:{} x:{}-{} y:{}-{})",
            self.z, self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// An ordered collection of bounds, usually one per zoom level.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, bound: Bound) {
        self.0.push(bound);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bound> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the points of all bounds in insertion order.
    ///
    /// The iterator borrows the bounds, so calling this again starts over.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().flat_map(Bound::points)
    }

    /// Returns the first bound on zoom level `z`.
    pub fn for_zoom(&self, z: u8) -> Option<&Bound> {
        self.0.iter().find(|b| b.z == z)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.0.iter().any(|b| b.contains(p))
    }

    pub fn tile_count(&self) -> u64 {
        self.0
            .iter()
            .map(Bound::tile_count)
            .fold(0, u64::saturating_add)
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(bounds: Vec<Bound>) -> Self {
        Self(bounds)
    }
}

impl IntoIterator for Bounds {
    type Item = Bound;
    type IntoIter = std::vec::IntoIter<Bound>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bounds {
    type Item = &'a Bound;
    type IntoIter = std::slice::Iter<'a, Bound>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
