use log::debug;

use crate::point::{latlong_to_zxy, Bound, Bounds};

/// A bounding box given by two latitudes and two longitudes in degrees.
///
/// The pairs may be passed in any order, they are sorted on construction.
///
/// # Example
/// ```rust
/// # use tile_paths::BoundingBox;
/// let aachen_germany = BoundingBox::new((50.7492, 50.811), (6.1649, 6.031));
/// assert_eq!(aachen_germany.north, 50.811);
/// assert_eq!(aachen_germany.west, 6.031);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub east: f64,
    pub south: f64,
}

impl BoundingBox {
    pub fn new(lat: (f64, f64), lng: (f64, f64)) -> Self {
        BoundingBox {
            north: lat.0.max(lat.1),
            south: lat.0.min(lat.1),
            west: lng.0.min(lng.1),
            east: lng.0.max(lng.1),
        }
    }

    /// Computes one tile bound per zoom level, from the lower to the higher
    /// of the two zoom levels.
    ///
    /// # Example
    /// ```rust
    /// # use tile_paths::BoundingBox;
    /// let bounds = BoundingBox::new((10.0, 20.0), (10.0, 20.0)).bounds(12, 10);
    /// let zooms: Vec<u8> = bounds.iter().map(|b| b.z).collect();
    /// assert_eq!(zooms, vec![10, 11, 12]);
    /// ```
    pub fn bounds(&self, zoom_start: u8, zoom_end: u8) -> Bounds {
        let (min_zoom, max_zoom) = if zoom_start <= zoom_end {
            (zoom_start, zoom_end)
        } else {
            (zoom_end, zoom_start)
        };

        let mut bounds = Bounds::new();
        for zoom in min_zoom..=max_zoom {
            let nw = latlong_to_zxy(self.north, self.west, zoom);
            let se = latlong_to_zxy(self.south, self.east, zoom);

            let bound = Bound::from_corners(nw, se);
            debug!("{} ({} tiles)", bound, bound.tile_count());

            bounds.push(bound);
        }

        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn sorts_coordinates() {
        let bbox = BoundingBox::new((20.0, 10.0), (20.0, -10.0));

        assert_eq!(
            bbox,
            BoundingBox {
                north: 20.0,
                south: 10.0,
                west: -10.0,
                east: 20.0,
            }
        );
    }

    #[test]
    fn rectangle_at_zoom_10() {
        let bounds = BoundingBox::new((10.0, 20.0), (10.0, 20.0)).bounds(10, 10);
        assert_eq!(bounds.len(), 1);

        let nw = latlong_to_zxy(20.0, 10.0, 10);
        let se = latlong_to_zxy(10.0, 20.0, 10);
        let bound = bounds.for_zoom(10).copied().unwrap();

        assert_eq!(bound, Bound::new(10, nw.x, se.x, nw.y, se.y));
        assert_eq!(bound, Bound::new(10, 540, 568, 453, 483));

        let count = bounds.points().count() as u64;
        assert_eq!(
            count,
            u64::from(bound.x_max - bound.x_min + 1) * u64::from(bound.y_max - bound.y_min + 1)
        );
        assert!(bounds.points().all(|p| bound.contains(p)));
    }

    #[test]
    fn polar_box_stays_on_grid() {
        let bounds = BoundingBox::new((-90.0, -80.0), (0.0, 1.0)).bounds(10, 10);
        let bound = bounds.for_zoom(10).copied().unwrap();

        assert_eq!(bound, Bound::new(10, 512, 514, 909, 1023));
        assert_eq!(bounds.tile_count(), 3 * 115);
        assert_eq!(bounds.points().count(), 3 * 115);
    }

    #[test]
    fn whole_world_covers_whole_grid() {
        let bbox = BoundingBox::new((-90.0, 90.0), (-180.0, 180.0));

        for bound in &bbox.bounds(0, 12) {
            let max = (1u32 << bound.z) - 1;
            assert_eq!(*bound, Bound::new(bound.z, 0, max, 0, max));
        }

        // beyond u32 coordinates the count saturates instead of overflowing
        assert_eq!(bbox.bounds(40, 40).tile_count(), u64::MAX);
    }

    #[test]
    fn zooms_ascend_regardless_of_order() {
        let bbox = BoundingBox::new((10.0, 20.0), (10.0, 20.0));
        assert_eq!(bbox.bounds(10, 8), bbox.bounds(8, 10));

        let zooms: Vec<u8> = bbox.bounds(10, 8).iter().map(|b| b.z).collect();
        assert_eq!(zooms, vec![8, 9, 10]);
    }

    #[test]
    fn whole_world_at_zoom_zero() {
        let bounds = BoundingBox::new((-85.0, 85.0), (-179.9, 179.9)).bounds(0, 0);
        let points: Vec<_> = bounds.points().collect();
        assert_eq!(points, vec![Point::new(0, 0, 0)]);
    }
}
