use geo::{
    algorithm::Contains,
    geometry::{Coord, LineString, Point as GeoPoint, Polygon},
};

/// ASPRS point classification codes commonly present in airborne lidar
/// deliveries.
pub mod class {
    pub const GROUND: u8 = 2;
    pub const LOW_VEGETATION: u8 = 3;
    pub const MEDIUM_VEGETATION: u8 = 4;
    pub const HIGH_VEGETATION: u8 = 5;
}

/// A single classified lidar return in a projected planar CRS.
///
/// `x`/`y` in map units, `z` in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub classification: u8,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, classification: u8) -> Self {
        Self {
            x,
            y,
            z,
            classification,
        }
    }
}

/// Ground-projected boundary of a single large-footprint lidar pulse.
///
/// The caller is responsible for having the boundary and the point cloud
/// in the same planar CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    boundary: Polygon<f64>,
}

impl Footprint {
    pub fn new(boundary: Polygon<f64>) -> Self {
        Self { boundary }
    }

    /// Circular footprint approximated as a regular polygon with
    /// `segments` vertices.
    pub fn circle(center: Coord<f64>, radius: f64, segments: usize) -> Self {
        let ring: LineString<f64> = (0..segments)
            .map(|i| {
                let theta = (i as f64 / segments as f64) * 2.0 * std::f64::consts::PI;
                Coord {
                    x: center.x + radius * theta.cos(),
                    y: center.y + radius * theta.sin(),
                }
            })
            .collect();
        Self::new(Polygon::new(ring, vec![]))
    }

    pub fn boundary(&self) -> &Polygon<f64> {
        &self.boundary
    }

    /// Heights of the points contained in this footprint.
    ///
    /// A point is selected iff its (x, y) lies within the boundary and,
    /// when `class_filter` is a non-empty set of codes, its
    /// classification is one of them. Input order is preserved. An empty
    /// point cloud yields an empty result; emptiness only becomes an
    /// error downstream at waveform synthesis.
    pub fn select_heights(&self, points: &[Point], class_filter: Option<&[u8]>) -> Vec<f64> {
        points
            .iter()
            .filter(|p| match class_filter {
                Some(codes) if !codes.is_empty() => codes.contains(&p.classification),
                _ => true,
            })
            .filter(|p| self.boundary.contains(&GeoPoint::new(p.x, p.y)))
            .map(|p| p.z)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{class, Footprint, Point};
    use geo::geometry::Coord;

    fn mixed_cloud() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 301.2, class::GROUND),
            Point::new(1.0, 1.0, 303.7, class::LOW_VEGETATION),
            Point::new(-2.0, 3.0, 305.1, class::HIGH_VEGETATION),
            // Building return inside the footprint.
            Point::new(2.0, -1.0, 310.0, 6),
            // Vegetation return well outside the footprint.
            Point::new(100.0, 100.0, 304.4, class::MEDIUM_VEGETATION),
        ]
    }

    #[test]
    fn test_containment_and_order() {
        let footprint = Footprint::circle(Coord { x: 0.0, y: 0.0 }, 12.5, 64);
        let heights = footprint.select_heights(&mixed_cloud(), None);
        assert_eq!(heights, vec![301.2, 303.7, 305.1, 310.0]);
    }

    #[test]
    fn test_classification_filter() {
        let footprint = Footprint::circle(Coord { x: 0.0, y: 0.0 }, 12.5, 64);
        let veg = [
            class::LOW_VEGETATION,
            class::MEDIUM_VEGETATION,
            class::HIGH_VEGETATION,
        ];
        let heights = footprint.select_heights(&mixed_cloud(), Some(&veg));
        // Ground and building excluded even though spatially contained.
        assert_eq!(heights, vec![303.7, 305.1]);
    }

    #[test]
    fn test_empty_filter_is_no_filter() {
        let footprint = Footprint::circle(Coord { x: 0.0, y: 0.0 }, 12.5, 64);
        let all = footprint.select_heights(&mixed_cloud(), None);
        let empty = footprint.select_heights(&mixed_cloud(), Some(&[]));
        assert_eq!(all, empty);
    }

    #[test]
    fn test_disjoint_footprint() {
        let footprint = Footprint::circle(Coord { x: 1e6, y: 1e6 }, 12.5, 64);
        assert!(footprint.select_heights(&mixed_cloud(), None).is_empty());
    }

    #[test]
    fn test_empty_cloud() {
        let footprint = Footprint::circle(Coord { x: 0.0, y: 0.0 }, 12.5, 64);
        assert!(footprint.select_heights(&[], None).is_empty());
    }
}
