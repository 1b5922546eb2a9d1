use nalgebra::Point2;

// ---------------------------------------------------------------------------
// Terrain: piecewise-linear surface with a single flat landing zone
// ---------------------------------------------------------------------------

/// The flat segment deemed safe for touchdown.
#[derive(Debug, Clone, Copy)]
pub struct LandingZone {
    pub start_x: f64,
    pub end_x: f64,
    pub y: f64,
}

impl LandingZone {
    pub fn center_x(&self) -> f64 {
        (self.start_x + self.end_x) / 2.0
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.start_x && x <= self.end_x
    }
}

/// Result of dropping a plumb line at a given x.
#[derive(Debug, Clone, Copy)]
pub struct TerrainProbe {
    pub height: f64,
    pub flat: bool,
}

/// Terrain described by connected line segments over increasing x.
#[derive(Debug, Clone)]
pub struct Surface {
    points: Vec<Point2<f64>>,
    zone: LandingZone,
}

impl Surface {
    /// Build a surface from vertices sorted by increasing x, deriving the
    /// landing zone from the adjacent vertex pairs at equal height. When
    /// several pairs are level, the last one scanned is kept. Returns `None`
    /// if no pair is level.
    pub fn new(points: Vec<Point2<f64>>) -> Option<Self> {
        let mut zone = None;
        for pair in points.windows(2) {
            if pair[0].y == pair[1].y {
                zone = Some(LandingZone {
                    start_x: pair[0].x,
                    end_x: pair[1].x,
                    y: pair[0].y,
                });
            }
        }
        Some(Self { points, zone: zone? })
    }

    pub fn landing_zone(&self) -> &LandingZone {
        &self.zone
    }

    /// The segment straddling `x`: interpolated terrain height plus whether
    /// that segment is level. Linear scan in increasing-x order; `None`
    /// outside the surface's x-span.
    pub fn probe(&self, x: f64) -> Option<TerrainProbe> {
        for pair in self.points.windows(2) {
            if x >= pair[0].x && x <= pair[1].x {
                let width = pair[1].x - pair[0].x;
                if width <= 0.0 {
                    continue;
                }
                let t = (x - pair[0].x) / width;
                return Some(TerrainProbe {
                    height: pair[0].y + t * (pair[1].y - pair[0].y),
                    flat: pair[0].y == pair[1].y,
                });
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ridge_surface() -> Surface {
        let points = vec![
            Point2::new(0.0, 100.0),
            Point2::new(1000.0, 100.0),
            Point2::new(1500.0, 150.0),
            Point2::new(3000.0, 150.0),
        ];
        Surface::new(points).unwrap()
    }

    #[test]
    fn last_flat_pair_becomes_the_zone() {
        let surface = ridge_surface();
        let zone = surface.landing_zone();
        assert_eq!(zone.start_x, 1500.0);
        assert_eq!(zone.end_x, 3000.0);
        assert_eq!(zone.y, 150.0);
        assert_eq!(zone.center_x(), 2250.0);
    }

    #[test]
    fn no_flat_pair_is_rejected() {
        let points = vec![
            Point2::new(0.0, 100.0),
            Point2::new(500.0, 200.0),
            Point2::new(1000.0, 50.0),
        ];
        assert!(Surface::new(points).is_none());
    }

    #[test]
    fn probe_interpolates_within_slope() {
        let surface = ridge_surface();
        let probe = surface.probe(1250.0).unwrap();
        // Halfway up the 1000..1500 slope from 100 to 150.
        assert!((probe.height - 125.0).abs() < 1e-12);
        assert!(!probe.flat);
    }

    #[test]
    fn probe_flags_level_segments() {
        let surface = ridge_surface();
        assert!(surface.probe(500.0).unwrap().flat);
        assert!(surface.probe(2000.0).unwrap().flat);
    }

    #[test]
    fn probe_outside_span_is_none() {
        let surface = ridge_surface();
        assert!(surface.probe(-10.0).is_none());
        assert!(surface.probe(3500.0).is_none());
    }
}
