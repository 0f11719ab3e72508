// geometry.rs
// The gas-gap solid and the ray queries the bridge needs from it.

use ultraviolet::DVec3;

use crate::config;

/// Axis-aligned box centered on the origin, half-extents in cm. The drift
/// field runs along y, so `half_y` is half the gap thickness.
#[derive(Clone, Copy, Debug)]
pub struct GasGap {
    pub half_x_cm: f64,
    pub half_y_cm: f64,
    pub half_z_cm: f64,
}

impl GasGap {
    /// The chamber's active volume.
    pub fn from_chamber() -> Self {
        Self {
            half_x_cm: config::HALF_X_CM,
            half_y_cm: 0.5 * config::GAP_CM,
            half_z_cm: config::HALF_Z_CM,
        }
    }

    /// Surface-inclusive containment test.
    pub fn contains(&self, p: DVec3) -> bool {
        p.x.abs() <= self.half_x_cm && p.y.abs() <= self.half_y_cm && p.z.abs() <= self.half_z_cm
    }

    /// y coordinate of the anode plane.
    pub fn anode_y_cm(&self) -> f64 {
        -self.half_y_cm
    }

    /// Distance along `dir` from `pos` to the box surface, measured from the
    /// inside. Degenerate queries (zero direction, position already outside
    /// along the ray) are clamped to zero.
    pub fn distance_to_exit(&self, pos: DVec3, dir: DVec3) -> f64 {
        let p = [pos.x, pos.y, pos.z];
        let d = [dir.x, dir.y, dir.z];
        let h = [self.half_x_cm, self.half_y_cm, self.half_z_cm];

        let mut dist = f64::INFINITY;
        for axis in 0..3 {
            if d[axis] > 0.0 {
                dist = dist.min((h[axis] - p[axis]) / d[axis]);
            } else if d[axis] < 0.0 {
                dist = dist.min((-h[axis] - p[axis]) / d[axis]);
            }
        }
        if !dist.is_finite() {
            return 0.0;
        }
        if dist < 0.0 {
            eprintln!("negative exit distance {:.3e} cm clamped to zero", dist);
            return 0.0;
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_gap() -> GasGap {
        GasGap {
            half_x_cm: 5.0,
            half_y_cm: 0.1,
            half_z_cm: 5.0,
        }
    }

    #[test]
    fn straight_crossing_spans_the_gap() {
        let gap = unit_gap();
        let entry = DVec3::new(0.0, 0.1, 0.0);
        let down = DVec3::new(0.0, -1.0, 0.0);
        assert!((gap.distance_to_exit(entry, down) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn oblique_crossing_is_longer_than_the_gap() {
        let gap = unit_gap();
        let entry = DVec3::new(0.0, 0.1, 0.0);
        let dir = DVec3::new(3.0 / 5.0, -4.0 / 5.0, 0.0);
        // Chord: 0.2 cm of gap at cos(theta) = 0.8.
        assert!((gap.distance_to_exit(entry, dir) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn sideways_exit_uses_the_nearest_face() {
        let gap = unit_gap();
        let entry = DVec3::new(4.0, 0.0, 0.0);
        let dir = DVec3::new(1.0, 0.0, 0.0);
        assert!((gap.distance_to_exit(entry, dir) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_queries_clamp_to_zero() {
        let gap = unit_gap();
        // Zero direction never exits.
        assert_eq!(gap.distance_to_exit(DVec3::zero(), DVec3::zero()), 0.0);
        // Position already past the surface along the ray.
        let outside = DVec3::new(0.0, -0.2, 0.0);
        let down = DVec3::new(0.0, -1.0, 0.0);
        assert_eq!(gap.distance_to_exit(outside, down), 0.0);
    }

    #[test]
    fn containment_is_surface_inclusive() {
        let gap = unit_gap();
        assert!(gap.contains(DVec3::new(5.0, 0.1, -5.0)));
        assert!(!gap.contains(DVec3::new(5.0001, 0.0, 0.0)));
        assert!(!gap.contains(DVec3::new(0.0, 0.11, 0.0)));
    }
}
