//! Triangular Fuzzy Numbers
//!
//! A TFN `[lower, mode, upper]` expresses uncertainty around a central estimate.
//! Distances between TFNs use the vertex method rather than defuzzifying first.

use serde::{Deserialize, Serialize};

/// Triangular fuzzy number `[lower, mode, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Tfn {
    pub lower: f64,
    pub mode: f64,
    pub upper: f64,
}

impl Tfn {
    /// Fuzzy positive ideal used for every criterion
    pub const IDEAL: Tfn = Tfn::new(1.0, 1.0, 1.0);
    /// Fuzzy negative ideal used for every criterion
    pub const ANTI_IDEAL: Tfn = Tfn::new(0.0, 0.0, 0.0);

    pub const fn new(lower: f64, mode: f64, upper: f64) -> Self {
        Self { lower, mode, upper }
    }

    /// Promote a crisp value to the degenerate TFN `[x, x, x]`
    pub const fn crisp(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Component-wise scaling by a crisp weight
    pub fn scale(&self, weight: f64) -> Self {
        Self::new(self.lower * weight, self.mode * weight, self.upper * weight)
    }

    /// Vertex-method distance: `sqrt((1/3) * (dl² + dm² + du²))`
    pub fn vertex_distance(&self, other: &Tfn) -> f64 {
        let dl = self.lower - other.lower;
        let dm = self.mode - other.mode;
        let du = self.upper - other.upper;
        ((1.0 / 3.0) * (dl * dl + dm * dm + du * du)).sqrt()
    }
}

impl From<[f64; 3]> for Tfn {
    fn from(v: [f64; 3]) -> Self {
        Tfn::new(v[0], v[1], v[2])
    }
}

impl From<Tfn> for [f64; 3] {
    fn from(t: Tfn) -> Self {
        [t.lower, t.mode, t.upper]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertex_distance_to_reference_points() {
        let high = Tfn::new(0.7, 0.9, 1.0);
        // (0.09 + 0.01 + 0) / 3
        assert_relative_eq!(high.vertex_distance(&Tfn::IDEAL), (0.1f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            high.vertex_distance(&Tfn::ANTI_IDEAL),
            ((0.49 + 0.81 + 1.0) / 3.0f64).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_crisp_tfn_distance_is_absolute_difference() {
        let a = Tfn::crisp(0.25);
        let b = Tfn::crisp(0.75);
        assert_relative_eq!(a.vertex_distance(&b), 0.5, epsilon = 1e-12);
        assert_eq!(a.vertex_distance(&a), 0.0);
    }

    #[test]
    fn test_scale() {
        let t = Tfn::new(0.3, 0.5, 0.7).scale(0.5);
        assert_relative_eq!(t.lower, 0.15);
        assert_relative_eq!(t.mode, 0.25);
        assert_relative_eq!(t.upper, 0.35);
    }

    #[test]
    fn test_serializes_as_triple() {
        let json = serde_json::to_string(&Tfn::new(0.0, 0.1, 0.3)).unwrap();
        assert_eq!(json, "[0.0,0.1,0.3]");
    }
}
