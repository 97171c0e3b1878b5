use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One point along a planned trajectory, in world coordinates (meters, radians).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub theta: f64,
    #[serde(default)]
    pub curvature: f64,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, theta: f64, curvature: f64) -> Self {
        Self {
            x,
            y,
            theta,
            curvature,
        }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
