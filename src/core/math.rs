use serde::{Deserialize, Serialize};

/// Linear interpolation between two f64 values
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Inverse of [`lerp`]: where `value` sits between `start` and `end`.
///
/// Returns 0.0 when the range is degenerate (`start == end`).
pub fn inverse_lerp(start: f64, end: f64, value: f64) -> f64 {
    if (end - start).abs() < f64::EPSILON {
        0.0
    } else {
        (value - start) / (end - start)
    }
}

/// Position on a quadratic bezier curve defined by two endpoints and one
/// control point: `(1-t)²·start + 2t(1-t)·control + t²·end`
pub fn quadratic_bezier(start: Point3, control: Point3, end: Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    start
        .multiply(u * u)
        .add(&control.multiply(2.0 * t * u))
        .add(&end.multiply(t * t))
}

/// Represents a point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(&self, other: &Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn multiply(&self, scalar: f64) -> Point3 {
        Point3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy of this vector; the zero vector normalizes to itself
    pub fn normalized(&self) -> Point3 {
        let mag = self.magnitude();
        if mag < f64::EPSILON {
            Point3::default()
        } else {
            self.multiply(1.0 / mag)
        }
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        other.subtract(self).magnitude()
    }

    pub fn lerp(&self, other: &Point3, t: f64) -> Point3 {
        Point3::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
