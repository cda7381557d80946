use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg};

/// A heading measured in degrees, counter-clockwise from the +x axis.
///
/// The stored value is not wrapped when turns are added, so a ship that spins
/// in one direction accumulates its heading exactly. Use [`Angle::degrees`]
/// for a normalized value.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub fn new(degrees: f64) -> Angle {
        Angle(degrees)
    }

    pub fn from_vector(v: Vector2<f64>) -> Angle {
        Angle(v.y.atan2(v.x).to_degrees())
    }

    /// Normalized to (-180, 180].
    pub fn degrees(&self) -> f64 {
        let d = self.0.rem_euclid(360.0);
        if d > 180.0 {
            d - 360.0
        } else {
            d
        }
    }

    pub fn raw(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> Vector2<f64> {
        let r = self.0.to_radians();
        vector![r.cos(), r.sin()]
    }
}

impl Add<f64> for Angle {
    type Output = Angle;

    fn add(self, degrees: f64) -> Angle {
        Angle(self.0 + degrees)
    }
}

impl AddAssign<f64> for Angle {
    fn add_assign(&mut self, degrees: f64) {
        self.0 += degrees;
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

/// 2D cross product (z component of the 3D cross product).
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
