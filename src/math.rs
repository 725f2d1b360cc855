use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// 2D value used for pointer motion, directional keys and analog sticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(Vector2::default(), Vector2::ZERO);
        assert!(Vector2::default().is_zero());
    }

    #[test]
    fn accumulates_componentwise() {
        let mut v = Vector2::new(1.0, -2.0);
        v += Vector2::new(4.0, -1.0);
        assert_eq!(v, Vector2::new(5.0, -3.0));
        assert_eq!(v + Vector2::ZERO, v);
    }
}
