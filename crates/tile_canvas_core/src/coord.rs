//! World coordinates and their textual key form
//!
//! A `Coord` names one cell of the unbounded grid. Its `Display` output
//! (`"x,y"`) is the key used in saved level files, and `FromStr` is the exact
//! inverse: two base-10 integers separated by a single comma, no whitespace.

use crate::GridError;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Separator between the two components of a serialized key
pub const KEY_SEPARATOR: char = ',';

/// A cell position in the infinite grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta, saturating at the i32 bounds
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        self.offset(rhs.x, rhs.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (i32, i32) {
    fn from(coord: Coord) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x, KEY_SEPARATOR, self.y)
    }
}

impl FromStr for Coord {
    type Err = GridError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || GridError::MalformedKey {
            key: key.to_string(),
        };

        let mut parts = key.split(KEY_SEPARATOR);
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let x = x.parse::<i32>().map_err(|_| malformed())?;
        let y = y.parse::<i32>().map_err(|_| malformed())?;
        Ok(Self { x, y })
    }
}

/// A pointer position in window pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_key() {
        assert_eq!(Coord::new(0, 0).to_string(), "0,0");
        assert_eq!(Coord::new(-3, 5).to_string(), "-3,5");
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("12,-7".parse::<Coord>().unwrap(), Coord::new(12, -7));
        assert_eq!("-2147483648,2147483647".parse::<Coord>().unwrap(), Coord::new(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for key in ["abc", "", "1", "1,2,3", "1, 2", " 1,2", "1;2", "x,1", "1,", ",1", "99999999999,0"] {
            let err = key.parse::<Coord>().unwrap_err();
            assert_eq!(
                err,
                GridError::MalformedKey {
                    key: key.to_string()
                },
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_offset_saturates() {
        let edge = Coord::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(1, -1), edge);
        assert_eq!(Coord::new(2, 3) + Coord::new(-5, 1), Coord::new(-3, 4));
    }
}
