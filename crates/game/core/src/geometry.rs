//! Positions and compass directions on a wrapped (toroidal) floor grid.
//!
//! Floors wrap on both axes: stepping off the east edge lands on the west
//! edge. All distance and direction questions therefore use the minimal
//! signed wrapped delta rather than the raw coordinate difference.

use core::fmt;

/// Discrete grid position expressed in tile coordinates.
///
/// Coordinates are not required to lie inside the floor; the geometry
/// functions wrap them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One step in `dir`, wrapped onto the floor.
    pub fn step(self, dir: Way9, dims: MapDimensions) -> Self {
        let (dx, dy) = dir.offset();
        dims.wrap(Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a floor.
///
/// Both must be positive; a zero dimension is a caller bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "floor dimensions must be positive");
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    /// Maps any coordinate pair onto the floor.
    pub fn wrap(&self, position: Position) -> Position {
        Position::new(
            (position.x as i64).rem_euclid(self.width as i64) as i32,
            (position.y as i64).rem_euclid(self.height as i64) as i32,
        )
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Nine-way compass: the eight neighbours plus the tile itself.
///
/// Coordinate system: X grows eastward, Y grows northward.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Way9 {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Way9 {
    pub const ALL: [Way9; 9] = [
        Way9::Center,
        Way9::North,
        Way9::NorthEast,
        Way9::East,
        Way9::SouthEast,
        Way9::South,
        Way9::SouthWest,
        Way9::West,
        Way9::NorthWest,
    ];

    /// Returns the offset (dx, dy) for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Way9::Center => (0, 0),
            Way9::North => (0, 1),
            Way9::NorthEast => (1, 1),
            Way9::East => (1, 0),
            Way9::SouthEast => (1, -1),
            Way9::South => (0, -1),
            Way9::SouthWest => (-1, -1),
            Way9::West => (-1, 0),
            Way9::NorthWest => (-1, 1),
        }
    }

    /// Direction matching the signs of `(dx, dy)`; magnitudes are ignored.
    pub const fn from_signs(dx: i64, dy: i64) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, 0) => Way9::Center,
            (0, 1) => Way9::North,
            (1, 1) => Way9::NorthEast,
            (1, 0) => Way9::East,
            (1, -1) => Way9::SouthEast,
            (0, -1) => Way9::South,
            (-1, -1) => Way9::SouthWest,
            (-1, 0) => Way9::West,
            _ => Way9::NorthWest,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Way9::Center => Way9::Center,
            Way9::North => Way9::South,
            Way9::NorthEast => Way9::SouthWest,
            Way9::East => Way9::West,
            Way9::SouthEast => Way9::NorthWest,
            Way9::South => Way9::North,
            Way9::SouthWest => Way9::NorthEast,
            Way9::West => Way9::East,
            Way9::NorthWest => Way9::SouthEast,
        }
    }
}

/// Minimal signed delta from `from` to `to` on an axis of length `len`.
///
/// Result lies in `[-len/2, len - len/2)`.
fn wrapped_delta(from: i32, to: i32, len: u32) -> i64 {
    let len = len as i64;
    let half = len / 2;
    (to as i64 - from as i64 + half).rem_euclid(len) - half
}

/// Wrapped delta `(dx, dy)` from `from` to `to`.
pub fn wrapped_offset(from: Position, to: Position, dims: MapDimensions) -> (i64, i64) {
    assert!(
        dims.width > 0 && dims.height > 0,
        "floor dimensions must be positive"
    );
    (
        wrapped_delta(from.x, to.x, dims.width),
        wrapped_delta(from.y, to.y, dims.height),
    )
}

/// Whether `to` touches `from` (Chebyshev distance at most 1 on the wrapped
/// grid, the tile itself included) and in which direction it lies.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn contact_direction(from: Position, to: Position, dims: MapDimensions) -> (bool, Way9) {
    let (dx, dy) = wrapped_offset(from, to, dims);
    let is_adjacent = dx.abs() <= 1 && dy.abs() <= 1;
    (is_adjacent, Way9::from_signs(dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> MapDimensions {
        MapDimensions::new(w, h)
    }

    fn contact(a: (i32, i32), b: (i32, i32), d: MapDimensions) -> (bool, Way9) {
        contact_direction(Position::new(a.0, a.1), Position::new(b.0, b.1), d)
    }

    #[test]
    fn wraps_across_the_east_edge() {
        let (adjacent, dir) = contact((0, 5), (9, 5), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::West);

        let (adjacent, dir) = contact((9, 5), (0, 5), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::East);
    }

    #[test]
    fn wraps_across_a_corner() {
        let (adjacent, dir) = contact((0, 0), (9, 9), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::SouthWest);
    }

    #[test]
    fn same_tile_is_center() {
        let (adjacent, dir) = contact((3, 4), (3, 4), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::Center);
    }

    #[test]
    fn distance_two_is_not_adjacent() {
        let (adjacent, dir) = contact((3, 3), (5, 3), dims(10, 10));
        assert!(!adjacent);
        assert_eq!(dir, Way9::East);

        let (adjacent, _) = contact((0, 0), (8, 0), dims(10, 10));
        assert!(!adjacent);
    }

    #[test]
    fn negative_coordinates_wrap() {
        let (adjacent, dir) = contact((-1, 0), (0, 0), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::East);

        let (adjacent, dir) = contact((0, 0), (-11, 1), dims(10, 10));
        assert!(adjacent);
        assert_eq!(dir, Way9::NorthWest);
    }

    #[test]
    fn odd_sized_floor() {
        let (adjacent, dir) = contact((0, 2), (4, 2), dims(5, 5));
        assert!(adjacent);
        assert_eq!(dir, Way9::West);
    }

    #[test]
    fn swapping_points_inverts_direction() {
        let d = dims(10, 8);
        let points = [
            Position::new(0, 0),
            Position::new(9, 7),
            Position::new(4, 4),
            Position::new(5, 3),
            Position::new(0, 7),
            Position::new(1, 1),
        ];
        for a in points {
            for b in points {
                let (ab_adjacent, ab) = contact_direction(a, b, d);
                let (ba_adjacent, ba) = contact_direction(b, a, d);
                assert_eq!(ab_adjacent, ba_adjacent);
                if ab_adjacent {
                    assert_eq!(ab.opposite(), ba, "{a} -> {b}");
                }
            }
        }
    }

    #[test]
    fn step_wraps_onto_floor() {
        let d = dims(10, 10);
        assert_eq!(Position::new(9, 0).step(Way9::SouthEast, d), Position::new(0, 9));
        assert_eq!(Position::new(4, 4).step(Way9::Center, d), Position::new(4, 4));
    }

    #[test]
    #[should_panic(expected = "floor dimensions must be positive")]
    fn zero_width_is_rejected() {
        let _ = MapDimensions::new(0, 10);
    }
}
