use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// A logical maze cell. `x` runs along the rows of the grid (north to south) and `y` along the
/// columns (west to east).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub x: u32,
    pub y: u32,
}

impl CellCoordinate {
    pub fn new(x: u32, y: u32) -> CellCoordinate {
        CellCoordinate { x, y }
    }

    /// The direction of the wall shared with `other`, if the two cells are side by side.
    pub fn direction_to(&self, other: CellCoordinate) -> Option<WallDirection> {
        WALL_DIRECTIONS
            .iter()
            .cloned()
            .find(|dir| dir.offset(*self) == Some(other))
    }
}

impl From<(u32, u32)> for CellCoordinate {
    fn from(x_y_pair: (u32, u32)) -> CellCoordinate {
        CellCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four walls around a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallDirection {
    North,
    South,
    East,
    West,
}

/// Canonical order used whenever candidate walls or neighbours are enumerated.
pub const WALL_DIRECTIONS: [WallDirection; 4] = [WallDirection::North,
                                                 WallDirection::South,
                                                 WallDirection::East,
                                                 WallDirection::West];

impl WallDirection {
    pub fn opposite(self) -> WallDirection {
        match self {
            WallDirection::North => WallDirection::South,
            WallDirection::South => WallDirection::North,
            WallDirection::East => WallDirection::West,
            WallDirection::West => WallDirection::East,
        }
    }

    /// The coordinate one cell away in this direction, ignoring any grid bounds.
    /// Returns None if the coordinate is not representable.
    pub fn offset(self, coord: CellCoordinate) -> Option<CellCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            WallDirection::North => x.checked_sub(1).map(|x| CellCoordinate { x, y }),
            WallDirection::South => x.checked_add(1).map(|x| CellCoordinate { x, y }),
            WallDirection::East => y.checked_add(1).map(|y| CellCoordinate { x, y }),
            WallDirection::West => y.checked_sub(1).map(|y| CellCoordinate { x, y }),
        }
    }
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<CellCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[WallDirection; 4]>;
