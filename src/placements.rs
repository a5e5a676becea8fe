//! The placement stream handed to whatever draws a generated maze in a scene.
//!
//! Every tile that is not a carved wall becomes exactly one placement: the kind of element to
//! create, the tile it came from and where it goes. Positions are `(row / 2, column / 2)` scaled
//! by the tile size, integer halving, so each floor shares a position with the wall tiles on its
//! south and east sides and the pillar to its south east. Horizontal walls are turned a quarter
//! turn about the vertical axis.

use std::f32::consts::FRAC_PI_2;

use crate::tiles::{TileGrid, TileKind};
use crate::units::{ColumnIndex, RowIndex, TileSize};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub kind: TileKind,
    pub row: RowIndex,
    pub column: ColumnIndex,
    pub x: f32,
    pub y: f32,
    /// Radians.
    pub yaw: f32,
}

/// Receives placements one by one, in row major tile order.
pub trait TilePlacer {
    fn place(&mut self, placement: Placement);
}

impl TilePlacer for Vec<Placement> {
    fn place(&mut self, placement: Placement) {
        self.push(placement);
    }
}

/// The placement for one tile, None for carved walls.
pub fn placement_for(row: RowIndex,
                     column: ColumnIndex,
                     kind: TileKind,
                     size: TileSize)
                     -> Option<Placement> {
    let yaw = match kind {
        TileKind::Empty => return None,
        TileKind::HorizontalWall => FRAC_PI_2,
        TileKind::Floor | TileKind::VerticalWall | TileKind::Pillar => 0.0,
    };

    Some(Placement {
        kind,
        row,
        column,
        x: (row.0 / 2) as f32 * size.0,
        y: (column.0 / 2) as f32 * size.0,
        yaw,
    })
}

/// Stream the placements of a whole grid, returning how many were made.
pub fn place_tiles<P>(grid: &TileGrid, size: TileSize, placer: &mut P) -> usize
    where P: TilePlacer + ?Sized
{
    let mut placed = 0;
    for (row, column, kind) in grid.iter() {
        if let Some(placement) = placement_for(row, column, kind, size) {
            placer.place(placement);
            placed += 1;
        }
    }
    placed
}

pub fn placements(grid: &TileGrid, size: TileSize) -> Vec<Placement> {
    let mut placed = Vec::new();
    place_tiles(grid, size, &mut placed);
    placed
}
