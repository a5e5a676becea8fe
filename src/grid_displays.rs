use fnv::FnvHashSet;

use crate::cells::CellCoordinate;
use crate::tiles::{TileGrid, TileKind};
use crate::units::{ColumnIndex, RowIndex};

/// Chooses the character drawn for each tile of a text rendering.
pub trait TileDisplay {
    fn render_tile(&self, _row: RowIndex, _column: ColumnIndex, kind: TileKind) -> char {
        kind.to_char()
    }
}

/// The same characters as the grid's own `Display`.
#[derive(Debug, Copy, Clone, Default)]
pub struct PlainDisplay;
impl TileDisplay for PlainDisplay {}

/// Marks a path through the maze with `.`: the floor of every path cell and the carved wall
/// between each pair of consecutive cells.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_tiles: FnvHashSet<(RowIndex, ColumnIndex)>,
}

impl PathDisplay {
    pub fn new(grid: &TileGrid, path: &[CellCoordinate]) -> PathDisplay {
        let floors = path.iter().filter_map(|cell| grid.floor_tile(*cell));
        let passages = path.windows(2).filter_map(|step| {
            step[0].direction_to(step[1])
                   .filter(|direction| grid.is_wall_open(step[0], *direction))
                   .and_then(|direction| grid.wall_tile(step[0], direction))
        });

        PathDisplay { on_path_tiles: floors.chain(passages).collect() }
    }

    pub fn is_on_path(&self, row: RowIndex, column: ColumnIndex) -> bool {
        self.on_path_tiles.contains(&(row, column))
    }
}

impl TileDisplay for PathDisplay {
    fn render_tile(&self, row: RowIndex, column: ColumnIndex, kind: TileKind) -> char {
        if self.is_on_path(row, column) {
            '.'
        } else {
            kind.to_char()
        }
    }
}

/// One line per tile row, each ending with a newline.
pub fn render_text(grid: &TileGrid, display: &dyn TileDisplay) -> String {
    let columns = grid.tile_columns().0;
    let mut text = String::with_capacity(grid.tiles().len() + grid.tile_rows().0);

    for (row, column, kind) in grid.iter() {
        text.push(display.render_tile(row, column, kind));
        if column.0 + 1 == columns {
            text.push('\n');
        }
    }
    text
}
