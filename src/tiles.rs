use petgraph::algo::connected_components;
use petgraph::{Graph, Undirected};
use std::fmt;

use crate::cell_graph::CellGraph;
use crate::cells::{CellCoordinate, CoordinateSmallVec, WallDirection, WALL_DIRECTIONS};
use crate::errors::*;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum TileKind {
    Empty,
    Floor,
    VerticalWall,
    HorizontalWall,
    Pillar,
}

impl TileKind {
    /// The kind of tile found at `(row, column)` of a grid before any wall is carved.
    pub fn at(row: RowIndex, column: ColumnIndex) -> TileKind {
        let (RowIndex(i), ColumnIndex(j)) = (row, column);
        match (i % 2 == 1, j % 2 == 1) {
            (true, true) => TileKind::Floor,
            (true, false) => TileKind::VerticalWall,
            (false, true) => TileKind::HorizontalWall,
            (false, false) => TileKind::Pillar,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == TileKind::VerticalWall || self == TileKind::HorizontalWall
    }

    pub fn to_char(self) -> char {
        match self {
            TileKind::Empty | TileKind::Floor => ' ',
            TileKind::VerticalWall => '|',
            TileKind::HorizontalWall => '-',
            TileKind::Pillar => '+',
        }
    }
}

/// The render grid laid over a `CellGraph`: one floor tile per cell, a wall tile between every
/// pair of cells and around the border, and a pillar at every wall corner.
///
/// A grid for `rows` x `columns` cells has `2 * rows + 1` tile rows and `2 * columns + 1` tile
/// columns. Cell `(x, y)` has its floor at tile `(2x + 1, 2y + 1)`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TileGrid {
    cells: CellGraph,
    rows: RowsCount,
    columns: ColumnsCount,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<TileGrid> {
        let cells = CellGraph::new(rows, columns)?;
        Ok(TileGrid::for_cells(&cells))
    }

    /// A fully walled grid, every tile set by the parity of its row and column.
    pub fn for_cells(cells: &CellGraph) -> TileGrid {
        // CellGraph::new has already checked these cannot overflow.
        let tile_rows = 2 * cells.rows().0 + 1;
        let tile_columns = 2 * cells.columns().0 + 1;

        let mut tiles = Vec::with_capacity(tile_rows * tile_columns);
        for i in 0..tile_rows {
            for j in 0..tile_columns {
                tiles.push(TileKind::at(RowIndex(i), ColumnIndex(j)));
            }
        }

        TileGrid {
            cells: *cells,
            rows: RowsCount(tile_rows),
            columns: ColumnsCount(tile_columns),
            tiles,
        }
    }

    #[inline]
    pub fn cells(&self) -> &CellGraph {
        &self.cells
    }

    #[inline]
    pub fn tile_rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn tile_columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Every tile in row major order.
    #[inline]
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> Option<TileKind> {
        self.tile_index(row, column).map(|index| self.tiles[index])
    }

    pub fn row(&self, row: RowIndex) -> Option<&[TileKind]> {
        if row.0 < self.rows.0 {
            let start = row.0 * self.columns.0;
            Some(&self.tiles[start..start + self.columns.0])
        } else {
            None
        }
    }

    pub fn iter(&self) -> TileIter {
        TileIter {
            grid: self,
            current_tile_number: 0,
        }
    }

    pub fn floor_tile(&self, cell: CellCoordinate) -> Option<(RowIndex, ColumnIndex)> {
        if self.cells.is_valid_coordinate(cell) {
            let (x, y) = (cell.x as usize, cell.y as usize);
            Some((RowIndex(2 * x + 1), ColumnIndex(2 * y + 1)))
        } else {
            None
        }
    }

    /// The wall tile on the `direction` side of a cell. Boundary walls have a tile too, only
    /// cells off the grid have none.
    pub fn wall_tile(&self,
                     cell: CellCoordinate,
                     direction: WallDirection)
                     -> Option<(RowIndex, ColumnIndex)> {
        self.floor_tile(cell).map(|(RowIndex(i), ColumnIndex(j))| {
            match direction {
                WallDirection::North => (RowIndex(i - 1), ColumnIndex(j)),
                WallDirection::South => (RowIndex(i + 1), ColumnIndex(j)),
                WallDirection::East => (RowIndex(i), ColumnIndex(j + 1)),
                WallDirection::West => (RowIndex(i), ColumnIndex(j - 1)),
            }
        })
    }

    /// Carve the wall between a cell and its neighbour in `direction`.
    ///
    /// Boundary walls are never carved: asking for one, or for a cell off the grid, is an
    /// `OutOfBoundsAccess`.
    pub fn open_wall(&mut self, cell: CellCoordinate, direction: WallDirection) -> Result<()> {
        let neighbour = self.cells.neighbour_at_direction(cell, direction);
        let wall = self.wall_tile(cell, direction)
                       .and_then(|(row, column)| self.tile_index(row, column));

        match (wall, neighbour) {
            (Some(index), Some(_)) => {
                self.tiles[index] = TileKind::Empty;
                Ok(())
            }
            _ => Err(ErrorKind::OutOfBoundsAccess(cell, direction).into()),
        }
    }

    pub fn is_wall_open(&self, cell: CellCoordinate, direction: WallDirection) -> bool {
        self.wall_tile(cell, direction)
            .and_then(|(row, column)| self.get(row, column))
            .map_or(false, |kind| kind == TileKind::Empty)
    }

    /// Cells joined to a cell by a carved wall.
    pub fn links(&self, cell: CellCoordinate) -> CoordinateSmallVec {
        WALL_DIRECTIONS.iter()
                       .filter(|dir| self.is_wall_open(cell, **dir))
                       .filter_map(|dir| self.cells.neighbour_at_direction(cell, *dir))
                       .collect()
    }

    /// Are two cells joined by a carved wall?
    pub fn is_linked(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        a.direction_to(b)
         .map_or(false, |direction| self.is_wall_open(a, direction))
    }

    pub fn carved_walls_count(&self) -> usize {
        self.tiles.iter().filter(|kind| **kind == TileKind::Empty).count()
    }

    /// Every carved wall once, as the pair of cells it joins. The first cell of a pair is always
    /// the north or west one.
    pub fn passages(&self) -> Vec<(CellCoordinate, CellCoordinate)> {
        let mut passages = Vec::with_capacity(self.carved_walls_count());
        for cell in self.cells.iter() {
            for direction in &[WallDirection::South, WallDirection::East] {
                if self.is_wall_open(cell, *direction) {
                    if let Some(neighbour) = self.cells.neighbour_at_direction(cell, *direction) {
                        passages.push((cell, neighbour));
                    }
                }
            }
        }
        passages
    }

    /// The maze as an undirected graph with one node per cell, in cell index order, and one edge
    /// per passage.
    pub fn passage_graph(&self) -> Graph<CellCoordinate, (), Undirected> {
        let passages = self.passages();
        let mut graph = Graph::with_capacity(self.cells.size(), passages.len());
        let nodes = self.cells
                        .iter()
                        .map(|cell| graph.add_node(cell))
                        .collect::<Vec<_>>();

        for (a, b) in passages {
            if let (Some(a_index), Some(b_index)) = (self.cells.coordinate_to_index(a),
                                                     self.cells.coordinate_to_index(b)) {
                graph.add_edge(nodes[a_index], nodes[b_index], ());
            }
        }
        graph
    }

    /// A perfect maze is a spanning tree of the cells: everything is connected and there are
    /// exactly `cells - 1` passages, so there are no loops.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        graph.edge_count() + 1 == self.cells.size() && connected_components(&graph) == 1
    }

    #[inline]
    fn tile_index(&self, row: RowIndex, column: ColumnIndex) -> Option<usize> {
        if row.0 < self.rows.0 && column.0 < self.columns.0 {
            Some(row.0 * self.columns.0 + column.0)
        } else {
            None
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.columns.0) {
            let line: String = row.iter().map(|kind| kind.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Row major iteration over `(row, column, kind)` for every tile.
#[derive(Debug, Clone)]
pub struct TileIter<'a> {
    grid: &'a TileGrid,
    current_tile_number: usize,
}

impl<'a> ExactSizeIterator for TileIter<'a> {} // default impl using size_hint()
impl<'a> Iterator for TileIter<'a> {
    type Item = (RowIndex, ColumnIndex, TileKind);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.current_tile_number;
        let columns = self.grid.columns.0;
        let kind = *self.grid.tiles.get(n)?;
        self.current_tile_number += 1;
        Some((RowIndex(n / columns), ColumnIndex(n % columns), kind))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.grid.tiles.len() - self.current_tile_number;
        (lower_bound, Some(lower_bound))
    }
}

impl<'a> IntoIterator for &'a TileGrid {
    type Item = (RowIndex, ColumnIndex, TileKind);
    type IntoIter = TileIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
