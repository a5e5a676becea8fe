use error_chain::bail;

use crate::cells::{CellCoordinate, CoordinateOptionSmallVec, CoordinateSmallVec, WallDirection,
                   WALL_DIRECTIONS};
use crate::errors::*;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, RowsCount};

/// The implicit graph of logical maze cells: a `rows` x `columns` grid where each cell is adjacent
/// to the cells directly north, south, east and west of it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellGraph {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl CellGraph {
    /// Fails with `InvalidDimension` if either side is empty or too large to address, either as a
    /// cell coordinate or as the tile grid drawn over these cells.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<CellGraph> {
        let (RowsCount(max_x), ColumnsCount(max_y)) = (rows, columns);

        let addressable = max_x >= 1 && max_y >= 1 &&
                          max_x <= u32::MAX as usize && max_y <= u32::MAX as usize;
        let tiles_count = tile_extent(max_x)
            .and_then(|tile_rows| tile_extent(max_y).and_then(|tile_cols| tile_rows.checked_mul(tile_cols)));

        if !addressable || tiles_count.is_none() {
            bail!(ErrorKind::InvalidDimension(max_x, max_y));
        }

        Ok(CellGraph { rows, columns })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        (coord.x as usize) < self.rows.0 && (coord.y as usize) < self.columns.0
    }

    /// Convert a cell coordinate to a one dimensional index in the range 0...size().
    /// This is also the initial group label of the cell: `x * columns + y`.
    #[inline]
    pub fn coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.x as usize * self.columns.0 + coord.y as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<CellCoordinate> {
        if index < self.size() {
            Some(index_to_cell_coordinate(self.columns.0, index))
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: CellCoordinate,
                                  direction: WallDirection)
                                  -> Option<CellCoordinate> {
        direction.offset(coord)
                 .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    pub fn neighbours_at_directions(&self,
                                    coord: CellCoordinate,
                                    dirs: &[WallDirection])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells that are to the North, South, East or West of a cell, in that order.
    pub fn neighbours(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        WALL_DIRECTIONS.iter()
                       .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                       .collect()
    }

    /// Two cells are adjacent when both are on the grid and they differ by exactly one step along
    /// exactly one axis.
    pub fn is_neighbour(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        let dx = (i64::from(a.x) - i64::from(b.x)).abs();
        let dy = (i64::from(a.y) - i64::from(b.y)).abs();
        dx + dy == 1
    }

    /// A uniformly chosen cell, drawing the row before the column.
    pub fn random_cell<R: RandomSource + ?Sized>(&self, rng: &mut R) -> CellCoordinate {
        let x = rng.int_in_range(0, self.rows.0 - 1);
        let y = rng.int_in_range(0, self.columns.0 - 1);
        CellCoordinate::new(x as u32, y as u32)
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns.0,
            cells_count: self.size(),
        }
    }
}

impl<'a> IntoIterator for &'a CellGraph {
    type Item = CellCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row major iteration over every cell.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = CellCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_cell_coordinate(self.columns, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Tiles along one axis for `cells` cells: one floor per cell plus the walls either side.
pub(crate) fn tile_extent(cells: usize) -> Option<usize> {
    cells.checked_mul(2).and_then(|n| n.checked_add(1))
}

fn index_to_cell_coordinate(columns: usize, one_dimensional_index: usize) -> CellCoordinate {
    let x = one_dimensional_index / columns;
    let y = one_dimensional_index % columns;
    CellCoordinate::new(x as u32, y as u32)
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn graph(rows: usize, columns: usize) -> CellGraph {
        CellGraph::new(RowsCount(rows), ColumnsCount(columns)).expect("invalid test dimensions")
    }

    #[test]
    fn neighbour_cells() {
        let g = graph(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[CellCoordinate]| {
            let node_indices: Vec<CellCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected_indices: Vec<CellCoordinate> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(node_indices, expected_indices);
        };
        let gc = |x, y| CellCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbours_come_in_wall_direction_order() {
        let g = graph(3, 3);
        let gc = |x, y| CellCoordinate::new(x, y);
        assert_eq!(&*g.neighbours(gc(1, 1)), &[gc(0, 1), gc(2, 1), gc(1, 2), gc(1, 0)]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = graph(2, 2);
        let gc = |x, y| CellCoordinate::new(x, y);

        let check_neighbours =
            |coord, dirs: &[WallDirection], neighbour_opts: &[Option<CellCoordinate>]| {
                let neighbour_options = g.neighbours_at_directions(coord, dirs);
                assert_eq!(&*neighbour_options, neighbour_opts);
            };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[WallDirection::North], &[None]);
        check_neighbours(gc(0, 0), &[WallDirection::West], &[None]);
        check_neighbours(gc(0, 0),
                         &[WallDirection::South, WallDirection::East],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);

        check_neighbours(gc(1, 1), &[WallDirection::South, WallDirection::East], &[None, None]);
        check_neighbours(gc(1, 1),
                         &[WallDirection::West, WallDirection::North],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);
    }

    #[test]
    fn rectangular_bounds() {
        let g = graph(2, 4);
        let gc = |x, y| CellCoordinate::new(x, y);
        assert!(g.is_valid_coordinate(gc(1, 3)));
        assert!(!g.is_valid_coordinate(gc(2, 0)));
        assert!(!g.is_valid_coordinate(gc(0, 4)));
        assert_eq!(g.neighbour_at_direction(gc(1, 3), WallDirection::South), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 3), WallDirection::East), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 3), WallDirection::North), Some(gc(0, 3)));
    }

    #[test]
    fn adjacency_is_one_step_on_one_axis() {
        let g = graph(3, 3);
        let gc = |x, y| CellCoordinate::new(x, y);
        assert!(g.is_neighbour(gc(0, 0), gc(0, 1)));
        assert!(g.is_neighbour(gc(0, 0), gc(1, 0)));
        assert!(g.is_neighbour(gc(2, 1), gc(1, 1)));
        assert!(!g.is_neighbour(gc(0, 0), gc(0, 0)));
        assert!(!g.is_neighbour(gc(0, 0), gc(1, 1)));
        assert!(!g.is_neighbour(gc(0, 0), gc(0, 2)));
        assert!(!g.is_neighbour(gc(2, 2), gc(3, 2)));
    }

    #[test]
    fn grid_size() {
        let g = graph(10, 7);
        assert_eq!(g.size(), 70);
        assert_eq!(g.rows(), RowsCount(10));
        assert_eq!(g.columns(), ColumnsCount(7));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(rows, columns) in &[(0, 0), (0, 3), (3, 0)] {
            let result = CellGraph::new(RowsCount(rows), ColumnsCount(columns));
            match result {
                Err(Error(ErrorKind::InvalidDimension(r, c), _)) => {
                    assert_eq!((r, c), (rows, columns));
                }
                other => panic!("expected InvalidDimension, got {:?}", other),
            }
        }
    }

    #[test]
    fn unaddressable_dimensions_are_rejected() {
        assert!(CellGraph::new(RowsCount(usize::max_value()), ColumnsCount(1)).is_err());
        assert!(CellGraph::new(RowsCount(1), ColumnsCount(usize::max_value() / 2)).is_err());
    }

    #[test]
    fn cell_coordinate_as_index() {
        let g = graph(2, 3);
        let gc = |x, y| CellCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
                                                .map(|coord| g.coordinate_to_index(*coord))
                                                .collect();
        let expected = (0..6).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.coordinate_to_index(gc(2, 0)), None);
        assert_eq!(g.coordinate_to_index(gc(0, 3)), None);
        assert_eq!(g.coordinate_to_index(gc(u32::MAX, u32::MAX)), None);

        for (index, coord) in coords.iter().enumerate() {
            assert_eq!(g.index_to_coordinate(index), Some(*coord));
        }
        assert_eq!(g.index_to_coordinate(6), None);
    }

    #[test]
    fn random_cell() {
        let g = graph(4, 6);
        let mut rng = XorShiftRng::seed_from_u64(3);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = graph(2, 2);
        assert_eq!(g.iter().len(), 4);
        assert_eq!(g.iter().collect::<Vec<CellCoordinate>>(),
                   &[CellCoordinate::new(0, 0),
                     CellCoordinate::new(0, 1),
                     CellCoordinate::new(1, 0),
                     CellCoordinate::new(1, 1)]);
    }
}
