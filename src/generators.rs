use bit_set::BitSet;
use error_chain::bail;
use log::{debug, trace};

use crate::cell_graph::CellGraph;
use crate::cells::{CellCoordinate, DirectionSmallVec, WallDirection, WALL_DIRECTIONS};
use crate::errors::*;
use crate::random::RandomSource;
use crate::tiles::TileGrid;

/// Apply a randomised Kruskal style maze generation algorithm to a freshly walled tile grid.
///
/// Every cell starts out in its own group, labelled with its cell index. We repeatedly pick a
/// random cell, anywhere on the grid, and look for neighbours that are still in a different
/// group. If there are none the pick is simply wasted and we go again. Otherwise one of those
/// neighbours is chosen at random, the wall between the two cells is carved and the two groups
/// are merged by relabelling every cell of the larger label with the smaller label.
///
/// Merging only ever happens across group boundaries so no passage can close a loop, and we stop
/// once a single group is left: every cell is then reachable from every other cell. Termination
/// is certain with probability 1, there is no upper bound on the number of picks.
pub fn kruskal<R>(grid: &mut TileGrid, rng: &mut R) -> Result<()>
    where R: RandomSource + ?Sized
{
    let cells = *grid.cells();
    let mut labels = Labels::new(&cells);
    let mut picks = 0usize;

    while !labels.is_single_group() {
        picks += 1;
        let cell_a = cells.random_cell(rng);

        let candidates = different_neighbours(&cells, &labels, cell_a);
        if candidates.is_empty() {
            continue;
        }

        let wall = candidates[rng.int_in_range(0, candidates.len() - 1)];
        let cell_b = cells.neighbour_at_direction(cell_a, wall)
                          .ok_or_else(|| out_of_bounds(cell_a, wall))?;
        let label_a = labels.label(cell_a).ok_or_else(|| out_of_bounds(cell_a, wall))?;
        let label_b = labels.label(cell_b).ok_or_else(|| out_of_bounds(cell_a, wall))?;

        grid.open_wall(cell_a, wall)?;

        let (merged_away, kept) = (label_a.max(label_b), label_a.min(label_b));
        labels.relabel(merged_away, kept);
        trace!("joined {} to {} through its {:?} wall, label {} becomes {}",
               cell_a, cell_b, wall, merged_away, kept);
    }

    debug!("kruskal: {} cells joined after {} random picks", cells.size(), picks);
    Ok(())
}

/// Apply a randomised Prim style maze generation algorithm to a freshly walled tile grid.
///
/// The maze grows outwards from the north west corner cell. The frontier holds every cell that
/// touches the maze but is not yet part of it. Each step takes a random frontier cell, carves
/// through to one of its neighbours already in the maze (chosen at random if there are several)
/// and then pulls the new cell's untouched neighbours into the frontier.
///
/// A cell only enters the frontier from a maze neighbour, so there is always at least one wall to
/// carve. Every cell is added to the maze exactly once, with exactly one passage, which makes the
/// result a spanning tree. Cells move from unvisited to frontier to maze and never back.
pub fn prim<R>(grid: &mut TileGrid, rng: &mut R) -> Result<()>
    where R: RandomSource + ?Sized
{
    let cells = *grid.cells();
    let mut growth = PrimGrowth::new(&cells);
    growth.absorb(&cells, CellCoordinate::new(0, 0));

    while !growth.frontier.is_empty() {
        let pick = rng.int_in_range(0, growth.frontier.len() - 1);
        let cell = growth.frontier[pick];

        let walls = dividing_walls(&cells, &growth.maze, cell);
        if walls.is_empty() {
            bail!(ErrorKind::DetachedFrontierCell(cell));
        }
        let wall = walls[rng.int_in_range(0, walls.len() - 1)];
        grid.open_wall(cell, wall)?;

        growth.frontier.swap_remove(pick);
        growth.absorb(&cells, cell);
        trace!("absorbed {} through its {:?} wall, {} cells in the frontier",
               cell, wall, growth.frontier.len());
    }

    debug!("prim: {} of {} cells in the maze", growth.maze.len(), cells.size());
    Ok(())
}

fn out_of_bounds(cell: CellCoordinate, direction: WallDirection) -> Error {
    ErrorKind::OutOfBoundsAccess(cell, direction).into()
}

/// Walls of a cell that lead to a neighbour in a different group.
fn different_neighbours(cells: &CellGraph,
                        labels: &Labels,
                        coord: CellCoordinate)
                        -> DirectionSmallVec {
    let own_label = labels.label(coord);
    WALL_DIRECTIONS.iter()
                   .cloned()
                   .filter(|dir| {
                       cells.neighbour_at_direction(coord, *dir)
                            .and_then(|neighbour| labels.label(neighbour))
                            .map_or(false, |label| Some(label) != own_label)
                   })
                   .collect()
}

/// Walls of a cell that lead to a neighbour already in the maze.
fn dividing_walls(cells: &CellGraph, maze: &BitSet, coord: CellCoordinate) -> DirectionSmallVec {
    WALL_DIRECTIONS.iter()
                   .cloned()
                   .filter(|dir| {
                       cells.neighbour_at_direction(coord, *dir)
                            .and_then(|neighbour| cells.coordinate_to_index(neighbour))
                            .map_or(false, |index| maze.contains(index))
                   })
                   .collect()
}

/// Connected group label of every cell, indexed like the cells themselves.
#[derive(Debug, Clone)]
struct Labels {
    cells: CellGraph,
    labels: Vec<usize>,
    groups: usize,
}

impl Labels {
    fn new(cells: &CellGraph) -> Labels {
        Labels {
            cells: *cells,
            labels: (0..cells.size()).collect(),
            groups: cells.size(),
        }
    }

    #[inline]
    fn label(&self, coord: CellCoordinate) -> Option<usize> {
        self.cells.coordinate_to_index(coord).map(|index| self.labels[index])
    }

    /// Full scan, every cell labelled `old` joins group `new`.
    fn relabel(&mut self, old: usize, new: usize) {
        if old == new {
            return;
        }
        for label in self.labels.iter_mut().filter(|label| **label == old) {
            *label = new;
        }
        self.groups -= 1;
    }

    #[inline]
    fn is_single_group(&self) -> bool {
        self.groups <= 1
    }
}

/// Maze and frontier membership (by cell index) for Prim style growth.
#[derive(Debug)]
struct PrimGrowth {
    maze: BitSet,
    frontier_members: BitSet,
    frontier: Vec<CellCoordinate>,
}

impl PrimGrowth {
    fn new(cells: &CellGraph) -> PrimGrowth {
        PrimGrowth {
            maze: BitSet::with_capacity(cells.size()),
            frontier_members: BitSet::with_capacity(cells.size()),
            frontier: Vec::new(),
        }
    }

    /// Move a cell into the maze and its unvisited neighbours into the frontier. The cell must
    /// already have been taken out of the `frontier` vec.
    fn absorb(&mut self, cells: &CellGraph, cell: CellCoordinate) {
        if let Some(index) = cells.coordinate_to_index(cell) {
            self.frontier_members.remove(index);
            self.maze.insert(index);
        }

        for neighbour in cells.neighbours(cell).iter() {
            if let Some(index) = cells.coordinate_to_index(*neighbour) {
                if !self.maze.contains(index) && !self.frontier_members.contains(index) {
                    self.frontier_members.insert(index);
                    self.frontier.push(*neighbour);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::random::ScriptedRandom;
    use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};
    use crate::tiles::TileKind;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn grid(rows: usize, columns: usize) -> TileGrid {
        TileGrid::new(RowsCount(rows), ColumnsCount(columns)).expect("invalid test dimensions")
    }

    fn carved(grid: &TileGrid) -> Vec<(usize, usize)> {
        grid.iter()
            .filter(|&(_, _, kind)| kind == TileKind::Empty)
            .map(|(RowIndex(i), ColumnIndex(j), _)| (i, j))
            .collect()
    }

    #[test]
    fn kruskal_golden_two_by_two() {
        let mut g = grid(2, 2);
        // (0, 0) joins south, (1, 1) joins north, (0, 1) joins west
        let mut rng = ScriptedRandom::new(vec![0, 0, 0, 1, 1, 0, 0, 1, 0]);
        kruskal(&mut g, &mut rng).expect("generation failed");

        assert_eq!(rng.draws_taken(), 9);
        assert_eq!(carved(&g), vec![(1, 2), (2, 1), (2, 3)]);
        assert_eq!(g.to_string(),
                   "+-+-+\n\
                    |   |\n\
                    + + +\n\
                    | | |\n\
                    +-+-+\n");
        assert!(g.is_perfect_maze());
    }

    #[test]
    fn prim_golden_two_by_two() {
        let mut g = grid(2, 2);
        // take (0, 1) through west, then (1, 1) through north, then (1, 0) through east
        let mut rng = ScriptedRandom::new(vec![1, 0, 1, 0, 0, 1]);
        prim(&mut g, &mut rng).expect("generation failed");

        assert_eq!(rng.draws_taken(), 6);
        assert_eq!(carved(&g), vec![(1, 2), (2, 3), (3, 2)]);
        assert_eq!(g.to_string(),
                   "+-+-+\n\
                    |   |\n\
                    +-+ +\n\
                    |   |\n\
                    +-+-+\n");
        assert!(g.is_perfect_maze());
    }

    #[test]
    fn kruskal_single_row_joins_east() {
        let mut g = grid(1, 2);
        // (0, 0) joins east, then the loop ends without needing another pick
        let mut rng = ScriptedRandom::new(vec![0, 0, 0]);
        kruskal(&mut g, &mut rng).expect("generation failed");
        assert_eq!(carved(&g), vec![(1, 2)]);

        let cells = *g.cells();
        let mut labels = Labels::new(&cells);
        labels.relabel(1, 0);
        assert!(labels.is_single_group());
        assert!(different_neighbours(&cells, &labels, CellCoordinate::new(0, 0)).is_empty());
        assert!(different_neighbours(&cells, &labels, CellCoordinate::new(0, 1)).is_empty());
    }

    #[test]
    fn single_cell_needs_no_random_draws() {
        let mut rng = ScriptedRandom::new(vec![0]);

        let mut g = grid(1, 1);
        kruskal(&mut g, &mut rng).expect("generation failed");
        prim(&mut g, &mut rng).expect("generation failed");

        assert_eq!(rng.draws_taken(), 0);
        assert_eq!(g.carved_walls_count(), 0);
        assert_eq!(g.to_string(), "+-+\n| |\n+-+\n");
    }

    #[test]
    fn labels_merge_to_the_smaller_label() {
        let cells = *grid(2, 3).cells();
        let mut labels = Labels::new(&cells);
        assert_eq!(labels.labels, vec![0, 1, 2, 3, 4, 5]);

        labels.relabel(4, 1);
        labels.relabel(5, 1);
        assert_eq!(labels.labels, vec![0, 1, 2, 3, 1, 1]);
        assert_eq!(labels.groups, 4);

        labels.relabel(1, 1);
        assert_eq!(labels.groups, 4);
    }

    #[test]
    fn different_neighbours_skip_boundaries_and_own_group() {
        let cells = *grid(2, 2).cells();
        let mut labels = Labels::new(&cells);
        let gc = |x, y| CellCoordinate::new(x, y);

        assert_eq!(&*different_neighbours(&cells, &labels, gc(0, 0)),
                   &[WallDirection::South, WallDirection::East]);
        labels.relabel(2, 0);
        assert_eq!(&*different_neighbours(&cells, &labels, gc(0, 0)), &[WallDirection::East]);
        assert_eq!(&*different_neighbours(&cells, &labels, gc(1, 1)),
                   &[WallDirection::North, WallDirection::West]);
    }

    #[test]
    fn dividing_walls_point_into_the_maze() {
        let cells = *grid(3, 3).cells();
        let mut maze = BitSet::new();
        let (top, left) = (CellCoordinate::new(0, 1), CellCoordinate::new(1, 0));
        maze.insert(cells.coordinate_to_index(top).unwrap());
        maze.insert(cells.coordinate_to_index(left).unwrap());

        assert_eq!(&*dividing_walls(&cells, &maze, CellCoordinate::new(1, 1)),
                   &[WallDirection::North, WallDirection::West]);
        assert!(dividing_walls(&cells, &maze, CellCoordinate::new(2, 2)).is_empty());
    }

    #[test]
    fn prim_frontier_includes_the_first_row_and_column() {
        let cells = *grid(3, 3).cells();
        let mut growth = PrimGrowth::new(&cells);
        growth.absorb(&cells, CellCoordinate::new(0, 1));
        assert_eq!(growth.frontier,
                   vec![CellCoordinate::new(1, 1),
                        CellCoordinate::new(0, 2),
                        CellCoordinate::new(0, 0)]);
        assert_eq!(growth.maze.len(), 1);
    }

    #[test]
    fn both_builders_carve_spanning_trees() {
        let mut rng = XorShiftRng::seed_from_u64(2017);
        for &(rows, columns) in &[(1, 1), (1, 7), (7, 1), (2, 2), (5, 8), (12, 12)] {
            let mut k = grid(rows, columns);
            kruskal(&mut k, &mut rng).expect("kruskal failed");
            assert!(k.is_perfect_maze(), "kruskal {} x {}", rows, columns);
            assert_eq!(k.carved_walls_count(), rows * columns - 1);

            let mut p = grid(rows, columns);
            prim(&mut p, &mut rng).expect("prim failed");
            assert!(p.is_perfect_maze(), "prim {} x {}", rows, columns);
            assert_eq!(p.carved_walls_count(), rows * columns - 1);
        }
    }
}
