// Flood fill distances over the carved passages of a tile grid.
//
// There are no weights on the passages, every step is one more than the previous cell, so a
// breadth first flood fill is all Dijkstra's algorithm amounts to here. Once a cell has a distance
// it is already the shortest one and the map doubles as the visited set.

use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::CellCoordinate;
use crate::tiles::TileGrid;

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Steps from `start_coordinate` to every cell reachable from it. None if the start is not a
    /// cell of the grid.
    pub fn new(grid: &TileGrid, start_coordinate: CellCoordinate) -> Option<Distances> {
        if !grid.cells().is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.cells().size(),
                                                                 Default::default());
        distances.insert(start_coordinate, 0);

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord).iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None for unreachable cells and cells off the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, in coordinate order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[CellCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start, always stepping to a linked neighbour one step
/// closer. The path runs from the start to `end_point` inclusive.
pub fn shortest_path(grid: &TileGrid,
                     distances_from_start: &Distances,
                     end_point: CellCoordinate)
                     -> Option<Vec<CellCoordinate>> {
    // Unreachable from the start
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {
        let current_distance = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)
                                   .iter()
                                   .filter_map(|coord| {
                                       distances_from_start.distance_from_start_to(*coord)
                                                           .map(|distance| (*coord, distance))
                                   })
                                   .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // Distances from a different grid, or a grid changed since the flood fill.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Exact for perfect mazes, where it is the path between the two furthest apart cells. Otherwise
/// it is just some long path.
pub fn longest_path(grid: &TileGrid) -> Option<Vec<CellCoordinate>> {
    let first_distances = Distances::new(grid, CellCoordinate::new(0, 0))?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
