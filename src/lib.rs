//! **tilemazes** generates perfect mazes and lays them out as a tile map.
//!
//! A maze of `rows x columns` cells is carried by a `(2 * rows + 1) x (2 * columns + 1)` tile
//! grid of floors, walls and pillars. A maze builder (Kruskal or Prim style) carves walls into
//! passages until every cell is joined to every other by exactly one route. The carved grid can
//! then be walked for distances and paths, drawn as text or a PNG, or streamed as placements
//! to whatever builds the maze in a scene.

// error_chain! expands deeply
#![recursion_limit = "1024"]

pub mod cell_graph;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid_displays;
pub mod map_generator;
pub mod pathing;
pub mod placements;
pub mod random;
pub mod renderers;
pub mod tiles;
pub mod units;

pub use crate::map_generator::{MapGenerator, MazeStrategy};
pub use crate::tiles::{TileGrid, TileKind};
