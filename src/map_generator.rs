use std::fmt;
use std::str::FromStr;

use error_chain::bail;
use log::debug;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::errors::*;
use crate::generators;
use crate::random::RandomSource;
use crate::tiles::TileGrid;
use crate::units::{ColumnsCount, RowsCount};

/// Which maze builder carves the walls.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MazeStrategy {
    Kruskal,
    Prim,
}

impl Default for MazeStrategy {
    fn default() -> MazeStrategy {
        MazeStrategy::Prim
    }
}

impl FromStr for MazeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<MazeStrategy> {
        match s.to_lowercase().as_str() {
            "kruskal" => Ok(MazeStrategy::Kruskal),
            "prim" => Ok(MazeStrategy::Prim),
            _ => bail!("unknown maze strategy '{}', expected kruskal or prim", s),
        }
    }
}

impl fmt::Display for MazeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            MazeStrategy::Kruskal => "kruskal",
            MazeStrategy::Prim => "prim",
        };
        write!(f, "{}", name)
    }
}

/// Builds tile grid mazes with one strategy.
///
/// A generated grid depends on nothing but the dimensions, the strategy and the sequence of
/// random draws, so the same seed always gives back the same maze.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MapGenerator {
    strategy: MazeStrategy,
}

impl MapGenerator {
    pub fn new(strategy: MazeStrategy) -> MapGenerator {
        MapGenerator { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> MazeStrategy {
        self.strategy
    }

    /// Validate the dimensions, lay out a fully walled grid and carve a maze through it.
    pub fn generate<R>(&self,
                       rows: RowsCount,
                       columns: ColumnsCount,
                       rng: &mut R)
                       -> Result<TileGrid>
        where R: RandomSource + ?Sized
    {
        let mut grid = TileGrid::new(rows, columns)?;
        debug!("carving a {} x {} cell maze with {}", rows.0, columns.0, self.strategy);

        match self.strategy {
            MazeStrategy::Kruskal => generators::kruskal(&mut grid, rng)?,
            MazeStrategy::Prim => generators::prim(&mut grid, rng)?,
        }

        debug!("{} walls carved", grid.carved_walls_count());
        Ok(grid)
    }

    pub fn generate_seeded(&self,
                           rows: RowsCount,
                           columns: ColumnsCount,
                           seed: u64)
                           -> Result<TileGrid> {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        self.generate(rows, columns, &mut rng)
    }

    /// Generate with a random stream seeded from the thread local generator.
    pub fn generate_unseeded(&self, rows: RowsCount, columns: ColumnsCount) -> Result<TileGrid> {
        let mut rng = XorShiftRng::from_rng(rand::thread_rng())?;
        self.generate(rows, columns, &mut rng)
    }
}
