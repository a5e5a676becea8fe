//! Errors for maze generation and rendering.
//!
//! Other modules `use errors::*;` to get the `Error`, `ErrorKind`, `ResultExt` and `Result`
//! types that `error_chain!` creates.

use crate::cells::{CellCoordinate, WallDirection};
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageFailure(::image::ImageError);
        RandFailure(::rand::Error);
    }

    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {} x {}: both must be positive and addressable",
                    rows, columns)
        }

        OutOfBoundsAccess(cell: CellCoordinate, direction: WallDirection) {
            description("wall access outside of the cell grid")
            display("the {:?} wall of cell {} is outside of the cell grid", direction, cell)
        }

        DetachedFrontierCell(cell: CellCoordinate) {
            description("frontier cell with no neighbour in the maze")
            display("frontier cell {} has no neighbour in the maze", cell)
        }
    }
}
