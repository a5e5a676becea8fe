use std::path::Path;

use error_chain::bail;
use image::{Rgb, RgbImage};
use log::debug;

use crate::cells::CellCoordinate;
use crate::errors::*;
use crate::grid_displays::PathDisplay;
use crate::tiles::{TileGrid, TileKind};

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const WALL: Rgb<u8> = Rgb([0x20, 0x20, 0x30]);
const RED: Rgb<u8> = Rgb([0xff, 0, 0]);

#[derive(Debug, Clone)]
pub struct RenderOptions<'path> {
    tile_side_pixels_length: u8,
    output_file: Option<&'path Path>,
    path: Option<&'path [CellCoordinate]>,
}

impl<'path> RenderOptions<'path> {
    pub fn tile_side_pixels_length(&self) -> u8 {
        self.tile_side_pixels_length
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                tile_side_pixels_length: 8,
                output_file: None,
                path: None,
            },
        }
    }

    /// Zero is treated as one pixel.
    pub fn tile_side_pixels_length(mut self, pixels: u8) -> Self {
        self.options.tile_side_pixels_length = pixels.max(1);
        self
    }

    pub fn output_file(mut self, output_file: Option<&'path Path>) -> Self {
        self.options.output_file = output_file;
        self
    }

    pub fn path(mut self, path: Option<&'path [CellCoordinate]>) -> Self {
        self.options.path = path;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Draw every tile as a square block of pixels, saving a PNG if an output file is set.
pub fn render_tile_grid(grid: &TileGrid, options: &RenderOptions) -> Result<RgbImage> {
    let side = u32::from(options.tile_side_pixels_length);
    let (width, height) = match (pixel_extent(grid.tile_columns().0, side),
                                 pixel_extent(grid.tile_rows().0, side)) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            bail!("a {} x {} tile grid at {} pixels per tile is too large for an image",
                  grid.tile_rows().0,
                  grid.tile_columns().0,
                  side)
        }
    };

    let path_display = options.path.map(|path| PathDisplay::new(grid, path));
    let mut image = RgbImage::from_pixel(width, height, WHITE);

    for (row, column, kind) in grid.iter() {
        let on_path = path_display.as_ref()
                                  .map_or(false, |display| display.is_on_path(row, column));
        let colour = match kind {
            _ if on_path => RED,
            TileKind::Floor | TileKind::Empty => continue,
            TileKind::VerticalWall | TileKind::HorizontalWall | TileKind::Pillar => WALL,
        };

        // Both fit, the whole image extent does.
        let (x1, y1) = (column.0 as u32 * side, row.0 as u32 * side);
        for y in y1..y1 + side {
            for x in x1..x1 + side {
                image.put_pixel(x, y, colour);
            }
        }
    }

    if let Some(file_path) = options.output_file {
        image.save(file_path)?;
        debug!("saved a {} x {} maze image to {}", width, height, file_path.display());
    }

    Ok(image)
}

fn pixel_extent(tiles: usize, side: u32) -> Option<u32> {
    if tiles > u32::MAX as usize {
        None
    } else {
        (tiles as u32).checked_mul(side)
    }
}
