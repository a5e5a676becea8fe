use docopt::Docopt;
use itertools::Itertools;
use log::debug;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};
use tilemazes::{
    grid_displays::{render_text, PathDisplay, PlainDisplay},
    pathing,
    placements,
    renderers,
    units::{ColumnsCount, RowsCount, TileSize},
    MapGenerator,
    MazeStrategy,
    TileGrid,
};

const USAGE: &str = "Tile Mazes

Usage:
    tilemazes_driver -h | --help
    tilemazes_driver [kruskal | prim] [--rows=<x>] [--columns=<y>] [--seed=<n>] [--text-out=<path>] [--show-path] [--image-out=<path>] [--tile-pixels=<n>] [--placements-out=<path>] [--tile-size=<s>] [--save-edges=<path>]

Options:
    -h --help                Show this screen.
    --rows=<x>               Number of cell rows in the maze [default: 5].
    --columns=<y>            Number of cell columns in the maze [default: 5].
    --seed=<n>               Seed for the random stream. A fresh maze every run if not given.
    --text-out=<path>        Output file path for a textual rendering of the tile map.
    --show-path              Mark the longest path through the maze in text and image renderings.
    --image-out=<path>       Output file path for an image rendering of the tile map. Always PNG format.
    --tile-pixels=<n>        Pixel count for the side of one tile in an image [default: 8] max 255.
    --placements-out=<path>  Write one placement per line: kind row column x y yaw.
    --tile-size=<s>          World units spanned by one cell when placing tiles [default: 400].
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_kruskal: bool,
    cmd_prim: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_show_path: bool,
    flag_image_out: String,
    flag_tile_pixels: u8,
    flag_placements_out: String,
    flag_tile_size: f32,
    flag_save_edges: String,
}

// Errors of the driver, chaining the library errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::tilemazes::errors::Error, ::tilemazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    debug!("{:?}", args);

    let generator = MapGenerator::new(maze_strategy(&args));
    let (rows, columns) = (RowsCount(args.flag_rows), ColumnsCount(args.flag_columns));
    let maze_grid = if let Some(seed) = args.flag_seed {
        generator.generate_seeded(rows, columns, seed)?
    } else {
        generator.generate_unseeded(rows, columns)?
    };

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if !args.flag_placements_out.is_empty() {
        save_placements(&maze_grid, TileSize(args.flag_tile_size), &args.flag_placements_out)?;
    }

    let longest_path = if args.flag_show_path {
        pathing::longest_path(&maze_grid)
    } else {
        None
    };

    let do_image_render = !args.flag_image_out.is_empty();
    let do_text_render = !args.flag_text_out.is_empty() || !do_image_render;

    if do_text_render {
        let text = match longest_path {
            Some(ref path) => render_text(&maze_grid, &PathDisplay::new(&maze_grid, path)),
            None => render_text(&maze_grid, &PlainDisplay),
        };

        if args.flag_text_out.is_empty() {
            print!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let render_options = renderers::RenderOptionsBuilder::new()
            .tile_side_pixels_length(args.flag_tile_pixels)
            .output_file(Some(Path::new(&args.flag_image_out)))
            .path(longest_path.as_ref().map(|path| path.as_slice()))
            .build();
        renderers::render_tile_grid(&maze_grid, &render_options)
            .chain_err(|| format!("Failed to render maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

fn maze_strategy(maze_args: &MazeArgs) -> MazeStrategy {
    if maze_args.cmd_kruskal {
        MazeStrategy::Kruskal
    } else if maze_args.cmd_prim {
        MazeStrategy::Prim
    } else {
        MazeStrategy::default()
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_placements(maze_grid: &TileGrid, tile_size: TileSize, file_path: &str) -> Result<()> {
    let lines = placements::placements(maze_grid, tile_size)
        .iter()
        .map(|p| format!("{:?} {} {} {} {} {}", p.kind, p.row.0, p.column.0, p.x, p.y, p.yaw))
        .join("\n");

    write_text_to_file(&(lines + "\n"), file_path)
        .chain_err(|| format!("Failed to write tile placements to text file {}", file_path))?;

    Ok(())
}

fn save_maze_graph(maze_grid: &TileGrid, file_path: &str) -> Result<()> {
    let cells = maze_grid.cells();
    let passages = maze_grid.passages();

    let mut graph_data = format!("{} {}\n", cells.size(), passages.len());
    for (src, dst) in passages {
        if let (Some(index_a), Some(index_b)) = (cells.coordinate_to_index(src),
                                                 cells.coordinate_to_index(dst)) {
            graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
        }
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
