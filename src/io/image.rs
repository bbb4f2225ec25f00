//! PNG rendering of boards with one coloured strip per edge label

use std::path::Path;

use crate::io::configuration::{CELL_PIXELS, EDGE_PIXELS, FLAT_EDGE};
use crate::io::error::{Result, TilingError};
use crate::spatial::edges::Edge;
use crate::spatial::grid::Grid;
use crate::spatial::piece::{Piece, Side};
use image::{ImageBuffer, Rgba};

const BACKGROUND: [u8; 4] = [236, 236, 236, 255];
const FLAT_COLOR: [u8; 4] = [70, 70, 70, 255];
const GRID_LINE: [u8; 4] = [255, 255, 255, 255];

// Labels beyond the palette reuse it at a darker shade
const PALETTE: [[u8; 3]; 12] = [
    [230, 25, 75],
    [60, 180, 75],
    [255, 225, 25],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [210, 245, 60],
    [250, 190, 212],
    [0, 128, 128],
    [170, 110, 40],
];

/// Colour used for an edge label
pub fn label_color(edge: Edge) -> Rgba<u8> {
    if edge == FLAT_EDGE {
        return Rgba(FLAT_COLOR);
    }
    let index = usize::from(edge - 1);
    let [r, g, b] = PALETTE.get(index % PALETTE.len()).copied().unwrap_or([0, 0, 0]);
    let shade = (index / PALETTE.len()).min(3) as u16;
    let darken = |channel: u8| (u16::from(channel) * (4 - shade) / 4) as u8;
    Rgba([darken(r), darken(g), darken(b), 255])
}

// Side whose strip covers the pixel, split along the cell diagonals
fn side_at(x: u32, y: u32) -> Option<Side> {
    let far = CELL_PIXELS - 1;
    let distances = [
        (Side::East, far - x),
        (Side::North, y),
        (Side::West, x),
        (Side::South, far - y),
    ];
    distances
        .into_iter()
        .min_by_key(|&(_, distance)| distance)
        .filter(|&(_, distance)| distance < EDGE_PIXELS)
        .map(|(side, _)| side)
}

fn cell_pixel(piece: Piece, x: u32, y: u32) -> Rgba<u8> {
    if x == 0 || y == 0 {
        return Rgba(GRID_LINE);
    }
    side_at(x, y).map_or(Rgba(BACKGROUND), |side| label_color(piece.edge(side)))
}

/// Render a board into an RGBA image buffer
pub fn render_grid(grid: &Grid) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let width = grid.cols() as u32 * CELL_PIXELS;
    let height = grid.rows() as u32 * CELL_PIXELS;

    ImageBuffer::from_fn(width, height, |x, y| {
        let (row, col) = ((y / CELL_PIXELS) as usize, (x / CELL_PIXELS) as usize);
        grid.at(row, col).map_or(Rgba(BACKGROUND), |piece| {
            cell_pixel(piece, x % CELL_PIXELS, y % CELL_PIXELS)
        })
    })
}

/// Export a board as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The board has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, output_path: &Path) -> Result<()> {
    if grid.rows() == 0 || grid.cols() == 0 {
        return Err(TilingError::EmptyBoard {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }

    let img = render_grid(grid);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| TilingError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
