use crate::{Rgba, Surface};
use life_universe::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellColors {
    pub dead: Rgba,
    pub alive: Rgba,
}

/// Pixel extent of a `width` x `height` grid: one gridline before every cell
/// plus a closing line.
pub fn surface_size(width: u32, height: u32, cell_size: u32) -> (u32, u32) {
    ((cell_size + 1) * width + 1, (cell_size + 1) * height + 1)
}

/// Strokes `width + 1` vertical and `height + 1` horizontal lines as a single path.
pub fn draw_grid<S>(surface: &mut S, width: u32, height: u32, cell_size: u32, color: Rgba)
where
    S: Surface + ?Sized,
{
    if width == 0 || height == 0 {
        return;
    }
    let pitch = cell_size + 1;
    let (right, bottom) = surface_size(width, height, cell_size);

    surface.begin_path();
    for i in 0..=width {
        surface.move_to(i * pitch, 0);
        surface.line_to(i * pitch, bottom - 1);
    }
    for j in 0..=height {
        surface.move_to(0, j * pitch);
        surface.line_to(right - 1, j * pitch);
    }
    surface.stroke(color);
}

/// Fills every cell square from a row-major cell view.
pub fn draw_cells<S>(
    surface: &mut S,
    cells: &[Cell],
    width: u32,
    height: u32,
    cell_size: u32,
    colors: CellColors,
) where
    S: Surface + ?Sized,
{
    let num_cells = width as usize * height as usize;
    debug_assert!(cells.len() >= num_cells);
    if num_cells == 0 {
        return;
    }
    let pitch = cell_size + 1;

    for (index, &cell) in cells.iter().take(num_cells).enumerate() {
        let row = (index / width as usize) as u32;
        let col = (index % width as usize) as u32;
        let color = if cell == Cell::Dead {
            colors.dead
        } else {
            colors.alive
        };
        surface.fill_rect(col * pitch + 1, row * pitch + 1, cell_size, cell_size, color);
    }
}
