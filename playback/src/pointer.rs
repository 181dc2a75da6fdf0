/// Where the surface is shown on screen, in the pointer's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

/// Maps a pointer position to the grid cell under it.
///
/// The position is first rescaled from `rect` to the surface's own pixel
/// size (the two differ when the surface is stretched for display), then
/// divided by the cell pitch. Points outside the surface clamp to the nearest
/// edge cell. Returns `None` only when `grid` is empty or `rect` has no area.
pub fn pointer_to_cell(
    pointer: (f64, f64),
    rect: SurfaceRect,
    surface_px: (u32, u32),
    cell_size: u32,
    grid: (u32, u32),
) -> Option<CellPos> {
    let (grid_width, grid_height) = grid;
    if grid_width == 0 || grid_height == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }

    let scale_x = surface_px.0 as f64 / rect.width;
    let scale_y = surface_px.1 as f64 / rect.height;
    let x = (pointer.0 - rect.left) * scale_x;
    let y = (pointer.1 - rect.top) * scale_y;

    let pitch = (cell_size + 1) as f64;
    let col = (x / pitch).floor().clamp(0.0, (grid_width - 1) as f64);
    let row = (y / pitch).floor().clamp(0.0, (grid_height - 1) as f64);
    Some(CellPos {
        row: row as u32,
        col: col as u32,
    })
}
