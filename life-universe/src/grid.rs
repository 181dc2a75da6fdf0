use std::fmt::Debug;
use std::mem;
use std::ops::{Index, IndexMut};

pub trait GridCell
where
    Self: Copy + Default + Debug,
{
    fn update(&self, neighborhood: &Neighborhood<Self>, next_cell: &mut Self);
}

/// Double-buffered toroidal grid. `update` computes every next cell from the
/// current generation, then swaps the buffers.
#[derive(Clone, Debug)]
pub struct WorldGrid<C>
where
    C: GridCell,
{
    pub cells: WorldGridCells<C>,
    next_cells: WorldGridCells<C>,
}

impl<C> WorldGrid<C>
where
    C: GridCell,
{
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            cells: WorldGridCells::new(width, height),
            next_cells: WorldGridCells::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.cells.width()
    }

    pub fn height(&self) -> u32 {
        self.cells.height()
    }

    pub fn as_slice(&self) -> &[C] {
        self.cells.as_slice()
    }

    pub fn update(&mut self) {
        self.next_cells.copy_from(&self.cells);
        for row in 0..self.height() {
            for col in 0..self.width() {
                self.update_cell(Loc::new(row, col));
            }
        }
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn update_cell(&mut self, loc: Loc) {
        let cell = &self.cells[loc];
        let neighborhood = Neighborhood::new(&self.cells, loc);
        let next_cell = &mut self.next_cells[loc];
        cell.update(&neighborhood, next_cell);
    }
}

#[derive(Clone, Debug)]
pub struct WorldGridCells<C>
where
    C: GridCell,
{
    cells: Vec<C>,
    width: u32,
    height: u32,
}

impl<C> WorldGridCells<C>
where
    C: GridCell,
{
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![C::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_slice(&self) -> &[C] {
        &self.cells
    }

    pub fn cells_iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut C> {
        self.cells.iter_mut()
    }

    pub fn cell(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &mut self.cells[index])
    }

    fn copy_from(&mut self, source: &Self) {
        self.cells.copy_from_slice(&source.cells);
    }
}

impl<C> Index<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

/// The eight cells around `center`, wrapping at the grid edges.
pub struct Neighborhood<'a, C>
where
    C: GridCell,
{
    cells: &'a WorldGridCells<C>,
    rows: [u32; 3],
    cols: [u32; 3],
}

impl<'a, C> Neighborhood<'a, C>
where
    C: GridCell,
{
    pub fn new(cells: &'a WorldGridCells<C>, center: Loc) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, cells.height());
        let (col_left, col_right) = Self::adjacent_indexes(center.col, cells.width());
        Self {
            cells,
            rows: [row_above, center.row, row_below],
            cols: [col_left, center.col, col_right],
        }
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        for row in 0..3 {
            for col in 0..3 {
                if row == 1 && col == 1 {
                    continue;
                }
                let loc = Loc::new(self.rows[row], self.cols[col]);
                f(&self.cells[loc]);
            }
        }
    }

    fn adjacent_indexes(cell_index: u32, max: u32) -> (u32, u32) {
        (
            Self::modulo(cell_index as i64 - 1, max),
            Self::modulo(cell_index as i64 + 1, max),
        )
    }

    fn modulo(val: i64, max: u32) -> u32 {
        val.rem_euclid(max as i64) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}
