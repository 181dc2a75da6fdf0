use crate::{Cell, GridCell, Loc, Neighborhood, Random, Universe, WorldGrid};
use std::fmt;

#[derive(Clone, Debug)]
pub struct ConwayUniverse {
    grid: WorldGrid<Cell>,
}

impl ConwayUniverse {
    /// Deterministic starting pattern: cell `i` (row-major) is alive when
    /// `i % 2 == 0 || i % 7 == 0`.
    pub fn new(width: u32, height: u32) -> Self {
        let mut result = Self::empty(width, height);
        for (i, cell) in result.grid.cells.cells_iter_mut().enumerate() {
            *cell = Cell::from(i % 2 == 0 || i % 7 == 0);
        }
        result
    }

    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            grid: WorldGrid::new(width, height),
        }
    }

    pub fn random(width: u32, height: u32, rand: &mut Random, p_alive: f64) -> Self {
        let mut result = Self::empty(width, height);
        for cell in result.grid.cells.cells_iter_mut() {
            *cell = Cell::from(rand.next_bool(p_alive));
        }
        result
    }

    /// Marks the given `(row, col)` cells alive. Out-of-range entries are ignored.
    pub fn set_cells(&mut self, alive: &[(u32, u32)]) {
        for &(row, col) in alive {
            if let Some(cell) = self.grid.cells.cell_mut(Loc::new(row, col)) {
                *cell = Cell::Alive;
            }
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Universe for ConwayUniverse {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn cells(&self) -> &[Cell] {
        self.grid.as_slice()
    }

    fn tick(&mut self) {
        self.grid.update();
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.grid.cells[Loc::new(row, col)].toggle();
    }
}

impl fmt::Display for ConwayUniverse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.cells().chunks(self.width() as usize) {
            for &cell in line {
                let symbol = if cell == Cell::Dead { '◻' } else { '◼' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GridCell for Cell {
    fn update(&self, neighborhood: &Neighborhood<Cell>, next_cell: &mut Cell) {
        let mut neighbors = 0;
        neighborhood.for_neighbor_cells(|neighbor| {
            if neighbor.is_alive() {
                neighbors += 1;
            }
        });
        *next_cell = match (*self, neighbors) {
            (Cell::Alive, 2..=3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        };
    }
}
