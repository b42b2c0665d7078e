use crate::{Cell, TermInt};

/// The playable board, `width` x `height` cells with the origin in the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let (x, y) = cell;
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Every cell of the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let grid = Grid::new(20, 20);

        assert!(grid.contains((0, 0)));
        assert!(grid.contains((19, 19)));
        assert!(grid.contains((19, 0)));
        assert!(!grid.contains((20, 0)));
        assert!(!grid.contains((0, 20)));
        assert!(!grid.contains((-1, 5)));
        assert!(!grid.contains((5, -1)));
    }

    #[test]
    fn test_non_square_grid() {
        let grid = Grid::new(4, 2);

        assert!(grid.contains((3, 1)));
        assert!(!grid.contains((1, 3)));
        assert_eq!(grid.cells().count(), 8);
        assert!(grid.cells().all(|c| grid.contains(c)));
    }
}
