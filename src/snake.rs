use crate::grid::Grid;
use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// Body is stored head first. It is never empty, and after `grow` the last
/// cell is repeated until the next `move_step` shifts it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake of `size` cells (at least one) whose head is at `head`,
    /// with the rest of the body trailing behind it.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..size.max(1) as i32)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, direction }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Shifts the whole body one cell towards the heading. Length is unchanged.
    pub fn move_step(&mut self) {
        let (dx, dy) = self.direction.delta();
        let old_head = self.head();

        self.body.insert(0, (old_head.0 + dx, old_head.1 + dy));
        self.body.pop();
    }

    /// Lengthens the snake by one cell right away by repeating the tail cell.
    /// The following `move_step` drops only the copy, so the extra length is kept.
    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }

    pub fn collides_with_wall(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }

    pub fn collides_with_itself(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    /// Returns whether the new heading was taken. Reversals on the same axis are refused.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if self.direction.is_opposite(new_direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }
}
