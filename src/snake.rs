use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        let side = i32::from(bounds.side());
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns the neighbouring position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its committed and pending directions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.step(behind);
            body.push_back(cell);
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Stores `requested` as the direction for the next tick.
    ///
    /// Reversals are judged against the committed direction, so a burst of
    /// inputs within one tick can never sneak a 180° turn through. The last
    /// accepted request wins. Returns whether the request was applied.
    pub fn set_pending_direction(&mut self, requested: Direction) -> bool {
        if !direction_change_is_valid(self.direction, requested) {
            return false;
        }
        self.pending_direction = requested;
        true
    }

    /// Commits the pending direction and pushes the new head.
    ///
    /// The tail stays in place until [`Snake::drop_tail`] is called.
    pub fn advance(&mut self) -> Position {
        self.direction = self.pending_direction;
        let next_head = self.head().step(self.direction);
        self.body.push_front(next_head);
        next_head
    }

    /// Removes the last segment.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns whether the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn bounds_check_covers_every_edge() {
        let grid = GridSize::new(15);

        assert!(Position::new(0, 0).is_within_bounds(grid));
        assert!(Position::new(14, 14).is_within_bounds(grid));
        assert!(!Position::new(-1, 3).is_within_bounds(grid));
        assert!(!Position::new(3, -1).is_within_bounds(grid));
        assert!(!Position::new(15, 3).is_within_bounds(grid));
        assert!(!Position::new(3, 15).is_within_bounds(grid));
    }

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Position::new(7, 7), Direction::Right, 3);

        let cells: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(7, 7),
                Position::new(6, 7),
                Position::new(5, 7)
            ]
        );
        assert_eq!(snake.tail(), Position::new(5, 7));
        assert!(!snake.is_empty());
    }

    #[test]
    fn advance_then_drop_tail_moves_one_cell() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let head = snake.advance();
        snake.drop_tail();

        assert_eq!(head, Position::new(6, 5));
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_without_drop_grows() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn pending_direction_rejects_reverse() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 3);

        assert!(!snake.set_pending_direction(Direction::Down));
        snake.advance();

        assert_eq!(snake.head(), Position::new(5, 4));
    }

    #[test]
    fn reversal_is_checked_against_committed_direction() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Up is accepted, but Left is still the reverse of the committed Right.
        assert!(snake.set_pending_direction(Direction::Up));
        assert!(!snake.set_pending_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), Direction::Up);

        snake.advance();
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Position::new(5, 4));
    }

    #[test]
    fn last_accepted_request_wins() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.advance();

        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn head_overlap_detection() {
        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
            Direction::Up,
        );

        assert!(snake.head_overlaps_body());
    }
}
