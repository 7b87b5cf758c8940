use rand::Rng;

use crate::config::{GridSize, MAX_RANDOM_FOOD_ATTEMPTS};
use crate::snake::{Position, Snake};

/// Picks a food cell that the snake does not occupy.
///
/// Uniform random sampling is tried a bounded number of times; after that the
/// grid is scanned row by row for the first free cell. Returns `None` only
/// when the snake covers the whole grid.
#[must_use]
pub fn generate_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    let side = i32::from(bounds.side());
    for _ in 0..MAX_RANDOM_FOOD_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..side),
            y: rng.gen_range(0..side),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    first_free_cell(bounds, snake)
}

/// Deterministic row-major scan for an unoccupied cell.
#[must_use]
pub fn first_free_cell(bounds: GridSize, snake: &Snake) -> Option<Position> {
    let side = i32::from(bounds.side());
    (0..side)
        .flat_map(|y| (0..side).map(move |x| Position { x, y }))
        .find(|position| !snake.occupies(*position))
}
