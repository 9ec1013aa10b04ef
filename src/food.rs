use crate::Coords;
use crate::matrix::{self, GRID_SIZE, LedMatrix, PixelFault, Rgb};
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

pub const GREEN: Rgb = (0, 255, 0);
pub const RED: Rgb = (255, 0, 0);
pub const BLUE: Rgb = (0, 0, 255);
pub const YELLOW: Rgb = (255, 255, 0);
pub const PURPLE: Rgb = (255, 0, 255);
pub const CYAN: Rgb = (0, 255, 255);

/// Food colours. Black is the background and white is the snake.
pub const PALETTE: [Rgb; 6] = [GREEN, RED, BLUE, YELLOW, PURPLE, CYAN];

const GRID_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodError {
    /// Every cell is taken by the snake.
    NoRoom,
    Pixel(PixelFault),
}

impl fmt::Display for FoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodError::NoRoom => write!(f, "no free cell left for food"),
            FoodError::Pixel(fault) => write!(f, "could not draw food: {}", fault),
        }
    }
}

impl std::error::Error for FoodError {}

impl From<PixelFault> for FoodError {
    fn from(fault: PixelFault) -> Self {
        FoodError::Pixel(fault)
    }
}

pub struct Food {
    pos: Coords,
    color: Rgb,
    eaten: bool,
}

impl Food {
    pub fn new() -> Self {
        // Starts eaten so the first update places it.
        Food { pos: (0, 0), color: PALETTE[0], eaten: true }
    }

    #[cfg(test)]
    pub fn placed_at(pos: Coords, color: Rgb) -> Self {
        Food { pos, color, eaten: false }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    #[cfg(test)]
    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    pub fn set_eaten(&mut self, eaten: bool) {
        self.eaten = eaten;
    }

    /// Moves the food somewhere off the snake if it was eaten, then draws it.
    pub fn update<R: Rng, M: LedMatrix>(&mut self, body: &[Coords], rng: &mut R, matrix: &mut M) -> Result<(), FoodError> {
        if self.eaten {
            self.pos = free_cell(body, rng).ok_or(FoodError::NoRoom)?;
            self.color = PALETTE[rng.gen_range(0..PALETTE.len())];
            debug!(pos = ?self.pos, color = ?self.color, "food placed");
        }

        matrix.set_pixel(self.pos, self.color)?;
        self.eaten = false;
        Ok(())
    }
}

impl Default for Food {
    fn default() -> Self {
        Food::new()
    }
}

/// Picks a uniformly random cell not covered by `body`.
///
/// Guessing is fast while the grid is mostly empty; once the snake covers
/// more than 80% of it the free cells are listed and one is chosen directly.
fn free_cell<R: Rng>(body: &[Coords], rng: &mut R) -> Option<Coords> {
    if body.len() * 5 > GRID_CELLS * 4 {
        let choices: Vec<Coords> = matrix::all_cells().filter(|pos| !body.contains(pos)).collect();
        return choices.choose(rng).copied();
    }

    loop {
        let pos = (rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        if !body.contains(&pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::testing::RecordingMatrix;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_but(free: &[Coords]) -> Vec<Coords> {
        matrix::all_cells().filter(|pos| !free.contains(pos)).collect()
    }

    #[test]
    fn never_lands_on_the_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut matrix = RecordingMatrix::new();
        let body = vec![(2, 1), (2, 2), (3, 2), (4, 2), (4, 3)];

        for _ in 0..500 {
            let mut food = Food::new();
            food.update(&body, &mut rng, &mut matrix).unwrap();
            assert!(!body.contains(&food.pos()));
            assert!(matrix::in_grid(food.pos()));
            assert!(PALETTE.contains(&food.color()));
        }
    }

    #[test]
    fn crowded_grid_uses_the_free_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut matrix = RecordingMatrix::new();
        let free = [(0, 0), (5, 6), (7, 7)];
        let body = all_but(&free);

        for _ in 0..50 {
            let mut food = Food::new();
            food.update(&body, &mut rng, &mut matrix).unwrap();
            assert!(free.contains(&food.pos()));
        }
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut matrix = RecordingMatrix::new();
        let body = all_but(&[(6, 1)]);

        let mut food = Food::new();
        food.update(&body, &mut rng, &mut matrix).unwrap();
        assert_eq!(food.pos(), (6, 1));
    }

    #[test]
    fn full_grid_has_no_room() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut matrix = RecordingMatrix::new();
        let body = all_but(&[]);

        let mut food = Food::new();
        assert_eq!(food.update(&body, &mut rng, &mut matrix), Err(FoodError::NoRoom));
        assert!(food.is_eaten());
    }

    #[test]
    fn stays_put_until_eaten() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut matrix = RecordingMatrix::new();
        let body = vec![(2, 1), (2, 2)];

        let mut food = Food::new();
        food.update(&body, &mut rng, &mut matrix).unwrap();
        assert!(!food.is_eaten());
        let (pos, color) = (food.pos(), food.color());

        matrix.clear();
        food.update(&body, &mut rng, &mut matrix).unwrap();
        assert_eq!((food.pos(), food.color()), (pos, color));
        assert_eq!(matrix.frame.get(pos), Some(color));
    }

    #[test]
    fn palette_has_no_black_or_white() {
        assert!(!PALETTE.contains(&matrix::BLACK));
        assert!(!PALETTE.contains(&matrix::WHITE));
    }
}
