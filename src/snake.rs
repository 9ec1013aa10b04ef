use crate::Coords;
use crate::matrix::{LedMatrix, Rgb, WHITE};

use tracing::warn;

/// Travel direction as a (dx, dy) grid step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Vector(pub i16, pub i16);

impl Vector {
    pub const POS_X: Vector = Vector(1, 0);
    pub const NEG_X: Vector = Vector(-1, 0);
    pub const POS_Y: Vector = Vector(0, 1);
    pub const NEG_Y: Vector = Vector(0, -1);

    pub fn is_opposite(&self, other: Vector) -> bool {
        self.0 == -other.0 && self.1 == -other.1
    }
}

/// What happens to the cell the tail just left, for this tick only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TailEffect {
    Clear(Coords),
    /// The snake grew: the cell flashes in the food's colour before the
    /// body is drawn over it.
    Glisten(Coords, Rgb),
}

pub struct Snake {
    body: Vec<Coords>,
    vector: Vector,
    just_ate: bool,
    forced_game_over: bool,
}

impl Snake {
    pub const START_BODY: [Coords; 2] = [(2, 1), (2, 2)];

    pub fn new() -> Self {
        Self::with_body(Self::START_BODY.to_vec(), Vector::POS_X)
    }

    pub fn with_body(body: Vec<Coords>, vector: Vector) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, vector, just_ate: false, forced_game_over: false }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn vector(&self) -> Vector {
        self.vector
    }

    pub fn just_ate(&self) -> bool {
        self.just_ate
    }

    /// Moves one cell along the current vector, growing if the new head
    /// lands on `food`.
    pub fn update(&mut self, food: Coords, food_color: Rgb) -> TailEffect {
        let old_head = self.head();
        // The head is read before the pop so a single segment snake still
        // has somewhere to move from.
        let old_tail = self.body.pop().unwrap_or(old_head);
        self.just_ate = false;

        let new_head = (old_head.0 + self.vector.0, old_head.1 + self.vector.1);
        self.body.insert(0, new_head);

        if new_head == food {
            self.body.push(old_tail);
            self.just_ate = true;
            TailEffect::Glisten(old_tail, food_color)
        } else {
            TailEffect::Clear(old_tail)
        }
    }

    /// Paints the body white. A segment off the grid ends the game instead
    /// of being drawn; the rest of the body is still painted.
    pub fn draw<M: LedMatrix>(&mut self, matrix: &mut M) {
        for &segment in &self.body {
            if let Err(fault) = matrix.set_pixel(segment, WHITE) {
                warn!(%fault, "snake left the grid");
                self.forced_game_over = true;
            }
        }
    }

    pub fn set_direction(&mut self, vector: Vector) {
        self.vector = vector;
    }

    pub fn is_game_over(&self) -> bool {
        self.forced_game_over || self.body[1..].contains(&self.head())
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new()
    }
}
