use crate::food::{Food, FoodError};
use crate::matrix::{BLACK, LedMatrix, WHITE};
use crate::snake::{Snake, TailEffect, Vector};
use crate::term::{InputEvent, Key, Line, Surface};

use rand::Rng;
use tracing::{debug, info, warn};

const TITLE: &str = "Unicorn Snake.";
const PRESS_ANY_KEY: &str = "Press any key to play.";
const INSTRUCTIONS: &str = "Use the arrow keys to control your snake on the unicorn hat";
const GAME_ON: &str = "Game on";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ending {
    Crashed,
    /// The snake covers the whole grid.
    Filled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Start,
    Playing,
    GameOver(Ending),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<R: Rng> {
    snake: Snake,
    food: Food,
    state: State,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(rng: R) -> Self {
        Game { snake: Snake::new(), food: Food::new(), state: State::Start, rng }
    }

    #[cfg(test)]
    pub fn state(&self) -> State {
        self.state
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[cfg(test)]
    pub fn is_game_over(&self) -> bool {
        matches!(self.state, State::GameOver(_))
    }

    /// Handles this tick's input. Returns `Flow::Quit` as soon as a quit
    /// event is seen; later events are dropped.
    pub fn process_events<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) -> Flow {
        for event in events {
            let key = match event {
                InputEvent::Quit => return Flow::Quit,
                InputEvent::Key(key) => key,
            };

            if self.state != State::Playing {
                self.restart();
            }

            // The restarting key press also steers.
            self.steer(key);
        }

        Flow::Continue
    }

    /// Advances the game by one tick, writing the changed pixels to `matrix`.
    pub fn run_logic<M: LedMatrix>(&mut self, matrix: &mut M) -> anyhow::Result<()> {
        if self.state == State::Playing && self.snake.is_game_over() {
            info!(length = self.snake.body().len(), "game over");
            self.state = State::GameOver(Ending::Crashed);
        }

        if self.state != State::Playing {
            return Ok(());
        }

        match self.food.update(self.snake.body(), &mut self.rng, matrix) {
            Ok(()) => {},
            Err(FoodError::NoRoom) => {
                info!(length = self.snake.body().len(), "snake filled the grid");
                self.state = State::GameOver(Ending::Filled);
                return Ok(());
            },
            Err(FoodError::Pixel(fault)) => return Err(fault.into()),
        }

        match self.snake.update(self.food.pos(), self.food.color()) {
            TailEffect::Clear(pos) => {
                if let Err(fault) = matrix.set_pixel(pos, BLACK) {
                    warn!(%fault, "could not clear tail");
                }
            },
            TailEffect::Glisten(pos, color) => {
                debug!(length = self.snake.body().len(), "snake ate");
                if let Err(fault) = matrix.set_pixel(pos, color) {
                    warn!(%fault, "could not flash tail");
                }
                matrix.show()?;
            },
        }

        self.snake.draw(matrix);
        self.food.set_eaten(self.snake.just_ate());
        Ok(())
    }

    pub fn display_frame<S: Surface, M: LedMatrix>(&self, surface: &mut S, matrix: &mut M) -> anyhow::Result<()> {
        match self.state {
            State::Playing => {
                surface.fill(BLACK)?;
                surface.draw_text(TITLE, Line::Top, WHITE)?;
                surface.draw_text(GAME_ON, Line::Center, WHITE)?;
                matrix.show()?;
            },
            State::Start | State::GameOver(_) => {
                surface.fill(WHITE)?;
                surface.draw_text(TITLE, Line::Top, BLACK)?;
                surface.draw_text(&self.prompt(), Line::Center, BLACK)?;
                surface.draw_text(INSTRUCTIONS, Line::Bottom, BLACK)?;
                matrix.clear();
            },
        }

        surface.flip()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn prompt(&self) -> String {
        let length = self.snake.body().len();
        match self.state {
            State::GameOver(Ending::Crashed) => format!("Game over, length {}. {}", length, PRESS_ANY_KEY),
            State::GameOver(Ending::Filled) => format!("You won, length {}! {}", length, PRESS_ANY_KEY),
            _ => PRESS_ANY_KEY.to_string(),
        }
    }

    fn restart(&mut self) {
        info!(previous = ?self.state, "new game");
        self.snake = Snake::new();
        self.food = Food::new();
        self.state = State::Playing;
    }

    // The matrix is mounted turned around, so the left arrow travels +x
    // and the up arrow +y.
    fn steer(&mut self, key: Key) {
        let wanted = match key {
            Key::Left => Vector::POS_X,
            Key::Right => Vector::NEG_X,
            Key::Up => Vector::POS_Y,
            Key::Down => Vector::NEG_Y,
            Key::Other => return,
        };

        if !wanted.is_opposite(self.snake.vector()) {
            debug!(?wanted, "direction change");
            self.snake.set_direction(wanted);
        }
    }
}
