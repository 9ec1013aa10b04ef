use crate::Coords;
use std::{fmt, io::{Stdout, Write, stdout}};

use crossterm::{cursor, queue, style::{self, Color}};

pub const GRID_SIZE: i16 = 8;

pub type Rgb = (u8, u8, u8);

pub const BLACK: Rgb = (0, 0, 0);
pub const WHITE: Rgb = (255, 255, 255);

/// A pixel write outside of the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFault {
    pub pos: Coords,
}

impl fmt::Display for PixelFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pixel ({}, {}) is outside the {}x{} grid", self.pos.0, self.pos.1, GRID_SIZE, GRID_SIZE)
    }
}

impl std::error::Error for PixelFault {}

/// The three calls the game makes on an LED matrix driver.
///
/// Writes go to a buffer; nothing is visible until `show`.
pub trait LedMatrix {
    fn set_pixel(&mut self, pos: Coords, color: Rgb) -> Result<(), PixelFault>;
    fn show(&mut self) -> anyhow::Result<()>;
    fn clear(&mut self);
}

pub fn in_grid(pos: Coords) -> bool {
    (0..GRID_SIZE).contains(&pos.0) && (0..GRID_SIZE).contains(&pos.1)
}

/// Every cell of the grid, row by row.
pub fn all_cells() -> impl Iterator<Item = Coords> {
    (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| (x, y)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: [[Rgb; GRID_SIZE as usize]; GRID_SIZE as usize],
}

impl Frame {
    pub fn new() -> Self {
        Frame { pixels: [[BLACK; GRID_SIZE as usize]; GRID_SIZE as usize] }
    }

    pub fn set(&mut self, pos: Coords, color: Rgb) -> Result<(), PixelFault> {
        if !in_grid(pos) {
            return Err(PixelFault { pos });
        }

        self.pixels[pos.1 as usize][pos.0 as usize] = color;
        Ok(())
    }

    pub fn get(&self, pos: Coords) -> Option<Rgb> {
        if in_grid(pos) {
            Some(self.pixels[pos.1 as usize][pos.0 as usize])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[BLACK; GRID_SIZE as usize]; GRID_SIZE as usize];
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

/// An 8x8 matrix simulated with coloured cells in the terminal.
///
/// The physical matrix is mounted rotated by 180 degrees, so grid (0, 0)
/// lands in the bottom right corner of the simulated panel.
pub struct TermMatrix {
    stdout: Stdout,
    origin: (u16, u16),
    frame: Frame,
}

// Terminal cells are roughly twice as tall as wide
const CELL_WIDTH: u16 = 2;

impl TermMatrix {
    pub fn new(origin: (u16, u16)) -> Self {
        TermMatrix { stdout: stdout(), origin, frame: Frame::new() }
    }

    /// Width and height of the simulated panel, in terminal cells.
    pub fn footprint() -> (u16, u16) {
        (GRID_SIZE as u16 * CELL_WIDTH, GRID_SIZE as u16)
    }

    fn screen_pos(&self, pos: Coords) -> (u16, u16) {
        let col = (GRID_SIZE - 1 - pos.0) as u16;
        let row = (GRID_SIZE - 1 - pos.1) as u16;
        (self.origin.0 + col * CELL_WIDTH, self.origin.1 + row)
    }
}

impl LedMatrix for TermMatrix {
    fn set_pixel(&mut self, pos: Coords, color: Rgb) -> Result<(), PixelFault> {
        self.frame.set(pos, color)
    }

    fn show(&mut self) -> anyhow::Result<()> {
        for pos in all_cells() {
            let (r, g, b) = self.frame.get(pos).unwrap_or(BLACK);
            let (x, y) = self.screen_pos(pos);
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                style::SetBackgroundColor(Color::Rgb { r, g, b }),
                style::Print("  ")
            )?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn clear(&mut self) {
        self.frame.clear();
    }
}
