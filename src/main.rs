mod clock;
mod config;
mod food;
mod game;
mod logging;
mod matrix;
mod snake;
mod term;

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::game::{Flow, Game};
use crate::matrix::TermMatrix;
use crate::term::TermManager;

/// A grid cell. Signed so a head that steps off the grid stays representable.
pub type Coords = (i16, i16);

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref(), config.verbose)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TermManager::new()?;
    term.setup()?;
    let res = run(&config, &mut term, rng);
    // Give the terminal back even if the game loop failed
    let restored = term.restore();
    first_error(res, restored)
}

/// The game's own error wins over one from restoring the terminal.
fn first_error(res: anyhow::Result<()>, restored: anyhow::Result<()>) -> anyhow::Result<()> {
    res.and(restored)
}

fn run(config: &Config, term: &mut TermManager, rng: StdRng) -> anyhow::Result<()> {
    let mut matrix = TermMatrix::new(term.matrix_origin());
    let mut clock = Clock::new(config.speed);
    let mut game = Game::new(rng);

    info!(speed = config.speed, seed = ?config.seed, "starting");

    loop {
        if game.process_events(term.poll_events()?) == Flow::Quit {
            break;
        }

        game.run_logic(&mut matrix)?;
        game.display_frame(term, &mut matrix)?;
        clock.tick();
    }

    info!("quit");
    Ok(())
}
