use std::path::PathBuf;

use clap::Parser;

/// Snake on an 8x8 LED matrix, simulated in the terminal.
#[derive(Debug, Parser)]
#[command(name = "unicorn-snake", version)]
pub struct Config {
    /// Snake moves per second
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub speed: u32,

    /// Seed for food placement, for a repeatable game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a trace of the game to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Include debug events in the log file
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(&["unicorn-snake"]).unwrap();
        assert_eq!(config.speed, 5);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
        assert!(!config.verbose);
    }

    #[test]
    fn all_flags() {
        let config = Config::try_parse_from(&[
            "unicorn-snake", "--speed", "8", "--seed", "42", "--log-file", "snake.log", "-v",
        ]).unwrap();
        assert_eq!(config.speed, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_file, Some(PathBuf::from("snake.log")));
        assert!(config.verbose);
    }

    #[test]
    fn speed_must_be_positive() {
        assert!(Config::try_parse_from(&["unicorn-snake", "--speed", "0"]).is_err());
        assert!(Config::try_parse_from(&["unicorn-snake", "--speed", "61"]).is_err());
    }
}
