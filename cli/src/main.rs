use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use luckysweep_core::{CellCount, Coord, Difficulty, GameConfig, GameMode, Preset};

use crate::session::{Session, Setup};

mod command;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Lucky,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Lucky => Difficulty::Lucky,
        }
    }
}

/// Play minesweeper in the terminal, or try your luck without hints.
#[derive(Parser, Debug)]
#[command(about, version)]
struct Args {
    /// Built-in grid preset
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Custom grid rows
    #[arg(long, requires_all = ["cols", "mines"], conflicts_with = "preset_file")]
    rows: Option<Coord>,

    /// Custom grid columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Play a custom grid without hints
    #[arg(long, requires = "rows")]
    no_hints: bool,

    /// JSON preset with `width`, `height`, `mines`, `label` and optional `no_hints`
    #[arg(long)]
    preset_file: Option<PathBuf>,

    /// Seed for reproducible grids
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Args {
    fn setup(&self) -> Result<Setup> {
        let (config, difficulty) = match (self.rows, self.cols, self.mines, &self.preset_file) {
            (Some(rows), Some(cols), Some(mines), _) => {
                let mode = if self.no_hints {
                    GameMode::Lucky
                } else {
                    GameMode::Standard
                };
                (GameConfig::new((rows, cols), mines, mode)?, None)
            }
            (_, _, _, Some(path)) => {
                let preset = load_preset(path)?;
                log::info!("Loaded preset {:?} from {}", preset.label, path.display());
                (preset.game_config()?, None)
            }
            _ => {
                let difficulty = Difficulty::from(self.difficulty);
                (difficulty.game_config(), Some(difficulty))
            }
        };

        Ok(Setup {
            config,
            difficulty,
            seed: self.seed,
        })
    }
}

fn load_preset(path: &Path) -> Result<Preset> {
    let file =
        File::open(path).with_context(|| format!("cannot open preset {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse preset {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let setup = args.setup()?;
    log::debug!("Game setup: {setup:?}");

    let mut session = Session::new(setup, io::stdin().lock(), io::stdout().lock());
    session.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        Args::try_parse_from(["luckysweep", "--difficulty", "lucky", "--seed", "4"]).unwrap();
        <Args as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn builtin_difficulty_is_ranked() {
        let args = Args::try_parse_from(["luckysweep", "-d", "hard"]).unwrap();

        let setup = args.setup().unwrap();

        assert_eq!(setup.difficulty, Some(Difficulty::Hard));
        assert_eq!(setup.config, Difficulty::Hard.game_config());
    }

    #[test]
    fn custom_grid_needs_all_dimensions() {
        assert!(Args::try_parse_from(["luckysweep", "--rows", "4"]).is_err());

        let args = Args::try_parse_from([
            "luckysweep",
            "--rows",
            "4",
            "--cols",
            "6",
            "--mines",
            "5",
            "--no-hints",
        ])
        .unwrap();
        let setup = args.setup().unwrap();

        assert_eq!(setup.difficulty, None);
        assert_eq!(setup.config.size, (4, 6));
        assert_eq!(setup.config.mode, GameMode::Lucky);
    }

    #[test]
    fn custom_grid_with_too_many_mines_is_refused() {
        let args = Args::try_parse_from([
            "luckysweep",
            "--rows",
            "2",
            "--cols",
            "2",
            "--mines",
            "9",
        ])
        .unwrap();

        assert!(args.setup().is_err());
    }
}
