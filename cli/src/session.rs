use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use luckysweep_core::*;
use web_time::Instant;

use crate::command::{Command, HELP};

/// What a new game is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Setup {
    pub config: GameConfig,
    /// Ledger bucket, `None` for custom grids which are not ranked.
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// State held by the caller between engine calls.
pub struct Game {
    grid: Grid,
    mode: GameMode,
    started: Instant,
    status: GameStatus,
}

impl Game {
    pub fn new(grid: Grid, mode: GameMode) -> Self {
        Self {
            grid,
            mode,
            started: Instant::now(),
            status: GameStatus::Playing,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn reveal(&mut self, coords: Coord2) -> luckysweep_core::Result<RevealOutcome> {
        // the engine consumes its grid; the old one stays ours if the move is refused
        let Reveal { grid, outcome } = self.grid.clone().reveal(coords, self.mode)?;
        self.grid = grid;
        if outcome.is_game_over() {
            self.status = GameStatus::Lost;
        } else {
            self.check_complete();
        }
        Ok(outcome)
    }

    /// Toggles a flag, or returns `None` when the cell is already revealed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> luckysweep_core::Result<Option<FlagOutcome>> {
        if self.grid.cell(coords)?.is_revealed {
            return Ok(None);
        }
        let Flag { grid, outcome } = self.grid.clone().toggle_flag(coords)?;
        self.grid = grid;
        self.check_complete();
        Ok(Some(outcome))
    }

    pub fn score(&self) -> Score {
        final_score(self.mode, self.grid.revealed_count(), self.elapsed_secs())
    }

    fn check_complete(&mut self) {
        if self.grid.is_complete(self.mode) {
            self.status = GameStatus::Won;
        }
    }
}

/// Line-oriented game loop over any reader and writer.
pub struct Session<R, W> {
    setup: Setup,
    input: R,
    output: W,
    ledger: ScoreLedger,
    games_played: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(setup: Setup, input: R, output: W) -> Self {
        Self {
            setup,
            input,
            output,
            ledger: ScoreLedger::new(),
            games_played: 0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let finished = self.play_one()?;
            if !finished || !self.confirm("Play again? [y/N]")? {
                break;
            }
        }
        if !self.ledger.is_empty() {
            log::debug!("Session ledger: {}", serde_json::to_string(&self.ledger)?);
        }
        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn new_grid(&mut self) -> Result<Grid> {
        let generator = match self.setup.seed {
            // consecutive games of a seeded session still differ
            Some(seed) => RandomGridGenerator::new(seed.wrapping_add(self.games_played)),
            None => RandomGridGenerator::from_entropy(),
        };
        log::info!(
            "Starting game {} with seed {}",
            self.games_played + 1,
            generator.seed()
        );
        self.games_played += 1;
        generator
            .generate(&self.setup.config)
            .context("cannot generate the grid")
    }

    /// Plays until the game ends. Returns `false` if the player quit or input ran out.
    fn play_one(&mut self) -> Result<bool> {
        let mode = self.setup.config.mode;
        let mut game = Game::new(self.new_grid()?, mode);
        writeln!(self.output, "{HELP}")?;
        self.show(&game)?;

        while game.status() == GameStatus::Playing {
            let Some(line) = self.prompt("> ")? else {
                return Ok(false);
            };
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            match command {
                Command::Reveal(coords) => match game.reveal(coords) {
                    Ok(RevealOutcome::NoChange) => writeln!(self.output, "Nothing to reveal.")?,
                    Ok(_) => self.show(&game)?,
                    Err(err) => writeln!(self.output, "{err}")?,
                },
                Command::Flag(coords) => match game.toggle_flag(coords) {
                    Ok(Some(_)) => self.show(&game)?,
                    Ok(None) => writeln!(self.output, "Revealed cells cannot be flagged.")?,
                    Err(err) => writeln!(self.output, "{err}")?,
                },
                Command::Show => self.show(&game)?,
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => return Ok(false),
            }
        }

        match game.status() {
            GameStatus::Lost => writeln!(self.output, "Game over, you hit a mine!")?,
            GameStatus::Won => self.finish_won(&game)?,
            GameStatus::Playing => {}
        }
        Ok(true)
    }

    fn finish_won(&mut self, game: &Game) -> Result<()> {
        let score = game.score();
        writeln!(self.output, "You won! Score: {score}")?;

        let Some(difficulty) = self.setup.difficulty else {
            writeln!(self.output, "Custom grids are not ranked.")?;
            return Ok(());
        };

        let name = self
            .prompt("Enter your name: ")?
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Anonymous".to_owned());

        match self.ledger.record(difficulty, score, name) {
            Some(rank) => writeln!(self.output, "New high score, #{rank}!")?,
            None => writeln!(self.output, "Not enough for the board this time.")?,
        }
        writeln!(self.output, "{difficulty} top scores:")?;
        for (i, entry) in self.ledger.top(difficulty).iter().enumerate() {
            writeln!(self.output, "{}. {} {}", i + 1, entry.name, entry.score)?;
        }
        Ok(())
    }

    fn show(&mut self, game: &Game) -> Result<()> {
        let grid = game.grid();
        writeln!(self.output, "{grid}")?;
        writeln!(
            self.output,
            "Mines: {}  Time: {}",
            grid.mines_left(),
            format_time(game.elapsed_secs())
        )?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("cannot read player input")?;
        Ok((read > 0).then_some(line))
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{question} "))?;
        Ok(answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }
}

/// `M:SS`, the status bar clock.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(setup: Setup, script: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(setup, Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(session: &Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.output.clone()).unwrap()
    }

    /// Moves that win a freshly generated grid, flags included.
    fn winning_script(setup: &Setup) -> String {
        let grid = RandomGridGenerator::new(setup.seed.unwrap())
            .generate(&setup.config)
            .unwrap();
        let mut script = String::new();
        for ((row, col), cell) in grid.iter_cells() {
            if cell.is_mine {
                if setup.config.mode.has_hints() {
                    script.push_str(&format!("f {row} {col}\n"));
                }
            } else {
                script.push_str(&format!("r {row} {col}\n"));
            }
        }
        script
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn game_refuses_flag_on_revealed_cell() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0)], GameMode::Standard).unwrap();
        let mut game = Game::new(grid, GameMode::Standard);

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Revealed(1));
        assert_eq!(game.toggle_flag((1, 1)).unwrap(), None);
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), Some(FlagOutcome::Added));
        assert!(game.grid()[(0, 0)].is_flagged);
    }

    #[test]
    fn game_keeps_grid_after_out_of_bounds_move() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0)], GameMode::Standard).unwrap();
        let mut game = Game::new(grid.clone(), GameMode::Standard);

        assert_eq!(game.reveal((9, 9)), Err(GameError::OutOfBounds((9, 9))));
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn game_tracks_win_and_loss() {
        let grid = Grid::from_mine_coords((1, 2), &[(0, 0)], GameMode::Lucky).unwrap();
        let mut lost = Game::new(grid.clone(), GameMode::Lucky);
        lost.reveal((0, 0)).unwrap();
        assert_eq!(lost.status(), GameStatus::Lost);

        let mut won = Game::new(grid, GameMode::Lucky);
        won.reveal((0, 1)).unwrap();
        assert_eq!(won.status(), GameStatus::Won);
    }

    #[test]
    fn winning_lucky_game_lands_on_the_board() {
        let setup = Setup {
            config: Difficulty::Lucky.game_config(),
            difficulty: Some(Difficulty::Lucky),
            seed: Some(17),
        };
        let script = format!("{}punk\nn\n", winning_script(&setup));
        let mut session = session(setup, &script);

        session.run().unwrap();

        let top = session.ledger.top(Difficulty::Lucky);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "punk");
        let out = output(&session);
        assert!(out.contains("You won!"), "{out}");
        assert!(out.contains("New high score, #1!"), "{out}");
    }

    #[test]
    fn winning_custom_game_is_not_ranked() {
        let setup = Setup {
            config: GameConfig::new((4, 4), 2, GameMode::Standard).unwrap(),
            difficulty: None,
            seed: Some(3),
        };
        let script = format!("{}n\n", winning_script(&setup));
        let mut session = session(setup, &script);

        session.run().unwrap();

        assert!(session.ledger.is_empty());
        assert!(output(&session).contains("Custom grids are not ranked."));
    }

    #[test]
    fn bad_commands_are_reported_and_quit_ends_the_session() {
        let setup = Setup {
            config: Difficulty::Easy.game_config(),
            difficulty: Some(Difficulty::Easy),
            seed: Some(1),
        };
        let mut session = session(setup, "dig\nr 99 0\nq\n");

        session.run().unwrap();

        let out = output(&session);
        assert!(out.contains("unknown command `dig`"), "{out}");
        assert!(out.contains("outside the grid"), "{out}");
        assert!(out.ends_with("Bye.\n"), "{out}");
    }
}
