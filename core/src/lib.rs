//! Grid engine for a minesweeper game with a standard and a no-hint "lucky" variant.
//!
//! A game starts from a [`Grid`] built by [`Grid::generate`] or a [`GridGenerator`]. The
//! caller then threads that grid through [`Grid::reveal`] and [`Grid::toggle_flag`], each of
//! which consumes it and hands it back with the outcome, and asks [`Grid::is_complete`] for the
//! win condition. Won games are scored with the [`score`] formulas and ranked in a
//! [`ScoreLedger`].

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use ledger::*;
pub use score::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod grid;
mod ledger;
pub mod score;
mod types;
