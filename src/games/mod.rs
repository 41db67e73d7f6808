//! # Demo Domains
//!
//! Small domains implementing the `State` trait, used by the demo binary and the tests:
//! - **Deterministic**: TicTacToe
//! - **Stochastic**: Dice

pub mod dice;
pub mod tictactoe;
