//! # TicTacToe
//!
//! Deterministic demo domain. Every move has exactly one outcome, so each action node
//! in a tic-tac-toe graph ends up with at most one successor.

use thiserror::Error;
use crate::utils::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("square ({x}, {y}) is already taken")]
    Occupied { x: usize, y: usize },
    #[error("square ({x}, {y}) is off the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("game already over")]
    GameOver,
}

#[derive(Clone, Eq, Hash, Debug, PartialEq)]
pub struct TicTacToe {
    board: Vec<Vec<Option<Player>>>
}

impl Default for TicTacToe {
    fn default() -> Self { Self::new() }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self { board: vec![
            vec![None, None, None],
            vec![None, None, None],
            vec![None, None, None],
        ] }
    }

    pub fn active_player(&self) -> Player {
        let filled_squares = self.board.iter().flatten().filter(|x| x.is_some()).count();
        if filled_squares%2==0 { Player::P1 } else { Player::P2 }
    }

    fn open_squares(&self) -> Vec<(usize, usize)> {
        (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).filter(|(x, y)| self.board[*y][*x].is_none()).collect()
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.open_squares().is_empty()
    }

    fn winner(&self) -> Option<Player> {
        let b = &self.board;
        if let Some(y) = (0..3).find(|&y| (0..3).all(|x| b[y][x].is_some() && b[y][x] == b[y][0])) {
            b[y][0]
        } else if let Some(x) = (0..3).find(|&x| (0..3).all(|y| b[y][x].is_some() && b[y][x] == b[0][x])) {
            b[0][x]
        } else if (0..3).all(|x| b[x][x].is_some() && b[x][x] == b[0][0]) {
            b[0][0]
        } else if (0..3).all(|x| b[2-x][x].is_some() && b[2-x][x] == b[2][0]) {
            b[2][0]
        } else {
            None
        }
    }

    /// +1 if P1 has a line, -1 for P2, 0 otherwise
    pub fn evaluate(&self) -> Reward {
        self.winner().map_or(0.0, Player::best_value)
    }
}

impl State for TicTacToe {
    type Action = (usize, usize);
    type Error = MoveError;

    fn actions(&self) -> Vec<Self::Action> {
        if self.winner().is_some() { return vec![]; }
        self.open_squares()
    }

    fn perform(&self, action: &Self::Action, _real_world: bool) -> Result<Self, MoveError> {
        let &(x, y) = action;
        if x >= 3 || y >= 3 { return Err(MoveError::OutOfBounds { x, y }); }
        if self.is_over() { return Err(MoveError::GameOver); }
        if self.board[y][x].is_some() { return Err(MoveError::Occupied { x, y }); }
        let mut s = self.clone();
        s.board[y][x] = Some(self.active_player());
        Ok(s)
    }
}
