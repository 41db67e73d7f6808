//! # Dice
//!
//! Stochastic demo domain: keep rolling a die to push the running total towards
//! `TARGET`, or stop and bank it. Going over the target busts. Rolling the same total
//! twice from the same node lands on the same successor node.

use rand::Rng;
use thiserror::Error;
use crate::utils::*;

pub const TARGET: u8 = 10;
pub const FACES: u8 = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("game already over at {total}")]
pub struct DiceError { pub total: u8 }

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DiceAction { Roll, Stop }

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Dice {
    pub total: u8,
    pub done: bool,
}

impl Dice {
    pub fn new() -> Self { Self::default() }

    pub fn is_bust(&self) -> bool { self.total > TARGET }

    /// The banked total, or nothing on a bust
    pub fn evaluate(&self) -> Reward {
        if self.is_bust() { 0.0 } else { self.total as Reward }
    }

    /// Deterministic part of a roll, split out so outcomes can be forced
    pub fn after_roll(&self, face: u8) -> Self {
        debug_assert!((1..=FACES).contains(&face));
        if self.done { return *self; }
        let total = self.total.saturating_add(face);
        Dice { total, done: total > TARGET }
    }
}

impl State for Dice {
    type Action = DiceAction;
    type Error = DiceError;

    fn actions(&self) -> Vec<DiceAction> {
        if self.done { return vec![]; }
        vec![DiceAction::Roll, DiceAction::Stop]
    }

    fn perform(&self, action: &DiceAction, _real_world: bool) -> Result<Self, DiceError> {
        if self.done { return Err(DiceError { total: self.total }); }
        Ok(match action {
            DiceAction::Roll => self.after_roll(rand::rng().random_range(1..=FACES)),
            DiceAction::Stop => Dice { total: self.total, done: true },
        })
    }
}
