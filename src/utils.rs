use std::fmt::Debug;
use std::hash::Hash;

// ---------- Tune-ables ---------- //
pub const DEFAULT_CAPACITY: usize = 64;  // Initial room in each node arena before it reallocates
pub const DUMP_DEPTH: usize = 5;  // How many layers print_family shows

// ---------- Basic types (renamed for pretty) ---------- //
pub type Reward = f64;
pub type Visits = u32;

/// Side to move in the bundled two player games
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player { P1, P2 }

impl Player {
    /// Terminal payoff from P1's point of view when this player wins
    pub fn best_value(self) -> Reward {
        match self { Player::P1 => 1.0, Player::P2 => -1.0 }
    }
}

// ---------- Traits the domain must provide ----------
/// Properties we want all domain actions to have
pub trait ActionI: Clone + Eq + Hash + Debug {}  // see State trait for more details
impl<T: Clone + Eq + Hash + Debug> ActionI for T {}

/// A position in the planning domain. Equal states are the same position, which is
/// what lets the graph collapse repeated samples onto a single node.
pub trait State: Sized + Clone + Eq + Hash + Debug {
    /// The actions that could possibly be taken
    type Action: ActionI;
    /// Whatever the domain reports when a transition is refused
    type Error;

    /// Every legal action from this state (fixed for the lifetime of the state)
    fn actions(&self) -> Vec<Self::Action>;
    /// Successor after taking `action`. May be random. `real_world` marks an actual
    /// environment step as opposed to a planning rollout; the graph never looks at it.
    fn perform(&self, action: &Self::Action, real_world: bool) -> Result<Self, Self::Error>;
}
