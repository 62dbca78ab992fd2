use std::fmt::{self, Debug};
use std::hash::Hash;

use hashbrown::HashSet;
use lazy_static::lazy_static;

/// A tape symbol. `BLANK` is the designated empty cell; the input word
/// alphabet is `{1..9}`, the tape alphabet any nonnegative integers.
pub type Symbol = u32;

/// The blank tape symbol.
pub const BLANK: Symbol = 0;

/// Name of the initial state.
pub const START_STATE: &str = "start";

/// Name of the accepting state.
pub const ACCEPT_STATE: &str = "accept";

/// Name of the rejecting state.
pub const REJECT_STATE: &str = "reject";

lazy_static! {
    static ref TERMINAL_STATE_NAMES: HashSet<&'static str> = {
        let mut s = HashSet::with_capacity(2);
        s.insert(ACCEPT_STATE);
        s.insert(REJECT_STATE);
        s
    };
}

/// The set of movements a machine head can take on a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Stay,
}

/// All motions, in the order used by combinatorial emission.
pub const MOTIONS: [Motion; 3] = [Motion::Left, Motion::Right, Motion::Stay];

impl Default for Motion {
    fn default() -> Self {
        Motion::Stay
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Motion::Left => "L",
            Motion::Right => "R",
            Motion::Stay => "S",
        };
        write!(f, "{}", c)
    }
}

/// Bounds shared by every state type the machines are generic over
pub trait StateTrait: Clone + Debug + Eq + Hash {}

impl<T> StateTrait for T where T: Clone + Debug + Eq + Hash {}

/// Access to the three distinguished states of a machine.
/// `start` is where every run begins; `accept` and `reject` are terminal
/// and have no outgoing transitions worth consulting.
pub trait DistinguishedStates: Sized + PartialEq {
    fn start() -> Self;
    fn accept() -> Self;
    fn reject() -> Self;

    fn is_accept(&self) -> bool {
        *self == Self::accept()
    }

    fn is_reject(&self) -> bool {
        *self == Self::reject()
    }

    fn is_terminal(&self) -> bool {
        self.is_accept() || self.is_reject()
    }
}

impl DistinguishedStates for String {
    fn start() -> Self {
        START_STATE.to_string()
    }

    fn accept() -> Self {
        ACCEPT_STATE.to_string()
    }

    fn reject() -> Self {
        REJECT_STATE.to_string()
    }

    fn is_terminal(&self) -> bool {
        TERMINAL_STATE_NAMES.contains(self.as_str())
    }
}
