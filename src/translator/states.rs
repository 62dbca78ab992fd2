use std::fmt;

use crate::common::{DistinguishedStates, Motion, Symbol};

/// Control states of the one-tape simulator.
///
/// Each variant is one phase of the simulation cycle; the payload fields
/// carry the context that phase needs: the simulated machine's own state
/// (`org_state`), the letter read under head 1, the pending head-1 write
/// and direction, or the cell being carried during a tape shift. Rendered
/// as structured names (`phase|key:value|…`) only when a transition file is
/// emitted; until then the states stay typed and hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimState<S> {
    /// The three states shared verbatim with the simulated machine
    Start,
    Accept,
    Reject,

    /// Walking right over the input word after underlining its first letter
    InitFirstTape,
    /// Double-underlining the blank that seeds tape 2
    InitSecondTapeHead,
    /// Dropping the trailing separator after the tape-2 cell
    InitSecondTapeSeparator,
    /// Walking left over the freshly built tape-2 region
    RewindOverSecondTape { org_state: S },
    /// Walking left over tape 1 until the underlined cell is found
    RewindOverFirstTape { org_state: S },

    /// Carrying the letter read at head 1, walking right to head 2. The
    /// nondeterministic choice of simulated transition happens on the
    /// double-underlined cell in this state.
    ScanToSecondHead { org_state: S, let1: Symbol },

    /// A simulated transition has been chosen; perform the tape-2 write
    WriteSecondHead {
        org_state: S,
        write1: Symbol,
        write2: Symbol,
        dir1: Motion,
        dir2: Motion,
    },
    /// Head 2 moved right; mark the new cell or grow tape 2
    SecondHeadMovedRight { org_state: S, write1: Symbol, dir1: Motion },
    /// Tape 2 ran out: the old separator became the new head cell, a new
    /// separator goes over the trailing blank
    GrowSecondTape { org_state: S, write1: Symbol, dir1: Motion },
    /// Head 2 moved left; mark the new cell or bounce off the separator
    SecondHeadMovedLeft { org_state: S, write1: Symbol, dir1: Motion },
    /// Head 2 was already leftmost; re-mark the cell it never left
    SecondHeadAtLeftEdge { org_state: S, write1: Symbol, dir1: Motion },

    /// Walking left back to the underlined head-1 cell
    ReturnToFirstHead { org_state: S, write1: Symbol, dir1: Motion },

    /// On the underlined cell; perform the tape-1 write
    WriteFirstHead { org_state: S, write1: Symbol, dir1: Motion },
    /// Probing the cell left of head 1; the underline is still in place, so
    /// reading it back means head 1 sat on the leftmost cell
    FirstHeadMovedLeft { org_state: S, write1: Symbol },
    /// The probe found a plain cell and underlined it; the pending letter
    /// still has to land in the old head cell
    RestoreFirstHeadCell { org_state: S, write1: Symbol },
    /// Head 1 moved right; mark the new cell or grow tape 1
    FirstHeadMovedRight { org_state: S },
    /// Tape 1 ran out: the separator became the new head cell, and the
    /// whole tape-2 region must rotate one cell to the right
    GrowFirstTape { org_state: S },
    /// Rotating tape 2: write the carried cell, pick up the next one
    ShiftSecondTape { org_state: S, carry: Symbol },
    /// After the rotation, walk left back to head 1
    RewindToFirstHead { org_state: S },

    /// One simulated step is complete; halt on a terminal state or start
    /// the next cycle
    EnterOriginalState { org_state: S },
}

impl<S: PartialEq> DistinguishedStates for SimState<S> {
    fn start() -> Self {
        SimState::Start
    }

    fn accept() -> Self {
        SimState::Accept
    }

    fn reject() -> Self {
        SimState::Reject
    }

    fn is_accept(&self) -> bool {
        matches!(self, SimState::Accept)
    }

    fn is_reject(&self) -> bool {
        matches!(self, SimState::Reject)
    }
}

impl<S: fmt::Display> fmt::Display for SimState<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use SimState::*;
        match self {
            Start => write!(f, "start"),
            Accept => write!(f, "accept"),
            Reject => write!(f, "reject"),
            InitFirstTape => write!(f, "initTape1"),
            InitSecondTapeHead => write!(f, "initTape2Head"),
            InitSecondTapeSeparator => write!(f, "initTape2Sep"),
            RewindOverSecondTape { org_state } => write!(f, "rewindTape2|org:{}", org_state),
            RewindOverFirstTape { org_state } => write!(f, "rewindTape1|org:{}", org_state),
            ScanToSecondHead { org_state, let1 } => {
                write!(f, "scanToHead2|org:{}|let1:{}", org_state, let1)
            }
            WriteSecondHead {
                org_state,
                write1,
                write2,
                dir1,
                dir2,
            } => write!(
                f,
                "writeHead2|org:{}|w1:{}|w2:{}|d1:{}|d2:{}",
                org_state, write1, write2, dir1, dir2
            ),
            SecondHeadMovedRight {
                org_state,
                write1,
                dir1,
            } => write!(f, "head2Right|org:{}|w1:{}|d1:{}", org_state, write1, dir1),
            GrowSecondTape {
                org_state,
                write1,
                dir1,
            } => write!(f, "growTape2|org:{}|w1:{}|d1:{}", org_state, write1, dir1),
            SecondHeadMovedLeft {
                org_state,
                write1,
                dir1,
            } => write!(f, "head2Left|org:{}|w1:{}|d1:{}", org_state, write1, dir1),
            SecondHeadAtLeftEdge {
                org_state,
                write1,
                dir1,
            } => write!(
                f,
                "head2LeftEdge|org:{}|w1:{}|d1:{}",
                org_state, write1, dir1
            ),
            ReturnToFirstHead {
                org_state,
                write1,
                dir1,
            } => write!(
                f,
                "returnToHead1|org:{}|w1:{}|d1:{}",
                org_state, write1, dir1
            ),
            WriteFirstHead {
                org_state,
                write1,
                dir1,
            } => write!(f, "writeHead1|org:{}|w1:{}|d1:{}", org_state, write1, dir1),
            FirstHeadMovedLeft { org_state, write1 } => {
                write!(f, "head1Left|org:{}|w1:{}", org_state, write1)
            }
            RestoreFirstHeadCell { org_state, write1 } => {
                write!(f, "head1Restore|org:{}|w1:{}", org_state, write1)
            }
            FirstHeadMovedRight { org_state } => write!(f, "head1Right|org:{}", org_state),
            GrowFirstTape { org_state } => write!(f, "growTape1|org:{}", org_state),
            ShiftSecondTape { org_state, carry } => {
                write!(f, "shiftTape2|org:{}|carry:{}", org_state, carry)
            }
            RewindToFirstHead { org_state } => write!(f, "rewindToHead1|org:{}", org_state),
            EnterOriginalState { org_state } => write!(f, "resume|org:{}", org_state),
        }
    }
}
