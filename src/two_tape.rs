//! Two-tape machine model: `S x T^2 -> P(S x T^2 x {L, R, S}^2)`. Only the
//! table and its actions live here; two-tape machines are never executed
//! directly, they exist to be compiled down to one tape by the
//! [`translator`](../translator/index.html).

use hashbrown::{HashMap, HashSet};

use crate::common::{DistinguishedStates, Motion, StateTrait, Symbol, BLANK};

/// One step of a two-tape machine: a write and a motion for each head
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwoTapeAction<StateTy>
where
    StateTy: StateTrait,
{
    next_state: StateTy,
    tape_outputs: (Symbol, Symbol),
    motions: (Motion, Motion),
}

impl<StateTy> TwoTapeAction<StateTy>
where
    StateTy: StateTrait,
{
    pub fn new(
        next_state: StateTy,
        tape_outputs: (Symbol, Symbol),
        motions: (Motion, Motion),
    ) -> Self {
        TwoTapeAction {
            next_state,
            tape_outputs,
            motions,
        }
    }

    pub fn next_state(&self) -> &StateTy {
        &self.next_state
    }

    /// The symbols written under head 1 and head 2
    pub fn tape_outputs(&self) -> (Symbol, Symbol) {
        self.tape_outputs
    }

    /// The motions of head 1 and head 2
    pub fn motions(&self) -> (Motion, Motion) {
        self.motions
    }
}

/// The transition table of a nondeterministic two-tape machine
#[derive(Debug, Clone, Default)]
pub struct TwoTapeTransitionTable<StateTy>
where
    StateTy: StateTrait,
{
    transitions: HashMap<(StateTy, Symbol, Symbol), HashSet<TwoTapeAction<StateTy>>>,
}

impl<StateTy> TwoTapeTransitionTable<StateTy>
where
    StateTy: StateTrait,
{
    pub fn new() -> Self {
        TwoTapeTransitionTable {
            transitions: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        state: StateTy,
        reads: (Symbol, Symbol),
        action: TwoTapeAction<StateTy>,
    ) {
        self.transitions
            .entry((state, reads.0, reads.1))
            .or_insert_with(HashSet::new)
            .insert(action);
    }

    pub fn apply_transition_table(
        &self,
        state: &StateTy,
        reads: (Symbol, Symbol),
    ) -> Option<&HashSet<TwoTapeAction<StateTy>>> {
        self.transitions.get(&(state.clone(), reads.0, reads.1))
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&(StateTy, Symbol, Symbol), &HashSet<TwoTapeAction<StateTy>>)> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Every symbol the machine mentions, plus `BLANK`
    pub fn alphabet(&self) -> HashSet<Symbol> {
        let mut alphabet = HashSet::new();
        alphabet.insert(BLANK);
        for ((_, read1, read2), actions) in self.transitions.iter() {
            alphabet.insert(*read1);
            alphabet.insert(*read2);
            for action in actions {
                let (out1, out2) = action.tape_outputs();
                alphabet.insert(out1);
                alphabet.insert(out2);
            }
        }
        alphabet
    }

    /// Every state the machine mentions, plus the distinguished three
    pub fn states(&self) -> HashSet<StateTy>
    where
        StateTy: DistinguishedStates,
    {
        let mut states = HashSet::new();
        states.insert(StateTy::start());
        states.insert(StateTy::accept());
        states.insert(StateTy::reject());
        for ((state, _, _), actions) in self.transitions.iter() {
            states.insert(state.clone());
            for action in actions {
                states.insert(action.next_state().clone());
            }
        }
        states
    }
}
