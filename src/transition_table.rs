//! The transition table is the most integral part of each machine. A
//! nondeterministic single-tape machine is a map
//! `S x T -> P(S x T x {L, R, S})`; the table stores the right hand side as
//! a set, so duplicate transitions collapse and lookup order never matters.

use hashbrown::{HashMap, HashSet};

use crate::common::{Motion, StateTrait, Symbol};

/// Encapsulate the possible actions that can be done on the tape on a
/// single step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action<StateTy>
where
    StateTy: StateTrait,
{
    next_state: StateTy,
    tape_output: Symbol,
    motion: Motion,
}

impl<StateTy> Action<StateTy>
where
    StateTy: StateTrait,
{
    pub fn new(next_state: StateTy, tape_output: Symbol, motion: Motion) -> Self {
        Action {
            next_state,
            tape_output,
            motion,
        }
    }

    /// Get the next state to move to
    pub fn next_state(&self) -> &StateTy {
        &self.next_state
    }

    /// Get the symbol to write to the tape
    pub fn tape_output(&self) -> Symbol {
        self.tape_output
    }

    /// Get the direction of motion
    pub fn motion(&self) -> Motion {
        self.motion
    }
}

/// The transition table of a nondeterministic single-tape machine
#[derive(Debug, Clone, Default)]
pub struct TransitionTable<StateTy>
where
    StateTy: StateTrait,
{
    transitions: HashMap<(StateTy, Symbol), HashSet<Action<StateTy>>>,
}

impl<StateTy> TransitionTable<StateTy>
where
    StateTy: StateTrait,
{
    pub fn new() -> Self {
        TransitionTable {
            transitions: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TransitionTable {
            transitions: HashMap::with_capacity(capacity),
        }
    }

    /// Add a transition, initializing the entry if not present. Duplicates
    /// collapse silently.
    pub fn insert(&mut self, state: StateTy, read: Symbol, action: Action<StateTy>) {
        self.transitions
            .entry((state, read))
            .or_insert_with(HashSet::new)
            .insert(action);
    }

    /// Given a current state and the symbol under the head, which
    /// transitions can the machine take?
    pub fn apply_transition_table(
        &self,
        state: &StateTy,
        read: Symbol,
    ) -> Option<&HashSet<Action<StateTy>>> {
        self.transitions.get(&(state.clone(), read))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(StateTy, Symbol), &HashSet<Action<StateTy>>)> {
        self.transitions.iter()
    }

    /// Total number of distinct transitions
    pub fn len(&self) -> usize {
        self.transitions.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_transitions_collapse() {
        let mut table: TransitionTable<String> = TransitionTable::new();
        let act = Action::new("q1".to_string(), 2, Motion::Right);
        table.insert("start".to_string(), 1, act.clone());
        table.insert("start".to_string(), 1, act.clone());
        assert_eq!(table.len(), 1);

        let actions = table
            .apply_transition_table(&"start".to_string(), 1)
            .expect("entry should exist");
        assert_eq!(actions.len(), 1);
        assert!(actions.contains(&act));
    }

    #[test]
    fn multiple_actions_per_key() {
        let mut table: TransitionTable<String> = TransitionTable::new();
        table.insert(
            "start".to_string(),
            1,
            Action::new("accept".to_string(), 1, Motion::Stay),
        );
        table.insert(
            "start".to_string(),
            1,
            Action::new("reject".to_string(), 1, Motion::Stay),
        );
        let actions = table
            .apply_transition_table(&"start".to_string(), 1)
            .expect("entry should exist");
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn missing_key_yields_nothing() {
        let table: TransitionTable<String> = TransitionTable::new();
        assert!(table
            .apply_transition_table(&"start".to_string(), 7)
            .is_none());
    }
}
