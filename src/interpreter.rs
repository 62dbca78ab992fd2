//! Step-bounded execution of nondeterministic single-tape machines.
//!
//! The configuration graph is explored breadth first, one layer per step.
//! A history set holds every configuration ever expanded, so a cycle in the
//! graph is expanded at most once and every run terminates: the step bound
//! caps the layer count, and within the bound the tape can grow by at most
//! one cell per rightward move.

use hashbrown::HashSet;
use log::debug;

use crate::common::{DistinguishedStates, Motion, StateTrait, Symbol, BLANK};
use crate::transition_table::TransitionTable;

/// Snapshot of a machine mid-run: current state, full tape contents, head
/// position. Compared by value; the history set deduplicates on the whole
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration<StateTy>
where
    StateTy: StateTrait,
{
    state: StateTy,
    tape: Vec<Symbol>,
    head: usize,
}

impl<StateTy> Configuration<StateTy>
where
    StateTy: StateTrait,
{
    /// The head must sit on a cell of the tape
    pub fn new(state: StateTy, tape: Vec<Symbol>, head: usize) -> Self {
        debug_assert!(head < tape.len());
        Configuration { state, tape, head }
    }

    pub fn state(&self) -> &StateTy {
        &self.state
    }

    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    pub fn head(&self) -> usize {
        self.head
    }
}

/// How a bounded run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Some branch reached `accept`
    Accepted,

    /// The frontier drained before the bound: every branch halted in
    /// `reject` or got stuck with no applicable transition
    Rejected,

    /// The step bound ran out with live branches remaining
    StepLimit,
}

impl RunOutcome {
    pub fn is_accepting(self) -> bool {
        self == RunOutcome::Accepted
    }
}

/// The result of a bounded run
#[derive(Debug, Clone, Copy)]
pub struct ExecutionResult {
    pub outcome: RunOutcome,

    /// How many BFS layers were executed
    pub num_steps: usize,

    /// How many distinct configurations were expanded
    pub explored: usize,
}

/// Breadth-first executor for a nondeterministic machine, limited to a
/// fixed number of steps
#[derive(Debug)]
pub struct BoundedInterpreter<'a, StateTy>
where
    StateTy: StateTrait + DistinguishedStates,
{
    table: &'a TransitionTable<StateTy>,
    max_steps: usize,
}

impl<'a, StateTy> BoundedInterpreter<'a, StateTy>
where
    StateTy: StateTrait + DistinguishedStates,
{
    pub fn new(table: &'a TransitionTable<StateTy>, max_steps: usize) -> Self {
        BoundedInterpreter { table, max_steps }
    }

    /// Decide whether the machine accepts `input` within the step bound.
    /// The initial configuration is `start` at position 0 on the input word
    /// padded with one blank, so the head always has a legal symbol under
    /// it.
    pub fn run(&self, input: &[Symbol]) -> ExecutionResult {
        let mut tape = Vec::with_capacity(input.len() + 1);
        tape.extend_from_slice(input);
        tape.push(BLANK);

        let mut frontier: HashSet<Configuration<StateTy>> = HashSet::new();
        frontier.insert(Configuration::new(StateTy::start(), tape, 0));

        let mut history: HashSet<Configuration<StateTy>> = HashSet::new();
        let mut num_steps = 0;

        while num_steps < self.max_steps && !frontier.is_empty() {
            let mut next_layer = HashSet::new();

            for config in frontier {
                if history.contains(&config) {
                    continue;
                }
                if config.state().is_accept() {
                    debug!(
                        "accepting configuration found after {} steps",
                        num_steps
                    );
                    return ExecutionResult {
                        outcome: RunOutcome::Accepted,
                        num_steps,
                        explored: history.len(),
                    };
                }
                if !config.state().is_reject() {
                    self.extend_successors(&config, &mut next_layer);
                }
                history.insert(config);
            }

            frontier = next_layer;
            num_steps += 1;
        }

        let outcome = if frontier.is_empty() {
            RunOutcome::Rejected
        } else {
            RunOutcome::StepLimit
        };
        debug!(
            "run ended without accepting: {:?} after {} steps, {} configurations",
            outcome,
            num_steps,
            history.len()
        );
        ExecutionResult {
            outcome,
            num_steps,
            explored: history.len(),
        }
    }

    /// Union every successor of `config` into `next_layer`. A configuration
    /// with no applicable transition contributes nothing: the branch is
    /// stuck, which rejects.
    fn extend_successors(
        &self,
        config: &Configuration<StateTy>,
        next_layer: &mut HashSet<Configuration<StateTy>>,
    ) {
        let read = config.tape()[config.head()];
        let actions = match self.table.apply_transition_table(config.state(), read) {
            Some(actions) => actions,
            None => return,
        };

        for action in actions {
            let mut tape = config.tape().to_vec();
            tape[config.head()] = action.tape_output();

            let head = match action.motion() {
                // A left move at the leftmost cell leaves the head in place
                Motion::Left => config.head().saturating_sub(1),
                Motion::Stay => config.head(),
                Motion::Right => config.head() + 1,
            };
            if head == tape.len() {
                tape.push(BLANK);
            }
            // Keep the trailing blank modelling the infinite suffix
            if tape.last() != Some(&BLANK) {
                tape.push(BLANK);
            }

            next_layer.insert(Configuration::new(action.next_state().clone(), tape, head));
        }
    }
}
