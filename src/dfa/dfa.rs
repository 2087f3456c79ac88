use crate::error_handling::Error::CapacityExceeded;
use crate::error_handling::Result;
use crate::nfa::{StateSet, Symbol, SymbolId, NFA};
use crate::parser::NamingScheme;
use std::collections::{HashMap, VecDeque};

/// Index of a DFA row, in discovery order. `State(0)` is the start state.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(usize);

impl State {
    pub fn get_index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    name: String,
    composition: StateSet,
    transitions: Vec<Option<State>>, // symbol[index in the alphabet] -> destination
    accepting: bool,
}

impl Row {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_composition(&self) -> &StateSet {
        &self.composition
    }

    pub fn get_transitions(&self) -> &[Option<State>] {
        &self.transitions
    }

    pub fn get_transition(&self, symbol: SymbolId) -> Option<State> {
        self.transitions.get(symbol.get_index()).copied().flatten()
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DFA {
    rows: Vec<Row>,
}

impl DFA {
    pub fn get_rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get_row(&self, state: State) -> &Row {
        &self.rows[state.0]
    }

    pub fn get_root(&self) -> State {
        State(0)
    }

    pub fn get_accept(&self) -> Vec<State> {
        self.states().filter(|s| self.rows[s.0].accepting).collect()
    }

    pub fn states(&self) -> impl Iterator<Item = State> {
        (0..self.rows.len()).map(State)
    }

    pub fn get_name(&self, state: State) -> &str {
        &self.rows[state.0].name
    }

    pub fn get_next_state(&self, state: State, symbol: SymbolId) -> Option<State> {
        self.rows.get(state.0)?.get_transition(symbol)
    }

    // Returns false as soon as the DFA reaches a dead end.
    pub fn simulate(&self, input: &[SymbolId]) -> bool {
        let mut current_state = self.get_root();
        for symbol in input {
            match self.get_next_state(current_state, *symbol) {
                Some(next_state) => current_state = next_state,
                None => return false,
            }
        }
        self.rows[current_state.0].accepting
    }
}

struct SubsetConstruction<'a> {
    nfa: &'a NFA,
    naming: NamingScheme,
    rows: Vec<Row>,
    nfa_states_to_dfa_mapping: HashMap<StateSet, State>,
    worklist: VecDeque<State>,
}

impl<'a> SubsetConstruction<'a> {
    fn new(nfa: &'a NFA, naming: NamingScheme) -> Self {
        Self {
            nfa,
            naming,
            rows: Vec::new(),
            nfa_states_to_dfa_mapping: HashMap::new(),
            worklist: VecDeque::new(),
        }
    }

    fn get_or_discover(&mut self, composition: StateSet) -> Result<State> {
        if let Some(state) = self.nfa_states_to_dfa_mapping.get(&composition) {
            return Ok(*state);
        }

        let state = State(self.rows.len());
        let name = self
            .naming
            .name(state.0)
            .ok_or_else(|| CapacityExceeded(self.naming.capacity().unwrap_or(state.0)))?;
        let accepting = self.nfa.is_accepting(&composition);
        log::debug!(
            "Discovered DFA state {} = {{{}}}{}",
            name,
            self.nfa.labels_of(&composition).join(","),
            if accepting { " (accepting)" } else { "" }
        );

        self.rows.push(Row {
            name,
            composition: composition.clone(),
            transitions: Vec::new(),
            accepting,
        });
        self.nfa_states_to_dfa_mapping.insert(composition, state);
        self.worklist.push_back(state);
        Ok(state)
    }

    fn run(mut self) -> Result<DFA> {
        let start = StateSet::from([self.nfa.get_initial()]);
        self.get_or_discover(self.nfa.epsilon_closure(&start))?;

        // Breadth first, so names follow discovery order
        while let Some(dfa_state) = self.worklist.pop_front() {
            let composition = self.rows[dfa_state.0].composition.clone();
            let mut transitions = Vec::with_capacity(self.nfa.get_alphabet().len());

            for symbol in self.nfa.symbols() {
                let moved = self.nfa.move_on_symbol(&composition, Symbol::Input(symbol));
                let destination = self.nfa.epsilon_closure(&moved);
                if destination.is_empty() {
                    transitions.push(None);
                    continue;
                }
                transitions.push(Some(self.get_or_discover(destination)?));
            }

            self.rows[dfa_state.0].transitions = transitions;
        }

        Ok(DFA { rows: self.rows })
    }
}

impl DFA {
    /// Subset construction. Fails with `CapacityExceeded` when `naming` runs
    /// out of names.
    pub fn from_nfa(nfa: &NFA, naming: NamingScheme) -> Result<DFA> {
        SubsetConstruction::new(nfa, naming).run()
    }
}
