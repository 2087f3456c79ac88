use crate::error_handling::Error::MalformedDescription;
use crate::error_handling::Result;

use indexmap::IndexSet;
use std::collections::BTreeSet;

pub const EPSILON_DISPLAY: &str = "ε";

/// Position of a state label in the `Q:` declaration.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn get_index(&self) -> usize {
        self.0
    }
}

/// Position of a symbol in the `L:` declaration.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SymbolId(pub(crate) usize);

impl SymbolId {
    pub fn get_index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Symbol {
    Epsilon,
    Input(SymbolId),
}

/// A composite state. Ordered by `StateId`, so two sets with the same members
/// compare and hash equal regardless of discovery order.
pub type StateSet = BTreeSet<StateId>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    from: StateId,
    to: StateId,
    symbol: Symbol,
}

impl Transition {
    pub fn new(from: StateId, to: StateId, symbol: Symbol) -> Self {
        Self { from, to, symbol }
    }

    pub fn get_from_state(&self) -> StateId {
        self.from
    }

    pub fn get_to_state(&self) -> StateId {
        self.to
    }

    pub fn get_symbol(&self) -> Symbol {
        self.symbol
    }
}

#[derive(Clone, Debug)]
pub struct NFA {
    states: IndexSet<String>,
    alphabet: IndexSet<String>,
    initial: StateId,
    finals: StateSet,
    transitions: Vec<Transition>,
    outgoing: Vec<Vec<usize>>, // from_state -> indices into `transitions`
}

impl NFA {
    /// Builds the automaton from resolved ids. Every id must index into
    /// `states` or `alphabet`, otherwise a `MalformedDescription` is returned.
    pub(crate) fn new(
        states: IndexSet<String>,
        alphabet: IndexSet<String>,
        initial: StateId,
        finals: StateSet,
        transitions: Vec<Transition>,
    ) -> Result<Self> {
        let num_states = states.len();
        let check_state = |state: StateId| -> Result<()> {
            if state.0 >= num_states {
                return Err(MalformedDescription(format!(
                    "state id {} is out of range for {} declared states",
                    state.0, num_states
                )));
            }
            Ok(())
        };

        check_state(initial)?;
        for &state in &finals {
            check_state(state)?;
        }

        let mut outgoing = vec![Vec::new(); num_states];
        for (idx, transition) in transitions.iter().enumerate() {
            check_state(transition.from)?;
            check_state(transition.to)?;
            if let Symbol::Input(symbol) = transition.symbol {
                if symbol.0 >= alphabet.len() {
                    return Err(MalformedDescription(format!(
                        "symbol id {} is out of range for {} declared symbols",
                        symbol.0,
                        alphabet.len()
                    )));
                }
            }
            outgoing[transition.from.0].push(idx);
        }

        Ok(NFA {
            states,
            alphabet,
            initial,
            finals,
            transitions,
            outgoing,
        })
    }

    pub fn get_states(&self) -> &IndexSet<String> {
        &self.states
    }

    pub fn get_alphabet(&self) -> &IndexSet<String> {
        &self.alphabet
    }

    pub fn get_initial(&self) -> StateId {
        self.initial
    }

    pub fn get_finals(&self) -> &StateSet {
        &self.finals
    }

    pub fn get_transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn get_transitions_from_state(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.outgoing
            .get(state.0)
            .into_iter()
            .flatten()
            .map(|idx| &self.transitions[*idx])
    }

    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.states.get_index_of(label).map(StateId)
    }

    pub fn symbol_id(&self, label: &str) -> Option<SymbolId> {
        self.alphabet.get_index_of(label).map(SymbolId)
    }

    pub fn state_label(&self, state: StateId) -> &str {
        self.states[state.0].as_str()
    }

    pub fn symbol_label(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Epsilon => EPSILON_DISPLAY,
            Symbol::Input(id) => self.alphabet[id.0].as_str(),
        }
    }

    /// Alphabet symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.alphabet.len()).map(SymbolId)
    }

    pub fn labels_of(&self, states: &StateSet) -> Vec<&str> {
        states.iter().map(|s| self.state_label(*s)).collect()
    }

    pub fn is_accepting(&self, states: &StateSet) -> bool {
        !states.is_disjoint(&self.finals)
    }

    pub fn get_accepting_labels(&self) -> Vec<&str> {
        self.labels_of(&self.finals)
    }

    pub fn get_alphabet_labels(&self) -> Vec<&str> {
        self.alphabet.iter().map(String::as_str).collect()
    }

    pub fn get_state_labels(&self) -> Vec<&str> {
        self.states.iter().map(String::as_str).collect()
    }
}

impl NFA {
    /// Smallest superset of `states` closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for transition in self.get_transitions_from_state(state) {
                if transition.symbol != Symbol::Epsilon {
                    continue;
                }
                if closure.insert(transition.to) {
                    stack.push(transition.to);
                }
            }
        }

        closure
    }

    /// States reachable from `states` by exactly one `symbol` transition. No
    /// epsilon closure is applied.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut destinations = StateSet::new();
        for state in states.iter() {
            for transition in self.get_transitions_from_state(*state) {
                if transition.symbol == symbol {
                    destinations.insert(transition.to);
                }
            }
        }
        destinations
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::ArbitraryDescription;
    use super::*;
    use crate::error_handling::Error;
    use crate::parser::parse;
    use quickcheck_macros::quickcheck;

    fn set_of(nfa: &NFA, labels: &[&str]) -> StateSet {
        labels.iter().map(|l| nfa.state_id(l).unwrap()).collect()
    }

    #[test]
    fn test_epsilon_closure() -> Result<()> {
        let nfa = parse("Q:{0,1,2,3}\nL:{a}\ni:0\nA:{3}\nW:{(0;1;e),(1;2;e),(2;0;e),(2;3;a)}")?;

        let closure = nfa.epsilon_closure(&set_of(&nfa, &["0"]));
        assert_eq!(nfa.labels_of(&closure), vec!["0", "1", "2"]);

        let closure = nfa.epsilon_closure(&set_of(&nfa, &["3"]));
        assert_eq!(nfa.labels_of(&closure), vec!["3"]);

        assert!(nfa.epsilon_closure(&StateSet::new()).is_empty());
        Ok(())
    }

    #[test]
    fn test_epsilon_closure_of_single_epsilon_edge() -> Result<()> {
        let nfa = parse("Q:{0,1}\nL:{a}\ni:0\nA:{1}\nW:{(0;1;e)}")?;
        let closure = nfa.epsilon_closure(&set_of(&nfa, &["0"]));
        assert_eq!(nfa.labels_of(&closure), vec!["0", "1"]);
        Ok(())
    }

    #[test]
    fn test_move_does_not_follow_epsilon() -> Result<()> {
        let nfa = parse("Q:{0,1,2,3}\nL:{a,b}\ni:0\nA:{3}\nW:{(0;1;a),(0;2;a),(1;3;e),(2;2;b)}")?;
        let a = Symbol::Input(nfa.symbol_id("a").unwrap());
        let b = Symbol::Input(nfa.symbol_id("b").unwrap());

        let moved = nfa.move_on_symbol(&set_of(&nfa, &["0"]), a);
        assert_eq!(nfa.labels_of(&moved), vec!["1", "2"]);

        let moved = nfa.move_on_symbol(&set_of(&nfa, &["0", "2"]), b);
        assert_eq!(nfa.labels_of(&moved), vec!["2"]);

        assert!(nfa.move_on_symbol(&set_of(&nfa, &["3"]), a).is_empty());
        Ok(())
    }

    #[test]
    fn test_closure_keeps_declaration_order() -> Result<()> {
        let nfa = parse("Q:{q2,q10,q1}\nL:{x}\ni:q10\nA:{q1}\nW:{(q10;q1;e),(q1;q2;e)}")?;
        let closure = nfa.epsilon_closure(&set_of(&nfa, &["q10"]));
        assert_eq!(nfa.labels_of(&closure), vec!["q2", "q10", "q1"]);
        Ok(())
    }

    #[test]
    fn test_overview_groups() -> Result<()> {
        let nfa = parse("Q:{0,1,2}\nL:{a,b}\ni:0\nA:{2}\nW:{(0;1;a),(1;2;b),(0;0;b)}")?;
        assert_eq!(nfa.get_accepting_labels(), vec!["2"]);
        assert_eq!(nfa.get_alphabet_labels(), vec!["a", "b"]);
        assert_eq!(nfa.get_state_labels(), vec!["0", "1", "2"]);
        assert_eq!(nfa.state_label(nfa.get_initial()), "0");
        assert_eq!(nfa.get_transitions().len(), 3);
        assert_eq!(nfa.symbol_label(Symbol::Epsilon), EPSILON_DISPLAY);
        Ok(())
    }

    #[test]
    fn test_out_of_range_ids_are_rejected() {
        let states: IndexSet<String> = ["0", "1"].into_iter().map(String::from).collect();
        let alphabet: IndexSet<String> = ["a"].into_iter().map(String::from).collect();
        let build = |initial: usize, finals: &[usize], transitions: Vec<Transition>| {
            NFA::new(
                states.clone(),
                alphabet.clone(),
                StateId(initial),
                finals.iter().map(|&s| StateId(s)).collect(),
                transitions,
            )
        };
        let a = Symbol::Input(SymbolId(0));

        assert!(build(0, &[1], vec![Transition::new(StateId(0), StateId(1), a)]).is_ok());

        let result = build(2, &[1], vec![]);
        assert!(matches!(result, Err(Error::MalformedDescription(_))));

        let result = build(0, &[5], vec![]);
        assert!(matches!(result, Err(Error::MalformedDescription(_))));

        let result = build(0, &[1], vec![Transition::new(StateId(7), StateId(1), a)]);
        assert!(matches!(result, Err(Error::MalformedDescription(_))));

        let result = build(0, &[1], vec![Transition::new(StateId(0), StateId(7), a)]);
        assert!(matches!(result, Err(Error::MalformedDescription(_))));

        let b = Symbol::Input(SymbolId(1));
        let result = build(0, &[1], vec![Transition::new(StateId(0), StateId(1), b)]);
        assert!(matches!(result, Err(Error::MalformedDescription(_))));
    }

    #[quickcheck]
    fn epsilon_closure_is_idempotent(description: ArbitraryDescription, seeds: Vec<usize>) -> bool {
        let nfa = parse(&description.0).unwrap();
        let num_states = nfa.get_states().len();
        let seed: StateSet = seeds.iter().map(|s| StateId(s % num_states)).collect();

        let once = nfa.epsilon_closure(&seed);
        let twice = nfa.epsilon_closure(&once);
        once == twice && seed.is_subset(&once)
    }
}
