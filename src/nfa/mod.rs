pub(crate) mod nfa;

pub use crate::nfa::nfa::StateId;
pub use crate::nfa::nfa::StateSet;
pub use crate::nfa::nfa::Symbol;
pub use crate::nfa::nfa::SymbolId;
pub use crate::nfa::nfa::Transition;
pub use crate::nfa::nfa::EPSILON_DISPLAY;
pub use crate::nfa::nfa::NFA;

#[cfg(test)]
pub(crate) use crate::nfa::nfa::test_utils;
