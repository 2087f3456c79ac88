pub(crate) mod dfa;

pub use dfa::Row;
pub use dfa::State;
pub use dfa::DFA;
