pub mod converter;
pub mod dfa;
pub mod error_handling;
pub mod nfa;
pub mod parser;
pub mod serializer;

const VERSION: &str = "0.0.1";

pub fn version() -> &'static str {
    VERSION
}
