use crate::dfa::{Row, DFA};
use indexmap::IndexSet;

/// Renders `dfa` in the same five-line notation the parser reads. Undefined
/// transitions produce no `W` tuple.
///
/// The output re-parses with the epsilon marker the input was read with. An
/// alphabet symbol that equals the default marker `e` is only legal when a
/// different marker was configured, so such output does not re-parse with
/// [`crate::parser::parse`].
pub fn serialize(dfa: &DFA, alphabet: &IndexSet<String>) -> String {
    let states: Vec<&str> = dfa.get_rows().iter().map(Row::get_name).collect();
    let symbols: Vec<&str> = alphabet.iter().map(String::as_str).collect();
    let accepting: Vec<&str> = dfa
        .get_rows()
        .iter()
        .filter(|row| row.is_accepting())
        .map(Row::get_name)
        .collect();

    let mut transitions = Vec::new();
    for row in dfa.get_rows() {
        for (symbol, destination) in symbols.iter().zip(row.get_transitions()) {
            if let Some(destination) = destination {
                transitions.push(format!(
                    "({};{};{})",
                    row.get_name(),
                    dfa.get_name(*destination),
                    symbol
                ));
            }
        }
    }

    [
        format!("Q:{{{}}}", states.join(",")),
        format!("L:{{{}}}", symbols.join(",")),
        format!("i:{}", dfa.get_name(dfa.get_root())),
        format!("A:{{{}}}", accepting.join(",")),
        format!("W:{{{}}}", transitions.join(",")),
    ]
    .join("\n")
}
