use crate::error_handling::Error::{MalformedDescription, UnknownSymbolReference};
use crate::error_handling::{ReferenceKind, Result};
use crate::nfa::{StateId, StateSet, Symbol, SymbolId, Transition, NFA};
use indexmap::{IndexMap, IndexSet};

pub struct NotationParser {
    epsilon_marker: String,
}

impl Default for NotationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationParser {
    pub const DEFAULT_EPSILON_MARKER: &'static str = "e";

    const STATES_KEY: &'static str = "Q:";
    const ALPHABET_KEY: &'static str = "L:";
    const INITIAL_KEY: &'static str = "i:";
    const FINALS_KEY: &'static str = "A:";
    const TRANSITIONS_KEY: &'static str = "W:";
    const KEYS: [&'static str; 5] = [
        Self::STATES_KEY,
        Self::ALPHABET_KEY,
        Self::INITIAL_KEY,
        Self::FINALS_KEY,
        Self::TRANSITIONS_KEY,
    ];

    pub fn new() -> NotationParser {
        Self::with_epsilon_marker(Self::DEFAULT_EPSILON_MARKER)
    }

    pub fn with_epsilon_marker(epsilon_marker: &str) -> NotationParser {
        Self {
            epsilon_marker: epsilon_marker.to_string(),
        }
    }

    pub fn get_epsilon_marker(&self) -> &str {
        &self.epsilon_marker
    }

    pub fn parse(&self, text: &str) -> Result<NFA> {
        let sections = Self::split_into_sections(text)?;

        let states: IndexSet<String> = Self::bracketed_items(
            Self::STATES_KEY,
            Self::get_section(&sections, Self::STATES_KEY)?,
        )?
        .into_iter()
        .map(str::to_string)
        .collect();
        if states.is_empty() {
            return Err(MalformedDescription("no states declared".to_string()));
        }

        let alphabet: IndexSet<String> = Self::bracketed_items(
            Self::ALPHABET_KEY,
            Self::get_section(&sections, Self::ALPHABET_KEY)?,
        )?
        .into_iter()
        .map(str::to_string)
        .collect();
        if alphabet.contains(&self.epsilon_marker) {
            return Err(MalformedDescription(format!(
                "alphabet declares the epsilon marker `{}`",
                self.epsilon_marker
            )));
        }

        let initial = Self::get_section(&sections, Self::INITIAL_KEY)?.trim();
        if initial.is_empty() {
            return Err(MalformedDescription("no initial state declared".to_string()));
        }
        let initial = Self::resolve_state(&states, initial)?;

        let mut finals = StateSet::new();
        for label in Self::bracketed_items(
            Self::FINALS_KEY,
            Self::get_section(&sections, Self::FINALS_KEY)?,
        )? {
            finals.insert(Self::resolve_state(&states, label)?);
        }

        let mut transitions = Vec::new();
        for (from, to, symbol) in
            Self::transition_tuples(Self::get_section(&sections, Self::TRANSITIONS_KEY)?)?
        {
            transitions.push(Transition::new(
                Self::resolve_state(&states, &from)?,
                Self::resolve_state(&states, &to)?,
                self.resolve_symbol(&alphabet, &symbol)?,
            ));
        }

        log::debug!(
            "Parsed automaton: {} states, {} symbols, {} transitions",
            states.len(),
            alphabet.len(),
            transitions.len()
        );
        NFA::new(states, alphabet, initial, finals, transitions)
    }

    // Maps each section key to the text following it.
    fn split_into_sections(text: &str) -> Result<IndexMap<&'static str, &str>> {
        let mut sections = IndexMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let key = line
                .get(..2)
                .and_then(|prefix| Self::KEYS.into_iter().find(|key| *key == prefix));
            match key {
                Some(key) => {
                    if sections.insert(key, &line[2..]).is_some() {
                        return Err(MalformedDescription(format!(
                            "section `{}` declared more than once",
                            key
                        )));
                    }
                }
                None => log::warn!("Ignoring unrecognized line: {:?}", line),
            }
        }
        Ok(sections)
    }

    fn get_section<'a>(
        sections: &IndexMap<&'static str, &'a str>,
        key: &'static str,
    ) -> Result<&'a str> {
        sections
            .get(key)
            .copied()
            .ok_or_else(|| MalformedDescription(format!("missing section `{}`", key)))
    }

    fn bracketed_content<'a>(key: &'static str, content: &'a str) -> Result<&'a str> {
        let open = content.find('{');
        let close = open.and_then(|open| content[open + 1..].find('}').map(|i| open + 1 + i));
        match (open, close) {
            (Some(open), Some(close)) => Ok(&content[open + 1..close]),
            _ => Err(MalformedDescription(format!(
                "section `{}` has no `{{...}}` set",
                key
            ))),
        }
    }

    fn bracketed_items<'a>(key: &'static str, content: &'a str) -> Result<Vec<&'a str>> {
        Ok(Self::bracketed_content(key, content)?
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect())
    }

    fn transition_tuples(content: &str) -> Result<Vec<(String, String, String)>> {
        let content = Self::bracketed_content(Self::TRANSITIONS_KEY, content)?;
        let mut tuples = Vec::new();
        for fragment in content.split("),") {
            let fragment: String = fragment
                .chars()
                .filter(|c| !matches!(c, '(' | ')' | '{' | '}'))
                .collect();
            if fragment.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = fragment.split(';').map(str::trim).collect();
            match fields.as_slice() {
                [from, to, symbol] if !from.is_empty() && !to.is_empty() && !symbol.is_empty() => {
                    tuples.push((from.to_string(), to.to_string(), symbol.to_string()))
                }
                _ => {
                    return Err(MalformedDescription(format!(
                        "transition `({})` is not a `(from;to;symbol)` triple",
                        fragment.trim()
                    )))
                }
            }
        }
        Ok(tuples)
    }

    fn resolve_state(states: &IndexSet<String>, label: &str) -> Result<StateId> {
        states
            .get_index_of(label)
            .map(StateId)
            .ok_or_else(|| UnknownSymbolReference {
                kind: ReferenceKind::State,
                token: label.to_string(),
            })
    }

    fn resolve_symbol(&self, alphabet: &IndexSet<String>, label: &str) -> Result<Symbol> {
        if label == self.epsilon_marker {
            return Ok(Symbol::Epsilon);
        }
        alphabet
            .get_index_of(label)
            .map(|idx| Symbol::Input(SymbolId(idx)))
            .ok_or_else(|| UnknownSymbolReference {
                kind: ReferenceKind::Symbol,
                token: label.to_string(),
            })
    }
}

/// Parses a description using the default epsilon marker.
pub fn parse(text: &str) -> Result<NFA> {
    NotationParser::new().parse(text)
}
