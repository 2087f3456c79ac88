use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReferenceKind {
    State,
    Symbol,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::State => write!(f, "state"),
            ReferenceKind::Symbol => write!(f, "symbol"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed automaton description: {0}")]
    MalformedDescription(String),
    #[error("subset construction needs more than {0} state names")]
    CapacityExceeded(usize),
    #[error("reference to undeclared {kind} `{token}`")]
    UnknownSymbolReference { kind: ReferenceKind, token: String },
    #[error("unsupported input file `{0}`: only .txt files are accepted")]
    UnsupportedFileType(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    YamlParsingError(#[from] serde_yaml::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
