use crate::converter::DfaTable;
use crate::dfa::DFA;
use crate::error_handling::Error::UnsupportedFileType;
use crate::error_handling::Result;
use crate::nfa::NFA;
use crate::parser::ConverterConfig;
use crate::serializer::serialize;

/// Runs parse, subset construction and serialization for one description.
/// Holds no state besides its configuration, so one converter can be reused
/// for any number of inputs.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    config: ConverterConfig,
}

/// Everything derived from one input description.
#[derive(Clone, Debug)]
pub struct Conversion {
    nfa: NFA,
    dfa: DFA,
    table: DfaTable,
    text: String,
}

impl Conversion {
    pub fn get_nfa(&self) -> &NFA {
        &self.nfa
    }

    pub fn get_dfa(&self) -> &DFA {
        &self.dfa
    }

    pub fn get_table(&self) -> &DfaTable {
        &self.table
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }
}

impl Converter {
    const ACCEPTED_SUFFIX: &'static str = ".txt";

    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn get_config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn convert_file(&self, path: &str) -> Result<Conversion> {
        // A bare `.txt` file name is accepted too.
        if !path.ends_with(Self::ACCEPTED_SUFFIX) {
            return Err(UnsupportedFileType(path.to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let conversion = self.convert_str(&contents)?;
        log::info!(
            "Converted {}: {} NFA states -> {} DFA states",
            path,
            conversion.nfa.get_states().len(),
            conversion.dfa.get_rows().len()
        );
        Ok(conversion)
    }

    pub fn convert_str(&self, description: &str) -> Result<Conversion> {
        let nfa = self.config.notation_parser().parse(description)?;
        let dfa = DFA::from_nfa(&nfa, self.config.get_naming())?;
        let table = DfaTable::new(&nfa, &dfa, self.config.get_label_order());
        let text = serialize(&dfa, nfa.get_alphabet());

        Ok(Conversion {
            nfa,
            dfa,
            table,
            text,
        })
    }
}
