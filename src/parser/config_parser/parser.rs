use crate::error_handling::Error::{IOError, InvalidConfig, YamlParsingError};
use crate::error_handling::Result;
use crate::parser::NotationParser;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::cmp::Ordering;
use std::io::Read;

/// How DFA states are named, in discovery order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NamingScheme {
    /// `A` to `Z`; a 27th state is a capacity error.
    Letters,
    /// `A` to `Z`, then `AA`, `AB`, ... like spreadsheet columns.
    #[default]
    Spreadsheet,
    /// `0`, `1`, `2`, ...
    Numeric,
}

impl NamingScheme {
    const LETTERS: usize = 26;

    pub fn capacity(&self) -> Option<usize> {
        match self {
            NamingScheme::Letters => Some(Self::LETTERS),
            NamingScheme::Spreadsheet | NamingScheme::Numeric => None,
        }
    }

    /// Name of the `idx`-th discovered state, or `None` past the capacity.
    pub fn name(&self, idx: usize) -> Option<String> {
        match self {
            NamingScheme::Letters => {
                if idx < Self::LETTERS {
                    Some(Self::letter(idx).to_string())
                } else {
                    None
                }
            }
            NamingScheme::Spreadsheet => {
                let mut name = Vec::new();
                let mut n = idx + 1;
                while n > 0 {
                    n -= 1;
                    name.push(Self::letter(n % Self::LETTERS));
                    n /= Self::LETTERS;
                }
                Some(name.into_iter().rev().collect())
            }
            NamingScheme::Numeric => Some(idx.to_string()),
        }
    }

    fn letter(idx: usize) -> char {
        (b'A' + idx as u8) as char
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "letters" => Some(NamingScheme::Letters),
            "spreadsheet" => Some(NamingScheme::Spreadsheet),
            "numeric" => Some(NamingScheme::Numeric),
            _ => None,
        }
    }
}

/// Order in which the members of a composite state are listed for display.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LabelOrder {
    #[default]
    Declaration,
    Lexicographic,
    /// Integer labels by value, then the remaining labels lexicographically.
    Numeric,
}

impl LabelOrder {
    pub fn sort(&self, labels: &mut [&str]) {
        match self {
            LabelOrder::Declaration => {}
            LabelOrder::Lexicographic => labels.sort(),
            LabelOrder::Numeric => labels.sort_by(|lhs, rhs| Self::compare_numeric(lhs, rhs)),
        }
    }

    fn compare_numeric(lhs: &str, rhs: &str) -> Ordering {
        match (lhs.parse::<i64>(), rhs.parse::<i64>()) {
            (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => lhs.cmp(rhs),
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "declaration" => Some(LabelOrder::Declaration),
            "lexicographic" => Some(LabelOrder::Lexicographic),
            "numeric" => Some(LabelOrder::Numeric),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConverterConfig {
    epsilon_marker: String,
    naming: NamingScheme,
    label_order: LabelOrder,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            epsilon_marker: NotationParser::DEFAULT_EPSILON_MARKER.to_string(),
            naming: NamingScheme::default(),
            label_order: LabelOrder::default(),
        }
    }
}

impl ConverterConfig {
    pub fn new(epsilon_marker: &str, naming: NamingScheme, label_order: LabelOrder) -> Result<Self> {
        Self::validate_epsilon_marker(epsilon_marker)?;
        Ok(Self {
            epsilon_marker: epsilon_marker.to_string(),
            naming,
            label_order,
        })
    }

    pub fn get_epsilon_marker(&self) -> &str {
        &self.epsilon_marker
    }

    pub fn get_naming(&self) -> NamingScheme {
        self.naming
    }

    pub fn get_label_order(&self) -> LabelOrder {
        self.label_order
    }

    pub fn notation_parser(&self) -> NotationParser {
        NotationParser::with_epsilon_marker(&self.epsilon_marker)
    }
}

impl ConverterConfig {
    const EPSILON_KEY: &'static str = "epsilon";
    const NAMING_KEY: &'static str = "naming";
    const LABEL_ORDER_KEY: &'static str = "label_order";
    const RESERVED_CHARS: [char; 6] = ['{', '}', '(', ')', ';', ','];

    pub fn parse_from_file(yaml_file_path: &str) -> Result<ConverterConfig> {
        match std::fs::File::open(yaml_file_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    return Err(IOError(e));
                }
                Self::parse_from_str(contents.as_str())
            }
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<ConverterConfig> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn get_string_value<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
        match value {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(InvalidConfig(format!("`{}` must be a string", key))),
        }
    }

    fn validate_epsilon_marker(marker: &str) -> Result<()> {
        if marker.trim().is_empty() || marker.trim() != marker {
            return Err(InvalidConfig(
                "epsilon marker must be non-empty without surrounding whitespace".to_string(),
            ));
        }
        if marker.contains(Self::RESERVED_CHARS) {
            return Err(InvalidConfig(format!(
                "epsilon marker `{}` contains a reserved character",
                marker
            )));
        }
        Ok(())
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in kv_pairs.iter() {
            match key.as_str() {
                Self::EPSILON_KEY => {
                    let marker = Self::get_string_value(key, value)?;
                    Self::validate_epsilon_marker(marker)?;
                    config.epsilon_marker = marker.to_string();
                }
                Self::NAMING_KEY => {
                    let naming = Self::get_string_value(key, value)?;
                    config.naming = NamingScheme::from_key(naming).ok_or_else(|| {
                        InvalidConfig(format!("unknown naming scheme `{}`", naming))
                    })?;
                }
                Self::LABEL_ORDER_KEY => {
                    let order = Self::get_string_value(key, value)?;
                    config.label_order = LabelOrder::from_key(order).ok_or_else(|| {
                        InvalidConfig(format!("unknown label order `{}`", order))
                    })?;
                }
                _ => return Err(InvalidConfig(format!("unknown key `{}`", key))),
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    #[test]
    fn test_read_example_config_file() -> Result<()> {
        let project_root = env!("CARGO_MANIFEST_DIR");
        let config_path = std::path::Path::new(project_root)
            .join("tests")
            .join("data")
            .join("config.yaml");
        let config = ConverterConfig::parse_from_file(config_path.to_str().unwrap())?;

        assert_eq!(config.get_epsilon_marker(), "eps");
        assert_eq!(config.get_naming(), NamingScheme::Letters);
        assert_eq!(config.get_label_order(), LabelOrder::Numeric);
        Ok(())
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = ConverterConfig::parse_from_str("")?;
        assert_eq!(config, ConverterConfig::default());

        let config = ConverterConfig::parse_from_str("naming: numeric\n")?;
        assert_eq!(config.get_epsilon_marker(), "e");
        assert_eq!(config.get_naming(), NamingScheme::Numeric);
        assert_eq!(config.get_label_order(), LabelOrder::Declaration);
        Ok(())
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            ConverterConfig::parse_from_str("naming: roman\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ConverterConfig::parse_from_str("colour: blue\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ConverterConfig::parse_from_str("epsilon: 3\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ConverterConfig::parse_from_str("epsilon: \"a;b\"\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ConverterConfig::parse_from_str("naming: [letters\n"),
            Err(Error::YamlParsingError(_))
        ));
        assert!(matches!(
            ConverterConfig::parse_from_file("/nonexistent/config.yaml"),
            Err(Error::IOError(_))
        ));
    }

    #[test]
    fn test_naming_schemes() {
        assert_eq!(NamingScheme::Letters.name(0).as_deref(), Some("A"));
        assert_eq!(NamingScheme::Letters.name(25).as_deref(), Some("Z"));
        assert_eq!(NamingScheme::Letters.name(26), None);

        assert_eq!(NamingScheme::Spreadsheet.name(0).as_deref(), Some("A"));
        assert_eq!(NamingScheme::Spreadsheet.name(25).as_deref(), Some("Z"));
        assert_eq!(NamingScheme::Spreadsheet.name(26).as_deref(), Some("AA"));
        assert_eq!(NamingScheme::Spreadsheet.name(27).as_deref(), Some("AB"));
        assert_eq!(NamingScheme::Spreadsheet.name(51).as_deref(), Some("AZ"));
        assert_eq!(NamingScheme::Spreadsheet.name(52).as_deref(), Some("BA"));
        assert_eq!(NamingScheme::Spreadsheet.name(701).as_deref(), Some("ZZ"));
        assert_eq!(NamingScheme::Spreadsheet.name(702).as_deref(), Some("AAA"));

        assert_eq!(NamingScheme::Numeric.name(12).as_deref(), Some("12"));
        assert_eq!(NamingScheme::Letters.capacity(), Some(26));
        assert_eq!(NamingScheme::Spreadsheet.capacity(), None);
    }

    #[test]
    fn test_label_orders() {
        let mut labels = vec!["10", "q0", "2", "1"];
        LabelOrder::Numeric.sort(&mut labels);
        assert_eq!(labels, vec!["1", "2", "10", "q0"]);

        let mut labels = vec!["10", "q0", "2", "1"];
        LabelOrder::Lexicographic.sort(&mut labels);
        assert_eq!(labels, vec!["1", "10", "2", "q0"]);

        let mut labels = vec!["10", "q0", "2", "1"];
        LabelOrder::Declaration.sort(&mut labels);
        assert_eq!(labels, vec!["10", "q0", "2", "1"]);
    }
}
