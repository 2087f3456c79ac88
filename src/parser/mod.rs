mod config_parser;
mod notation_parser;

pub use config_parser::parser::ConverterConfig;
pub use config_parser::parser::LabelOrder;
pub use config_parser::parser::NamingScheme;
pub use notation_parser::parser::parse;
pub use notation_parser::parser::NotationParser;
