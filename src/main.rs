use nfa2dfa::converter::Converter;
use nfa2dfa::error_handling::Result;
use nfa2dfa::parser::ConverterConfig;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process::exit;

fn cli() -> Command {
    Command::new("nfa2dfa")
        .version(nfa2dfa::version())
        .about("Converts an epsilon-NFA description into an equivalent DFA")
        .arg(
            Arg::new("input")
                .help("Path to the automaton description (.txt)")
                .required(true)
                .value_name("INPUT_FILE"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a YAML converter config")
                .value_name("CONFIG_FILE"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the DFA description here instead of stdout")
                .value_name("OUTPUT_FILE"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .short('t')
                .help("Also print the DFA transition table")
                .action(ArgAction::SetTrue),
        )
}

fn run(matches: &ArgMatches, input_path: &str) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(config_path) => ConverterConfig::parse_from_file(config_path)?,
        None => ConverterConfig::default(),
    };
    let converter = Converter::new(config);
    let conversion = converter.convert_file(input_path)?;

    if matches.get_flag("table") {
        print!("{}", conversion.get_table());
    }

    match matches.get_one::<String>("output") {
        Some(output_path) => {
            std::fs::write(output_path, format!("{}\n", conversion.get_text()))?;
            log::info!("Wrote DFA description to {}", output_path);
        }
        None => println!("{}", conversion.get_text()),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();
    let input_path = matches
        .get_one::<String>("input")
        .expect("no input file found");
    if let Err(err) = run(&matches, input_path) {
        log::error!("Error: {}", err);
        eprintln!("nfa2dfa: {}", err);
        exit(1);
    }
}
