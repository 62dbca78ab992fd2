use clap::{App, Arg};
use log::{debug, error, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use tape_press::machine_parser::{self, ParsingError};
use tape_press::translator;

#[derive(Debug)]
enum ErrorType {
    IO(io::Error),
    Parsing(ParsingError),
}

impl From<io::Error> for ErrorType {
    fn from(err: io::Error) -> Self {
        ErrorType::IO(err)
    }
}

impl From<ParsingError> for ErrorType {
    fn from(err: ParsingError) -> Self {
        ErrorType::Parsing(err)
    }
}

fn run(machine_path: &str) -> Result<(), ErrorType> {
    debug!("Parsing {} ...", machine_path);
    let machine_file = File::open(machine_path)?;
    let table = machine_parser::parse_two_tape(machine_file)?;

    debug!("Translating ...");
    let translated = translator::translate(&table);
    info!(
        "translated {} two-tape transitions into {} single-tape transitions",
        table.len(),
        translated.len()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    translator::write_transitions(&translated, &mut out)?;
    out.flush()?;
    Ok(())
}

fn handle_and_get_exit_code(res: Result<(), ErrorType>) -> i32 {
    match res {
        Ok(()) => 0,
        Err(ErrorType::Parsing(e)) => {
            error!("invalid transition line: {:?}", e);
            2
        }
        Err(ErrorType::IO(e)) => {
            error!("IO({:?})", e);
            3
        }
    }
}

fn main() {
    let matches = App::new("translate")
        .version("0.1")
        .about("Compile a two-tape nondeterministic Turing machine into a single-tape one")
        .arg(
            Arg::with_name("machine")
                .required(true)
                .index(1)
                .value_name("FILE")
                .help("The two-tape transition table, one transition per line"),
        )
        .get_matches();

    // Initialize the logger
    env_logger::init();

    // Path is required, so it must be present
    let machine_path = matches.value_of("machine").unwrap();

    std::process::exit(handle_and_get_exit_code(run(machine_path)));
}
