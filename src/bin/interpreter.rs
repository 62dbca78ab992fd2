use clap::{App, Arg};
use log::{debug, error, info};
use std::fs::File;
use std::io;

use tape_press::interpreter::BoundedInterpreter;
use tape_press::machine_parser::{self, InputError, ParsingError};

#[derive(Debug)]
enum ErrorType {
    IO(io::Error),
    Parsing(ParsingError),
    Input(InputError),
    InvalidStepBound(String),
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

impl From<InputError> for ErrorType {
    fn from(err: InputError) -> Self {
        ErrorType::Input(err)
    }
}

fn run(machine_path: &str, steps: &str) -> Result<bool, ErrorType> {
    let max_steps = steps
        .parse::<usize>()
        .map_err(|_| ErrorType::InvalidStepBound(steps.to_string()))?;

    debug!("Parsing {} ...", machine_path);
    let machine_file = File::open(machine_path)?;
    let table = machine_parser::parse_single_tape(machine_file)?;

    // The input word is a single line of digits on stdin
    let mut word_line = String::new();
    io::stdin().read_line(&mut word_line)?;
    let word = machine_parser::parse_input_word(&word_line)?;

    debug!("Execution start ...");
    let result = BoundedInterpreter::new(&table, max_steps).run(&word);
    info!(
        "run ended: {:?} after {} steps, {} configurations expanded",
        result.outcome, result.num_steps, result.explored
    );
    Ok(result.outcome.is_accepting())
}

fn handle_and_get_exit_code(res: Result<bool, ErrorType>) -> i32 {
    match res {
        Ok(accepting) => {
            if accepting {
                println!("YES");
            } else {
                println!("NO");
            }
            0
        }
        Err(ErrorType::Parsing(e)) => {
            error!("invalid transition line: {:?}", e);
            2
        }
        Err(ErrorType::Input(e)) => {
            error!("invalid input word, alphabet is {{1..9}}: {:?}", e);
            2
        }
        Err(ErrorType::InvalidStepBound(s)) => {
            error!("step bound must be a nonnegative integer, got {:?}", s);
            2
        }
        Err(ErrorType::IO(e)) => {
            error!("IO({:?})", e);
            3
        }
    }
}

fn main() {
    let matches = App::new("interpreter")
        .version("0.1")
        .about("Decide whether a nondeterministic Turing machine accepts a word within a step bound")
        .arg(
            Arg::with_name("machine")
                .required(true)
                .index(1)
                .value_name("FILE")
                .help("The transition table of the machine, one transition per line"),
        )
        .arg(
            Arg::with_name("steps")
                .required(true)
                .index(2)
                .value_name("STEPS")
                .help("Maximum number of steps to explore before rejecting"),
        )
        .get_matches();

    // Initialize the logger
    env_logger::init();

    // Both args are required, so they must be present
    let machine_path = matches.value_of("machine").unwrap();
    let steps = matches.value_of("steps").unwrap();

    std::process::exit(handle_and_get_exit_code(run(machine_path, steps)));
}
