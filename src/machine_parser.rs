use std::io::{self, Read};

use crate::builders::TransitionTableBuilder;
use crate::common::{Motion, Symbol, BLANK};
use crate::transition_table::{Action, TransitionTable};
use crate::two_tape::{TwoTapeAction, TwoTapeTransitionTable};

/// A error type for errors returned by the description parsers.
/// Each variant expresses a particular error type and can be used to
/// diagnose format mistakes
#[derive(Debug)]
pub enum ParsingError {
    /// A line did not have exactly five (single-tape) or eight (two-tape)
    /// whitespace-separated fields
    InvalidNumberOfTokens(usize),

    /// A symbol field did not parse as a nonnegative integer
    InvalidSymbol(String),

    /// A direction field was not one of `L`, `R`, `S`
    InvalidMotion(String),

    /// Error encountered in interacting with `io`
    IO(io::Error),
}

impl From<io::Error> for ParsingError {
    fn from(err: io::Error) -> Self {
        ParsingError::IO(err)
    }
}

/// An input word rejected before any run begins
#[derive(Debug)]
pub enum InputError {
    /// The word may only contain decimal digits
    NotADigit(char),

    /// `0` is the blank symbol and may not appear in an input word
    BlankInWord,
}

fn parse_symbol(token: &str) -> Result<Symbol, ParsingError> {
    token
        .parse::<Symbol>()
        .map_err(|_| ParsingError::InvalidSymbol(token.to_string()))
}

fn parse_motion(token: &str) -> Result<Motion, ParsingError> {
    match token {
        "R" => Ok(Motion::Right),
        "L" => Ok(Motion::Left),
        "S" => Ok(Motion::Stay),
        _ => Err(ParsingError::InvalidMotion(token.to_string())),
    }
}

/// Builder for the single-tape format:
/// `<state> <read> <next_state> <write> <direction>`
#[derive(Debug, Default)]
pub struct SingleTapeParser {
    table: TransitionTable<String>,
}

impl TransitionTableBuilder for SingleTapeParser {
    type Table = TransitionTable<String>;
    type ErrorTy = ParsingError;

    fn parse_line(&mut self, line: &str) -> Result<(), ParsingError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 5 {
            return Err(ParsingError::InvalidNumberOfTokens(tokens.len()));
        }

        let read = parse_symbol(tokens[1])?;
        let write = parse_symbol(tokens[3])?;
        let motion = parse_motion(tokens[4])?;

        self.table.insert(
            tokens[0].to_string(),
            read,
            Action::new(tokens[2].to_string(), write, motion),
        );
        Ok(())
    }

    fn into_table(self) -> Self::Table {
        self.table
    }
}

/// Builder for the two-tape format:
/// `<state> <read1> <read2> <next_state> <write1> <write2> <dir1> <dir2>`
#[derive(Debug, Default)]
pub struct TwoTapeParser {
    table: TwoTapeTransitionTable<String>,
}

impl TransitionTableBuilder for TwoTapeParser {
    type Table = TwoTapeTransitionTable<String>;
    type ErrorTy = ParsingError;

    fn parse_line(&mut self, line: &str) -> Result<(), ParsingError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 8 {
            return Err(ParsingError::InvalidNumberOfTokens(tokens.len()));
        }

        let read1 = parse_symbol(tokens[1])?;
        let read2 = parse_symbol(tokens[2])?;
        let write1 = parse_symbol(tokens[4])?;
        let write2 = parse_symbol(tokens[5])?;
        let motion1 = parse_motion(tokens[6])?;
        let motion2 = parse_motion(tokens[7])?;

        self.table.insert(
            tokens[0].to_string(),
            (read1, read2),
            TwoTapeAction::new(tokens[3].to_string(), (write1, write2), (motion1, motion2)),
        );
        Ok(())
    }

    fn into_table(self) -> Self::Table {
        self.table
    }
}

/// Parse a single-tape machine description
/// # Usage:
/// ```
/// use tape_press::machine_parser::parse_single_tape;
///
/// // Ideally this will be read from a file
/// let description = "start 1 accept 1 S\nstart 1 reject 1 S\n";
/// let table = parse_single_tape(description.as_bytes()).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub fn parse_single_tape(source: impl Read) -> Result<TransitionTable<String>, ParsingError> {
    let mut parser = SingleTapeParser::default();
    parser.build_from_reader(source)?;
    Ok(parser.into_table())
}

/// Parse a two-tape machine description
pub fn parse_two_tape(source: impl Read) -> Result<TwoTapeTransitionTable<String>, ParsingError> {
    let mut parser = TwoTapeParser::default();
    parser.build_from_reader(source)?;
    Ok(parser.into_table())
}

/// Parse an input word, one decimal digit per character. The word alphabet
/// is `{1..9}`: blanks cannot occur in an initial tape.
pub fn parse_input_word(line: &str) -> Result<Vec<Symbol>, InputError> {
    line.trim()
        .chars()
        .map(|c| match c.to_digit(10) {
            None => Err(InputError::NotADigit(c)),
            Some(BLANK) => Err(InputError::BlankInWord),
            Some(d) => Ok(d as Symbol),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Motion;

    #[test]
    fn valid_single_tape_description() {
        let description = "start 1 q1 2 R\nq1 0 accept 0 S\n";
        let table = parse_single_tape(description.as_bytes()).expect("parse should succeed");
        assert_eq!(table.len(), 2);

        let actions = table
            .apply_transition_table(&"start".to_string(), 1)
            .expect("start entry should exist");
        assert!(actions.contains(&Action::new("q1".to_string(), 2, Motion::Right)));
    }

    #[test]
    fn blank_lines_and_trailing_newline_are_tolerated() {
        let description = "start 1 accept 1 S\n\n\nstart 2 accept 2 S\n\n";
        let table = parse_single_tape(description.as_bytes()).expect("parse should succeed");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_lines_collapse() {
        let description = "start 1 accept 1 S\nstart 1 accept 1 S\n";
        let table = parse_single_tape(description.as_bytes()).expect("parse should succeed");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let description = "start 1 accept 1\n";
        match parse_single_tape(description.as_bytes()) {
            Err(ParsingError::InvalidNumberOfTokens(4)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn negative_symbol_is_an_error() {
        let description = "start -1 accept 1 S\n";
        match parse_single_tape(description.as_bytes()) {
            Err(ParsingError::InvalidSymbol(tok)) => assert_eq!(tok, "-1"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_motion_is_an_error() {
        let description = "start 1 accept 1 X\n";
        match parse_single_tape(description.as_bytes()) {
            Err(ParsingError::InvalidMotion(tok)) => assert_eq!(tok, "X"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn valid_two_tape_description() {
        let description = "start 1 0 accept 1 0 S S\n";
        let table = parse_two_tape(description.as_bytes()).expect("parse should succeed");
        assert_eq!(table.len(), 1);

        let actions = table
            .apply_transition_table(&"start".to_string(), (1, 0))
            .expect("start entry should exist");
        assert!(actions.contains(&TwoTapeAction::new(
            "accept".to_string(),
            (1, 0),
            (Motion::Stay, Motion::Stay)
        )));
    }

    #[test]
    fn two_tape_arity_mismatch_is_an_error() {
        let description = "start 1 0 accept 1 0 S\n";
        match parse_two_tape(description.as_bytes()) {
            Err(ParsingError::InvalidNumberOfTokens(7)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn input_word_parses_digits() {
        assert_eq!(parse_input_word("123\n").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_input_word("").unwrap(), Vec::<Symbol>::new());
    }

    #[test]
    fn input_word_rejects_blank() {
        match parse_input_word("102") {
            Err(InputError::BlankInWord) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn input_word_rejects_non_digit() {
        match parse_input_word("1a2") {
            Err(InputError::NotADigit('a')) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
