use std::io::{BufRead, BufReader, Read};

/// A trait to generally build a transition table out of a line-oriented
/// description. Both file formats (five fields per line for single-tape,
/// eight for two-tape) share the reading loop; only `parse_line` differs.
pub trait TransitionTableBuilder {
    /// The finished table type
    type Table;
    type ErrorTy: From<std::io::Error>;

    /// Parse a single non-empty description line into the table under
    /// construction
    fn parse_line(&mut self, line: &str) -> Result<(), Self::ErrorTy>;

    /// Consume the builder, yielding the table built so far
    fn into_table(self) -> Self::Table;

    /// Feed every non-blank line to [`parse_line`](#tymethod.parse_line).
    /// Blank lines (and hence a trailing newline) are tolerated.
    fn build_from_lines(
        &mut self,
        lines: impl Iterator<Item = String>,
    ) -> Result<(), Self::ErrorTy> {
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            self.parse_line(&line)?;
        }
        Ok(())
    }

    fn build_from_reader(&mut self, reader: impl Read) -> Result<(), Self::ErrorTy> {
        let r = BufReader::new(reader);
        for line in r.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            self.parse_line(&line)?;
        }
        Ok(())
    }
}
