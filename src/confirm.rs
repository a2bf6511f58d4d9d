//! Yes/no confirmation before overwriting the stored modes.

use crate::Result;
use std::io::{self, BufRead, Write};

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Confirmation::Confirmed
    }
}

/// Interpret a line typed at the prompt.
///
/// Only `y` and `yes` (any case, surrounding whitespace ignored) confirm.
pub fn parse_answer(input: &str) -> Confirmation {
    let answer = input.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Confirmation::Confirmed
    } else {
        Confirmation::Cancelled
    }
}

/// Guards destructive writes behind a single yes/no question.
///
/// With `assume_yes` set the question is never asked and the answer is
/// [`Confirmation::Confirmed`].
pub struct ConfirmationGate<R, W> {
    assume_yes: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(assume_yes: bool, input: R, output: W) -> Self {
        Self {
            assume_yes,
            input,
            output,
        }
    }

    /// Ask `question` and block until one line of input arrives.
    ///
    /// End of input and answers that are not UTF-8 count as a refusal.
    pub fn ask(&mut self, question: &str) -> Result<Confirmation> {
        if self.assume_yes {
            return Ok(Confirmation::Confirmed);
        }

        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;

        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;
        Ok(parse_answer(&String::from_utf8_lossy(&line)))
    }
}

impl ConfirmationGate<io::StdinLock<'static>, io::Stderr> {
    /// Gate reading from stdin and prompting on stderr, keeping stdout clean
    /// for command output.
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(assume_yes, io::stdin().lock(), io::stderr())
    }
}
