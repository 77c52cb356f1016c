//! Operator I/O for one console session.

use std::io::{self, BufRead, Write};

use toystore_core::DomainResult;

/// Input and output streams of the operator, passed to every flow.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Print `message` and read one line. `None` once input is exhausted.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt until `parse` accepts the answer, printing each rejection.
    pub fn prompt_until<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> DomainResult<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse(answer.trim()) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    for rule in e.violated_rules() {
                        self.say(format!("Invalid input: {rule}. Try again."))?;
                    }
                }
            }
        }
    }

    /// Ask a yes/no question until the answer is one of `y`/`n`.
    pub fn confirm(&mut self, message: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("Please answer Y or N.")?,
            }
        }
    }
}
