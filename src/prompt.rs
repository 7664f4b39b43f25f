//! Interactive console input for the five-objective scenario

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use questpath_graph::{AttributeTriple, Scenario};

/// Reads whitespace-separated integers from `input`, prompting on `output`.
///
/// Values may be spread over any number of lines. A token that is not an
/// integer is reported and skipped.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Ask for the attributes and route costs of the fixed scenario.
    pub fn five_objectives(&mut self) -> Result<Scenario> {
        let a = self.attributes("first")?;
        let b = self.attributes("second")?;
        let c = self.attributes("third")?;
        let goal = self.attributes("final")?;

        writeln!(self.output, "Enter edge costs: ")?;
        let costs = [
            self.cost("Cost from Start to A")?,
            self.cost("Cost from Start to B")?,
            self.cost("Cost from B to C")?,
            self.cost("Cost from A to Goal")?,
            self.cost("Cost from C to Goal")?,
        ];

        Ok(Scenario::five_objectives(a, b, c, goal, costs))
    }

    fn attributes(&mut self, ordinal: &str) -> Result<AttributeTriple> {
        self.ask(&format!("Enter values for the {} objective (1-10): ", ordinal))?;
        Ok((self.next_int()?, self.next_int()?, self.next_int()?))
    }

    fn cost(&mut self, label: &str) -> Result<i64> {
        self.ask(&format!("{} (1-10): ", label))?;
        self.next_int()
    }

    fn ask(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn next_int<T: std::str::FromStr>(&mut self) -> Result<T> {
        loop {
            let Some(token) = self.next_token()? else {
                bail!("Unexpected end of input");
            };
            match token.parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    write!(self.output, "Not a whole number: '{}', try again: ", token)?;
                    self.output.flush()?;
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read from console")?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
