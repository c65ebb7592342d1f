use labkeep_core::Parameters;
use std::io::{BufRead, Write};

/// Line-oriented question/answer channel over any reader and writer.
pub struct Prompt<R, W> {
    input: R,
    pub out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `label` and read one line. `None` once input is exhausted.
    pub fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
        Ok(Some(trimmed.to_string()))
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> anyhow::Result<()> {
        writeln!(self.out, "{}", line.as_ref())?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Parse `learning_rate=0.01, epochs=10` into a parameter map.
///
/// Pieces without `=` are dropped; keys and values are trimmed and split at
/// the first `=`. Order of entry is kept; a repeated key keeps its first
/// position and its last value.
pub fn parse_parameters(input: &str) -> Parameters {
    input
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}
