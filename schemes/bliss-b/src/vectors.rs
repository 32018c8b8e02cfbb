//! Plain-text vector I/O.
//!
//! Vectors are written as decimal integers separated by single spaces,
//! one vector per line, and read back as whitespace-separated tokens
//! regardless of how they are split across lines.

use std::fmt::{self, Display};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Error reading a vector from a text stream.
#[derive(Debug)]
pub enum VectorError {
    /// A token did not parse as the expected integer type.
    Malformed {
        /// Name of the vector being read.
        component: &'static str,
        /// Position of the bad token within the vector.
        index: usize,
        /// The offending token.
        token: String,
    },
    /// The stream ended before the vector was complete.
    Truncated {
        /// Name of the vector being read.
        component: &'static str,
        /// Number of elements requested.
        expected: usize,
        /// Number of elements read before end of input.
        found: usize,
    },
    /// The underlying reader failed.
    Io(io::Error),
}

impl Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::Malformed { component, index, token } => {
                write!(f, "malformed {}[{}]: {:?} is not an integer", component, index, token)
            }
            VectorError::Truncated { component, expected, found } => {
                write!(f, "{}: expected {} values, input ended after {}", component, expected, found)
            }
            VectorError::Io(e) => write!(f, "read error: {}", e),
        }
    }
}

impl std::error::Error for VectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VectorError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VectorError {
    fn from(e: io::Error) -> Self {
        VectorError::Io(e)
    }
}

/// Renders a vector as space-separated decimals followed by a newline.
pub fn render<T: Display>(values: &[T]) -> String {
    let mut out = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push('\n');
    out
}

/// Writes [`render`] output to `w`.
pub fn write_vector<W: Write, T: Display>(w: &mut W, values: &[T]) -> io::Result<()> {
    w.write_all(render(values).as_bytes())
}

/// Pulls whitespace-separated tokens from a buffered reader one line at a
/// time, so interactive input is consumed only as far as needed.
pub struct TokenReader<R> {
    reader: R,
    pending: Vec<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            pending: Vec::new(),
        }
    }

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
    }

    /// Reads exactly `count` values; `component` names the vector in errors.
    pub fn read_vector<T: FromStr>(
        &mut self,
        count: usize,
        component: &'static str,
    ) -> Result<Vec<T>, VectorError> {
        let mut values = Vec::with_capacity(count);
        for index in 0..count {
            let token = self.next_token()?.ok_or(VectorError::Truncated {
                component,
                expected: count,
                found: index,
            })?;
            match token.parse::<T>() {
                Ok(v) => values.push(v),
                Err(_) => return Err(VectorError::Malformed { component, index, token }),
            }
        }
        Ok(values)
    }
}
