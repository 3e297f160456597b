//! I/O seam for the `console` built-ins.
//!
//! The interpreter never touches stdin/stdout directly. [`StdConsole`] binds
//! the built-ins to the process streams; [`BufferConsole`] scripts input and
//! captures output for tests and benchmarks.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use ccolon_syntax::error::{Error, Result};

pub trait Console {
    /// Writes `text` as-is and makes it visible before any following read.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.write(line)?;
        self.write("\n")
    }

    /// Reads one line without its trailing newline; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Reports a non-fatal diagnostic.
    fn warn(&mut self, msg: &str);
}

impl<C: Console + ?Sized> Console for &mut C {
    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
    fn read_line(&mut self) -> Result<Option<String>> {
        (**self).read_line()
    }
    fn warn(&mut self, msg: &str) {
        (**self).warn(msg)
    }
}

fn io_error(e: io::Error) -> Error {
    Error::evaluation(format!("IO error: {}", e))
}

/// Strips one trailing `\n` or `\r\n`.
pub(crate) fn trim_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Process stdout/stdin; warnings go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes()).map_err(io_error)?;
        out.flush().map_err(io_error)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(io::stdout().lock(), "{}", line).map_err(io_error)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let n = io::stdin().lock().read_line(&mut input).map_err(io_error)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(trim_newline(input)))
    }

    fn warn(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }
}

/// In-memory console with scripted input lines.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<String>,
    /// Answer given once `input` is exhausted; `None` means end of input.
    fallback: Option<String>,
    output: String,
    warnings: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose reads return `lines` in order, then end of input.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Console that answers every read with `reply`.
    pub fn answering(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl Console for BufferConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.input.pop_front().or_else(|| self.fallback.clone()))
    }

    fn warn(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }
}
