//! Detection of terminals and their width.

use std::io::{self, IsTerminal, Write};

/// An output stream help or errors are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Standard output, used for help.
    Stdout,
    /// Standard error, used for errors.
    Stderr,
}

impl Stream {
    /// Test if the stream is an interactive terminal.
    pub fn is_terminal(self) -> bool {
        match self {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        }
    }

    /// The number of columns of the terminal, or 0 if the stream is not a
    /// terminal or its size is unknown.
    pub fn width(self) -> usize {
        if !self.is_terminal() {
            return 0;
        }

        columns(self)
    }

    /// Write `text` to the stream, ignoring failures.
    pub fn write(self, text: &str) {
        let result = match self {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes()).and_then(|()| out.flush())
            }
            Stream::Stderr => io::stderr().lock().write_all(text.as_bytes()),
        };

        if let Err(error) = result {
            tracing::trace!(stream = ?self, %error, "failed to write output");
        }
    }
}

/// Query the size of the terminal the process is attached to.
fn columns(stream: Stream) -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) => usize::from(columns),
        Err(error) => {
            tracing::trace!(stream = ?stream, %error, "failed to query terminal size");
            0
        }
    }
}
