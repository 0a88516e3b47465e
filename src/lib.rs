//! [![Documentation](https://docs.rs/argline/badge.svg)](https://docs.rs/argline)
//! [![Crates](https://img.shields.io/crates/v/argline.svg)](https://crates.io/crates/argline)
//!
//! Bind command-line arguments to variables and print help that fits the
//! terminal.
//!
//! This is **not** intended to be a complete command-line parser library.
//! It covers a single flat grammar of switches and positional arguments,
//! in the style of Python's `argparse`.
//!
//! We provide:
//! * Short switches (`-v`), clusters (`-vq`), glued values (`-ofile`) and
//!   separated values (`-o file`).
//! * Long switches (`--output file`).
//! * Required and repeatable arguments, checked after parsing.
//! * Callbacks in four explicit shapes, see [Callback].
//! * Usage and help messages wrapped to the width of the terminal.
//!
//! We *do not* provide:
//! * `--name=value` syntax.
//! * Subcommands.
//! * Display-width aware wrapping of wide unicode characters. Text is
//!   measured in [char]s.
//!
//! # Examples
//!
//! > This is available as a runnable example:
//! > ```sh
//! > cargo run --example tour -- --help
//! > ```
//!
//! ```rust
//! let mut verbose = false;
//! let mut limit = 10usize;
//! let mut files = Vec::<String>::new();
//!
//! let mut parser = argline::Parser::new("Count things in files.", ["count", "-v", "--limit", "20", "a.txt", "b.txt"]);
//!
//! parser.set(&mut verbose, true, ["v", "verbose"]).help("Talk more.").opt();
//! parser.arg(&mut limit, ["l", "limit"]).meta("N").help("Stop after N things.").opt();
//! parser.append(&mut files, ()).meta("FILE").help("Files to count in.");
//!
//! assert!(parser.try_parse().is_ok());
//! drop(parser);
//!
//! assert!(verbose);
//! assert_eq!(limit, 20);
//! assert_eq!(files, ["a.txt", "b.txt"]);
//! ```
//!
//! In a real program, call [Parser::parse] instead. It prints the help or
//! the error and exits with status 0 or 2 respectively.

#![deny(missing_docs)]

pub mod action;
pub mod help;
mod parser;
pub mod terminal;

use std::error;

use thiserror::Error;

pub use self::action::{Action, ArgState, Builder, Callback, Names};
pub use self::help::{format_list, format_paragraph, Chunk, HelpFmt};
pub use self::parser::{program_name, Context, Parser, Stop};

/// Boxed error returned from callbacks and value conversions.
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

/// An error raised by argline.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    /// Construct a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Construct a free-form error message.
    pub fn message(message: impl Into<Box<str>>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Access the underlying error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// The kind of an error.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A switch which takes a value was last on the command line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut output = String::new();
    /// let mut parser = argline::Parser::new("", ["prog", "--output"]);
    /// parser.arg(&mut output, "output");
    ///
    /// let stop = parser.try_parse().unwrap_err();
    /// assert_eq!(stop.to_string(), "argument --output: expected one argument");
    /// ```
    #[error("argument {name}: expected one argument")]
    MissingValue {
        /// The switch missing its value, like `--output` or `-o`.
        name: Box<str>,
    },
    /// Encountered an argument that no action matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut parser = argline::Parser::new("", ["prog", "-x"]);
    ///
    /// let stop = parser.try_parse().unwrap_err();
    /// assert_eq!(stop.to_string(), "unrecognized argument: -x");
    /// ```
    #[error("unrecognized argument: {argument}")]
    UnrecognizedArgument {
        /// The argument as it would be written, like `--path`, `-x` or
        /// `file.txt`.
        argument: Box<str>,
    },
    /// A required argument was never given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut input = String::new();
    /// let mut parser = argline::Parser::new("", ["prog"]);
    /// parser.arg(&mut input, ()).meta("INPUT");
    ///
    /// let stop = parser.try_parse().unwrap_err();
    /// assert_eq!(stop.to_string(), "argument INPUT is required");
    /// ```
    #[error("argument {name} is required")]
    MissingRequired {
        /// The primary name of the argument, or its meta for positionals.
        name: Box<str>,
    },
    /// A value could not be converted into its destination.
    #[error("argument {name}: invalid value '{value}': {error}")]
    InvalidValue {
        /// The name of the argument.
        name: Box<str>,
        /// The value as given on the command line.
        value: Box<str>,
        /// The conversion error.
        #[source]
        error: BoxError,
    },
    /// A callback returned an error.
    #[error("argument {name}: {error}")]
    Callback {
        /// The name of the argument whose callback failed.
        name: Box<str>,
        /// The error raised by the callback.
        #[source]
        error: BoxError,
    },
    /// An error raised through [Parser::error] or [Error::message].
    #[error("{message}")]
    Message {
        /// The message to print.
        message: Box<str>,
    },
}
