use std::path::Path;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::action::{Action, Append, Builder, Callback, Custom, Names, Set, Store};
use crate::help::{format_paragraph, Chunk, HelpFmt, USAGE_INDENT};
use crate::terminal::Stream;
use crate::{BoxError, Error, ErrorKind};

/// Extract the program name from the zeroth argument.
///
/// This is the last component of the path. On Windows the extension is
/// stripped as well.
///
/// # Examples
///
/// ```rust
/// # #[cfg(unix)]
/// assert_eq!(argline::program_name("/usr/local/bin/tool"), "tool");
/// assert_eq!(argline::program_name("tool"), "tool");
/// ```
pub fn program_name(arg0: &str) -> String {
    let path = Path::new(arg0);

    let name = if cfg!(windows) {
        path.file_stem()
    } else {
        path.file_name()
    };

    match name {
        Some(name) => name.to_string_lossy().into_owned(),
        None => arg0.to_owned(),
    }
}

/// Why parsing stopped before completing.
#[derive(Debug, thiserror::Error)]
pub enum Stop {
    /// Help was requested with `-h`, `--help` or [Context::request_help].
    #[error("help requested")]
    Help,
    /// The command line was not accepted.
    #[error(transparent)]
    Error(#[from] Error),
}

impl Stop {
    /// The status the process exits with for this stop.
    pub fn status(&self) -> i32 {
        match self {
            Stop::Help => 0,
            Stop::Error(..) => 2,
        }
    }
}

/// Everything about the parser that callbacks may see.
#[derive(Debug, Default)]
pub struct Context {
    program: String,
    usage: String,
    description: String,
    args: Vec<String>,
    provide_help: bool,
    help_requested: bool,
}

impl Context {
    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The description of the program.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The raw arguments being parsed, excluding the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Stop parsing once the current callback returns and show the help.
    pub fn request_help(&mut self) {
        self.help_requested = true;
    }
}

/// A command-line parser binding arguments to variables.
///
/// Arguments are registered with [arg][Parser::arg], [append][Parser::append],
/// [set][Parser::set] and [custom][Parser::custom]. Each of them borrows its
/// destination for the lifetime of the parser, so the parser has to be
/// dropped before the destinations can be read.
///
/// Every registered argument is required unless marked with
/// [Builder::opt].
///
/// Positional tokens are all routed to the first positional argument that
/// was registered. Declare at most one, and make it an
/// [append][Parser::append] to take several values.
///
/// # Examples
///
/// ```rust
/// use argline::Parser;
///
/// let mut name = String::new();
/// let mut count = 1u32;
/// let mut loud = false;
///
/// let mut parser = Parser::new("Greet someone.", ["greet", "-lc", "3", "--name", "Ferris"]);
/// parser.arg(&mut name, ["n", "name"]).meta("NAME").help("Who to greet.");
/// parser.arg(&mut count, ["c", "count"]).meta("N").help("How many times.").opt();
/// parser.set(&mut loud, true, ["l", "loud"]).help("Shout.").opt();
///
/// assert!(parser.try_parse().is_ok());
/// drop(parser);
///
/// assert_eq!(name, "Ferris");
/// assert_eq!(count, 3);
/// assert!(loud);
/// ```
pub struct Parser<'a> {
    actions: Vec<Box<dyn Action + 'a>>,
    ctx: Context,
}

impl<'a> Parser<'a> {
    /// Construct a parser from a description and a full argument vector,
    /// including the program in the first position.
    pub fn new<I>(description: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut it = args.into_iter().map(Into::into);

        let program = it
            .next()
            .map(|arg0: String| program_name(&arg0))
            .unwrap_or_default();

        Self {
            actions: Vec::new(),
            ctx: Context {
                program,
                usage: String::new(),
                description: description.into(),
                args: it.collect(),
                provide_help: true,
                help_requested: false,
            },
        }
    }

    /// Construct a parser from [std::env::args].
    pub fn from_env(description: impl Into<String>) -> Self {
        Self::new(description, std::env::args())
    }

    /// Register an argument whose value is converted into `dst`.
    ///
    /// A later occurrence overwrites an earlier one.
    pub fn arg<T>(&mut self, dst: &'a mut T, names: impl Names) -> Builder<'_, 'a>
    where
        T: 'a + FromStr,
        T::Err: Into<BoxError>,
    {
        self.action(Store::new(dst, names))
    }

    /// Register an argument whose values are all pushed onto `dst`.
    pub fn append<T>(&mut self, dst: &'a mut Vec<T>, names: impl Names) -> Builder<'_, 'a>
    where
        T: 'a + FromStr,
        T::Err: Into<BoxError>,
    {
        self.action(Append::new(dst, names))
    }

    /// Register a switch which assigns `value` to `dst` when given.
    pub fn set<T>(&mut self, dst: &'a mut T, value: T, names: impl Names) -> Builder<'_, 'a>
    where
        T: 'a + Clone,
    {
        self.action(Set::new(dst, value, names))
    }

    /// Register an argument which invokes a callback.
    pub fn custom(&mut self, callback: Callback<'a>, names: impl Names) -> Builder<'_, 'a> {
        self.action(Custom::new(callback, names))
    }

    /// Register a custom action.
    pub fn action(&mut self, action: impl Action + 'a) -> Builder<'_, 'a> {
        self.actions.push(Box::new(action));
        let index = self.actions.len() - 1;
        Builder::new(&mut *self.actions[index])
    }

    /// The program name shown in usage and error messages.
    pub fn program(&self) -> &str {
        &self.ctx.program
    }

    /// Override the program name.
    pub fn set_program(&mut self, program: impl Into<String>) -> &mut Self {
        self.ctx.program = program.into();
        self
    }

    /// The usage override, empty unless set.
    pub fn usage(&self) -> &str {
        &self.ctx.usage
    }

    /// Replace the generated usage with a fixed string, printed after the
    /// program name.
    pub fn set_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        self.ctx.usage = usage.into();
        self
    }

    /// The description printed in the help.
    pub fn description(&self) -> &str {
        &self.ctx.description
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.ctx.description = description.into();
        self
    }

    /// Whether `-h` and `--help` are handled by the parser.
    pub fn provide_help(&self) -> bool {
        self.ctx.provide_help
    }

    /// Enable or disable the implicit `-h` and `--help`.
    pub fn set_provide_help(&mut self, provide_help: bool) -> &mut Self {
        self.ctx.provide_help = provide_help;
        self
    }

    /// The raw arguments, excluding the program.
    pub fn args(&self) -> &[String] {
        &self.ctx.args
    }

    /// Parse the arguments, printing help or errors and exiting the process
    /// when parsing stops early.
    ///
    /// Help exits with status 0. Errors print the usage and
    /// `<program>: error: <message>` to stderr and exit with status 2.
    pub fn parse(&mut self) {
        if let Err(stop) = self.try_parse() {
            self.exit(stop);
        }
    }

    /// Parse the arguments, returning why parsing stopped instead of
    /// exiting.
    ///
    /// Destinations written before a failure keep their values.
    pub fn try_parse(&mut self) -> Result<(), Stop> {
        let args = self.ctx.args.clone();
        let mut i = 0;

        while i < args.len() {
            let arg = args[i].as_str();

            if arg.len() > 1 && arg.starts_with('-') {
                if arg.len() > 2 && arg.starts_with("--") {
                    trace!(arg, "long switch");
                    self.parse_long(&arg[2..], &args, &mut i)?;
                } else {
                    trace!(arg, "short switches");
                    self.parse_short(&arg[1..], &args, &mut i)?;
                }
            } else {
                trace!(arg, "positional");
                self.parse_positional(arg)?;
            }

            i += 1;
        }

        for action in &self.actions {
            let state = action.state();

            if state.required() && !state.visited() {
                return Err(Stop::Error(Error::new(ErrorKind::MissingRequired {
                    name: state.display_name().into(),
                })));
            }
        }

        Ok(())
    }

    fn parse_long(&mut self, name: &str, args: &[String], i: &mut usize) -> Result<(), Stop> {
        if self.ctx.provide_help && name == "help" {
            debug!("help requested");
            return Err(Stop::Help);
        }

        let action = match self.actions.iter_mut().find(|a| a.state().is_long(name)) {
            Some(action) => action,
            None => return Err(unrecognized(format!("--{}", name))),
        };

        if action.needs_arg() {
            *i += 1;

            let value = match args.get(*i) {
                Some(value) => value,
                None => return Err(missing_value(format!("--{}", name))),
            };

            debug!(switch = name, value = value.as_str(), "matched");
            action.visit_with(&mut self.ctx, value)?;
        } else {
            debug!(switch = name, "matched");
            action.visit(&mut self.ctx)?;
        }

        self.check_help_request()
    }

    fn parse_short(&mut self, cluster: &str, args: &[String], i: &mut usize) -> Result<(), Stop> {
        for (n, c) in cluster.char_indices() {
            if self.ctx.provide_help && c == 'h' {
                debug!("help requested");
                return Err(Stop::Help);
            }

            let action = match self.actions.iter_mut().find(|a| a.state().is_short(c)) {
                Some(action) => action,
                None => return Err(unrecognized(format!("-{}", c))),
            };

            if !action.needs_arg() {
                debug!(switch = %c, "matched");
                action.visit(&mut self.ctx)?;
                self.check_help_request()?;
                continue;
            }

            let glued = &cluster[n + c.len_utf8()..];

            let value = if !glued.is_empty() {
                glued
            } else {
                *i += 1;

                match args.get(*i) {
                    Some(value) => value.as_str(),
                    None => return Err(missing_value(format!("-{}", c))),
                }
            };

            debug!(switch = %c, value, "matched");
            action.visit_with(&mut self.ctx, value)?;
            return self.check_help_request();
        }

        Ok(())
    }

    fn parse_positional(&mut self, value: &str) -> Result<(), Stop> {
        let action = match self.actions.iter_mut().find(|a| a.state().is_positional()) {
            Some(action) => action,
            None => return Err(unrecognized(value.to_owned())),
        };

        debug!(value, "matched positional");

        if action.needs_arg() {
            action.visit_with(&mut self.ctx, value)?;
        } else {
            action.visit(&mut self.ctx)?;
        }

        self.check_help_request()
    }

    fn check_help_request(&mut self) -> Result<(), Stop> {
        if std::mem::take(&mut self.ctx.help_requested) {
            debug!("help requested by callback");
            return Err(Stop::Help);
        }

        Ok(())
    }

    /// The usage line, like `usage: prog [-h] [-v] FILE`.
    pub fn usage_line(&self) -> String {
        let mut out = format!("usage: {}", self.ctx.program);

        if !self.ctx.usage.is_empty() {
            out.push(' ');
            out.push_str(&self.ctx.usage);
            return out;
        }

        if self.ctx.provide_help {
            out.push_str(" [-h]");
        }

        for action in &self.actions {
            action.append_short_help(&mut out);
        }

        out
    }

    /// Construct the sections of the argument listing.
    pub fn chunks(&self) -> Vec<Chunk> {
        let mut positional = Chunk::new("positional arguments");
        let mut optional = Chunk::new("optional arguments");

        if self.ctx.provide_help {
            optional.push("-h, --help", "show this help message and exit");
        }

        for action in &self.actions {
            let chunk = if action.state().is_positional() {
                &mut positional
            } else {
                &mut optional
            };

            chunk.push(action.help_name(), action.state().help());
        }

        [positional, optional]
            .into_iter()
            .filter(|chunk| !chunk.items.is_empty())
            .collect()
    }

    /// A formatter for the full help.
    ///
    /// Unless a width is set with [HelpFmt::width], it wraps to the width
    /// of stdout, or not at all if stdout is not a terminal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut verbose = false;
    /// let mut parser = argline::Parser::new("Does things.", ["prog"]);
    /// parser.set(&mut verbose, true, ["v", "verbose"]).help("Talk more.").opt();
    ///
    /// let help = parser.help().width(80).to_string();
    /// assert!(help.starts_with("usage: prog [-h] [-v]\n\nDoes things.\n"));
    /// assert!(help.contains(" -h, --help    show this help message and exit\n"));
    /// assert!(help.contains(" -v, --verbose Talk more.\n"));
    /// ```
    pub fn help(&self) -> HelpFmt<'_> {
        HelpFmt::new(self.usage_line(), &self.ctx.description, self.chunks())
    }

    /// Render the output for a stop at the given width.
    ///
    /// This is the help for [Stop::Help], and the usage line followed by
    /// `<program>: error: <message>` for [Stop::Error].
    pub fn render_stop(&self, stop: &Stop, width: usize) -> String {
        match stop {
            Stop::Help => self.help().width(width).to_string(),
            Stop::Error(error) => {
                let mut out = String::new();
                // Writing into a `String` cannot fail.
                let _ = format_paragraph(&mut out, &self.usage_line(), USAGE_INDENT, width);
                let message = format!("{}: error: {}", self.ctx.program, error);
                let _ = format_paragraph(&mut out, &message, 0, width);
                out
            }
        }
    }

    /// Print the output for `stop` and exit the process with its
    /// [status][Stop::status].
    pub fn exit(&self, stop: Stop) -> ! {
        let stream = match stop {
            Stop::Help => Stream::Stdout,
            Stop::Error(..) => Stream::Stderr,
        };

        if let Stop::Error(error) = &stop {
            debug!(%error, "parsing failed");
        }

        stream.write(&self.render_stop(&stop, stream.width()));
        std::process::exit(stop.status())
    }

    /// Print the help and exit with status 0.
    pub fn help_and_exit(&self) -> ! {
        self.exit(Stop::Help)
    }

    /// Print the usage and `message` as an error and exit with status 2.
    pub fn error(&self, message: impl Into<Box<str>>) -> ! {
        self.exit(Stop::Error(Error::message(message)))
    }
}

fn unrecognized(argument: String) -> Stop {
    Stop::Error(Error::new(ErrorKind::UnrecognizedArgument {
        argument: argument.into(),
    }))
}

fn missing_value(name: String) -> Stop {
    Stop::Error(Error::new(ErrorKind::MissingValue { name: name.into() }))
}
