//! Actions bind a declared argument to what happens when it is matched.
//!
//! Every registration method on [Parser][crate::Parser] boxes one of the
//! actions in this module and hands back a [Builder] to configure it. Custom
//! behavior can be plugged in by implementing [Action] and registering it
//! through [Parser::action][crate::Parser::action].

use std::str::FromStr;

use crate::{BoxError, Context, Error, ErrorKind};

/// Placeholder used for values when no meta has been configured.
const DEFAULT_META: &str = "ARG";

/// Names an action can be registered under.
///
/// Single-character names are short switches (`-v`), longer names are long
/// switches (`--verbose`). No names at all (`()`) declares a positional
/// argument.
pub trait Names {
    /// Convert into the list of aliases.
    fn into_names(self) -> Vec<String>;
}

impl Names for () {
    fn into_names(self) -> Vec<String> {
        Vec::new()
    }
}

impl Names for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl Names for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|name| (*name).to_owned()).collect()
    }
}

impl<const N: usize> Names for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|name| (*name).to_owned()).collect()
    }
}

impl Names for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

/// State shared by every kind of action.
#[derive(Debug, Clone)]
pub struct ArgState {
    names: Vec<String>,
    required: bool,
    multiple: bool,
    meta: String,
    help: String,
    visited: bool,
}

impl ArgState {
    /// Construct state for an argument known under the given names.
    ///
    /// Arguments start out required.
    pub fn new(names: impl Names) -> Self {
        Self {
            names: names.into_names(),
            required: true,
            multiple: false,
            meta: String::new(),
            help: String::new(),
            visited: false,
        }
    }

    /// The aliases of the argument, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the argument must be given.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Set whether the argument must be given.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Whether the argument may be given more than once.
    pub fn multiple(&self) -> bool {
        self.multiple
    }

    /// Set whether the argument may be given more than once.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
    }

    /// The placeholder shown for the value, `ARG` unless configured.
    pub fn meta(&self) -> &str {
        if self.meta.is_empty() {
            DEFAULT_META
        } else {
            &self.meta
        }
    }

    /// Set the value placeholder.
    pub fn set_meta(&mut self, meta: impl Into<String>) {
        self.meta = meta.into();
    }

    /// The description of the argument.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Set the description of the argument.
    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = help.into();
    }

    /// Whether the argument has been matched.
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Record that the argument has been matched.
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Test if the argument is positional, that is it has no names.
    pub fn is_positional(&self) -> bool {
        self.names.is_empty()
    }

    /// Test if `name` is one of the long aliases.
    pub fn is_long(&self, name: &str) -> bool {
        self.names
            .iter()
            .any(|alias| alias.chars().count() > 1 && alias == name)
    }

    /// Test if `c` is one of the short aliases.
    pub fn is_short(&self, c: char) -> bool {
        self.names.iter().any(|alias| {
            let mut chars = alias.chars();
            chars.next() == Some(c) && chars.next().is_none()
        })
    }

    /// The name used to refer to the argument in messages: `-c`, `--name`
    /// or the meta of a positional.
    pub fn display_name(&self) -> String {
        match self.names.first() {
            Some(name) => switch(name),
            None => self.meta().to_owned(),
        }
    }
}

/// Format an alias as it is written on the command line.
fn switch(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

/// One declared argument and what to do when it is matched.
///
/// The parser only calls [Action::visit] for actions where
/// [Action::needs_arg] is `false`, and [Action::visit_with] for those where
/// it is `true`. Both default to recording the visit.
pub trait Action {
    /// Shared argument state.
    fn state(&self) -> &ArgState;

    /// Mutable access to the shared argument state.
    fn state_mut(&mut self) -> &mut ArgState;

    /// Whether a match consumes a value.
    fn needs_arg(&self) -> bool;

    /// Handle a match that takes no value.
    fn visit(&mut self, ctx: &mut Context) -> Result<(), Error> {
        let _ = ctx;
        self.state_mut().mark_visited();
        Ok(())
    }

    /// Handle a match with its value.
    fn visit_with(&mut self, ctx: &mut Context, value: &str) -> Result<(), Error> {
        let _ = (ctx, value);
        self.state_mut().mark_visited();
        Ok(())
    }

    /// The label of the argument in the help listing, like `-o, --output
    /// FILE`.
    fn help_name(&self) -> String {
        let state = self.state();

        if state.is_positional() {
            return state.meta().to_owned();
        }

        let mut out = state
            .names()
            .iter()
            .map(|name| switch(name))
            .collect::<Vec<_>>()
            .join(", ");

        if self.needs_arg() {
            out.push(' ');
            out.push_str(state.meta());
        }

        out
    }

    /// Append the usage-line form of the argument to `out`.
    fn append_short_help(&self, out: &mut String) {
        let state = self.state();

        let name = match state.names().first() {
            Some(name) if self.needs_arg() => format!("{} {}", switch(name), state.meta()),
            Some(name) => switch(name),
            None => state.meta().to_owned(),
        };

        if state.multiple() {
            out.push_str(" [");
            out.push_str(&name);
            out.push_str(" ...]");
        } else if state.required() {
            out.push(' ');
            out.push_str(&name);
        } else {
            out.push_str(" [");
            out.push_str(&name);
            out.push(']');
        }
    }
}

/// Convert a raw value into a destination type.
fn convert<T>(state: &ArgState, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    value.parse::<T>().map_err(|error| {
        Error::new(ErrorKind::InvalidValue {
            name: state.display_name().into(),
            value: value.into(),
            error: error.into(),
        })
    })
}

/// Overwrite a destination with each value given.
pub struct Store<'a, T> {
    state: ArgState,
    dst: &'a mut T,
}

impl<'a, T> Store<'a, T> {
    /// Construct a store action writing into `dst`.
    pub fn new(dst: &'a mut T, names: impl Names) -> Self {
        Self {
            state: ArgState::new(names),
            dst,
        }
    }
}

impl<T> Action for Store<'_, T>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    fn state(&self) -> &ArgState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ArgState {
        &mut self.state
    }

    fn needs_arg(&self) -> bool {
        true
    }

    fn visit_with(&mut self, _: &mut Context, value: &str) -> Result<(), Error> {
        *self.dst = convert(&self.state, value)?;
        self.state.mark_visited();
        Ok(())
    }
}

/// Push every value given onto a sequence.
pub struct Append<'a, T> {
    state: ArgState,
    dst: &'a mut Vec<T>,
}

impl<'a, T> Append<'a, T> {
    /// Construct an append action pushing onto `dst`.
    ///
    /// The argument is marked as [multiple][ArgState::multiple].
    pub fn new(dst: &'a mut Vec<T>, names: impl Names) -> Self {
        let mut state = ArgState::new(names);
        state.set_multiple(true);
        Self { state, dst }
    }
}

impl<T> Action for Append<'_, T>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    fn state(&self) -> &ArgState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ArgState {
        &mut self.state
    }

    fn needs_arg(&self) -> bool {
        true
    }

    fn visit_with(&mut self, _: &mut Context, value: &str) -> Result<(), Error> {
        self.dst.push(convert(&self.state, value)?);
        self.state.mark_visited();
        Ok(())
    }
}

/// Assign a fixed value when matched.
pub struct Set<'a, T> {
    state: ArgState,
    dst: &'a mut T,
    value: T,
}

impl<'a, T> Set<'a, T> {
    /// Construct an action assigning `value` to `dst`.
    pub fn new(dst: &'a mut T, value: T, names: impl Names) -> Self {
        Self {
            state: ArgState::new(names),
            dst,
            value,
        }
    }
}

impl<T> Action for Set<'_, T>
where
    T: Clone,
{
    fn state(&self) -> &ArgState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ArgState {
        &mut self.state
    }

    fn needs_arg(&self) -> bool {
        false
    }

    fn visit(&mut self, _: &mut Context) -> Result<(), Error> {
        *self.dst = self.value.clone();
        self.state.mark_visited();
        Ok(())
    }
}

/// The result returned by callbacks.
pub type CallbackResult = Result<(), BoxError>;

/// A user callback, tagged with the arguments it accepts.
///
/// The shape decides whether the argument takes a value: [Callback::ValueOnly]
/// and [Callback::ParserAndValue] consume one.
///
/// # Examples
///
/// ```rust
/// use argline::{Callback, Parser};
///
/// let mut seen = Vec::new();
/// let mut parser = Parser::new("", ["prog", "-D", "a=1", "-Db=2"]);
///
/// parser.custom(Callback::value(|define| {
///     if !define.contains('=') {
///         return Err(format!("`{}` is not KEY=VALUE", define).into());
///     }
///
///     seen.push(define.to_owned());
///     Ok(())
/// }), "D").meta("KEY=VALUE").multi();
///
/// assert!(parser.try_parse().is_ok());
/// drop(parser);
///
/// assert_eq!(seen, ["a=1", "b=2"]);
/// ```
pub enum Callback<'a> {
    /// Called without arguments.
    NoArg(Box<dyn FnMut() -> CallbackResult + 'a>),
    /// Called with the parser context.
    ParserOnly(Box<dyn FnMut(&mut Context) -> CallbackResult + 'a>),
    /// Called with the value.
    ValueOnly(Box<dyn FnMut(&str) -> CallbackResult + 'a>),
    /// Called with the parser context and the value.
    ParserAndValue(Box<dyn FnMut(&mut Context, &str) -> CallbackResult + 'a>),
}

impl<'a> Callback<'a> {
    /// Construct a [Callback::NoArg].
    pub fn no_arg(f: impl FnMut() -> CallbackResult + 'a) -> Self {
        Self::NoArg(Box::new(f))
    }

    /// Construct a [Callback::ParserOnly].
    pub fn parser(f: impl FnMut(&mut Context) -> CallbackResult + 'a) -> Self {
        Self::ParserOnly(Box::new(f))
    }

    /// Construct a [Callback::ValueOnly].
    pub fn value(f: impl FnMut(&str) -> CallbackResult + 'a) -> Self {
        Self::ValueOnly(Box::new(f))
    }

    /// Construct a [Callback::ParserAndValue].
    pub fn parser_value(f: impl FnMut(&mut Context, &str) -> CallbackResult + 'a) -> Self {
        Self::ParserAndValue(Box::new(f))
    }

    /// Whether the callback consumes a value.
    pub fn takes_value(&self) -> bool {
        matches!(self, Self::ValueOnly(..) | Self::ParserAndValue(..))
    }
}

/// Invoke a [Callback] when matched.
pub struct Custom<'a> {
    state: ArgState,
    callback: Callback<'a>,
}

impl<'a> Custom<'a> {
    /// Construct a callback action.
    pub fn new(callback: Callback<'a>, names: impl Names) -> Self {
        Self {
            state: ArgState::new(names),
            callback,
        }
    }

    fn finish(&mut self, result: CallbackResult) -> Result<(), Error> {
        result.map_err(|error| {
            Error::new(ErrorKind::Callback {
                name: self.state.display_name().into(),
                error,
            })
        })?;

        self.state.mark_visited();
        Ok(())
    }
}

impl Action for Custom<'_> {
    fn state(&self) -> &ArgState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ArgState {
        &mut self.state
    }

    fn needs_arg(&self) -> bool {
        self.callback.takes_value()
    }

    /// Invoke a callback which takes no value. Callbacks which take one
    /// fail with [ErrorKind::MissingValue].
    fn visit(&mut self, ctx: &mut Context) -> Result<(), Error> {
        let result = match &mut self.callback {
            Callback::NoArg(f) => f(),
            Callback::ParserOnly(f) => f(ctx),
            Callback::ValueOnly(..) | Callback::ParserAndValue(..) => {
                return Err(Error::new(ErrorKind::MissingValue {
                    name: self.state.display_name().into(),
                }));
            }
        };

        self.finish(result)
    }

    /// Invoke a callback with `value`. Callbacks which take no value are
    /// invoked without it.
    fn visit_with(&mut self, ctx: &mut Context, value: &str) -> Result<(), Error> {
        let result = match &mut self.callback {
            Callback::ValueOnly(f) => f(value),
            Callback::ParserAndValue(f) => f(ctx, value),
            Callback::NoArg(f) => f(),
            Callback::ParserOnly(f) => f(ctx),
        };

        self.finish(result)
    }
}

/// Configures the action that was just registered.
///
/// Returned by the registration methods of [Parser][crate::Parser]. It
/// borrows the parser, so it has to be used before anything else is
/// registered.
pub struct Builder<'p, 'a> {
    action: &'p mut (dyn Action + 'a),
}

impl<'p, 'a> Builder<'p, 'a> {
    pub(crate) fn new(action: &'p mut (dyn Action + 'a)) -> Self {
        Self { action }
    }

    /// Set the placeholder shown for the value.
    pub fn meta(&mut self, meta: impl Into<String>) -> &mut Self {
        self.action.state_mut().set_meta(meta);
        self
    }

    /// Set the description shown in the help.
    pub fn help(&mut self, help: impl Into<String>) -> &mut Self {
        self.action.state_mut().set_help(help);
        self
    }

    /// Allow the argument to be given more than once.
    pub fn multi(&mut self) -> &mut Self {
        self.action.state_mut().set_multiple(true);
        self
    }

    /// Make the argument required.
    pub fn req(&mut self) -> &mut Self {
        self.action.state_mut().set_required(true);
        self
    }

    /// Make the argument optional.
    pub fn opt(&mut self) -> &mut Self {
        self.action.state_mut().set_required(false);
        self
    }
}
