//! Paragraph wrapping and two-column listings for help output.
//!
//! The functions in here write into anything implementing [fmt::Write] and
//! know nothing about terminals. A `width` of zero or one means the output
//! is not a terminal, and text is never wrapped.

use std::fmt::{self, Write as _};

use crate::terminal::Stream;

/// Widths below this lay the listing out without columns.
const MIN_COLUMNS_WIDTH: usize = 20;

/// Indentation of wrapped usage lines, the width of `usage: `.
pub(crate) const USAGE_INDENT: usize = 7;

/// A titled group of `(label, description)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// The title, printed with a trailing colon.
    pub title: String,
    /// The labels and their descriptions.
    pub items: Vec<(String, String)>,
}

impl Chunk {
    /// Construct an empty chunk.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Add an item to the chunk.
    pub fn push(&mut self, label: impl Into<String>, description: impl Into<String>) {
        self.items.push((label.into(), description.into()));
    }
}

/// Write `text` wrapped to `width` columns, followed by a newline.
///
/// Lines are broken at spaces so that no line reaches `width`. Every line
/// after the first is indented by `indent` spaces. A word which doesn't fit
/// on a line by itself is cut.
///
/// # Examples
///
/// ```rust
/// let mut out = String::new();
/// argline::format_paragraph(&mut out, "usage: tool [-h] [-v] [--output FILE]", 7, 24)?;
/// assert_eq!(out, "usage: tool [-h] [-v]\n       [--output FILE]\n");
/// # Ok::<_, std::fmt::Error>(())
/// ```
pub fn format_paragraph<W>(out: &mut W, text: &str, indent: usize, width: usize) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    let mut width = if width < 2 {
        text.chars().count()
    } else {
        width - 1
    };

    let indent = if indent >= width { 0 } else { indent };

    let end = split(text, width);
    out.write_str(&text[..end])?;
    out.write_char('\n')?;

    let mut rest = skip_spaces(&text[end..]);
    width -= indent;

    while !rest.is_empty() {
        let end = split(rest, width);
        fill_spaces(out, indent)?;
        out.write_str(&rest[..end])?;
        out.write_char('\n')?;
        rest = skip_spaces(&rest[end..]);
    }

    Ok(())
}

/// Write the chunks as lists of labels next to their descriptions.
///
/// Labels share one column across all chunks, capped to a third of the
/// width. Descriptions are wrapped and indented to that column. Below a
/// width of 20 there's no room for that, and every item is printed on a
/// single line instead.
///
/// # Examples
///
/// ```rust
/// use argline::Chunk;
///
/// let mut chunk = Chunk::new("optional arguments");
/// chunk.push("-h, --help", "show this help message and exit");
/// chunk.push("-v", "talk more");
///
/// let mut out = String::new();
/// argline::format_list(&mut out, &[chunk], 40)?;
///
/// assert_eq!(out, "\noptional arguments:\n -h, --help show this help message and\n            exit\n -v         talk more\n");
/// # Ok::<_, std::fmt::Error>(())
/// ```
pub fn format_list<W>(out: &mut W, chunks: &[Chunk], width: usize) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    let len = chunks
        .iter()
        .flat_map(|chunk| &chunk.items)
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();

    if width < MIN_COLUMNS_WIDTH {
        for chunk in chunks {
            write!(out, "\n{}:\n", chunk.title)?;

            for (label, description) in &chunk.items {
                out.write_char(' ')?;
                out.write_str(label)?;

                if !description.is_empty() {
                    fill_spaces(out, len - label.chars().count() + 1)?;
                    out.write_str(description)?;
                }

                out.write_char('\n')?;
            }
        }

        return Ok(());
    }

    let column = usize::min(len + 2, width / 3) - 2;
    let mut line = String::new();

    for chunk in chunks {
        out.write_char('\n')?;
        format_paragraph(out, &format!("{}:", chunk.title), 0, width)?;

        for (label, description) in &chunk.items {
            let label_len = label.chars().count();
            let prefix = usize::max(column, label_len) + 2;

            line.clear();
            line.push(' ');
            line.push_str(label);

            if !description.is_empty() {
                line.extend(std::iter::repeat(' ').take(prefix - 1 - label_len));
                line.push_str(description);
            }

            format_paragraph(out, &line, prefix, width)?;
        }
    }

    Ok(())
}

/// Find the byte offset to break `text` at so that at most `width`
/// characters are kept.
fn split(text: &str, width: usize) -> usize {
    let (end, next) = match text.char_indices().nth(width) {
        Some(boundary) => boundary,
        None => return text.len(),
    };

    // A word ends right at the boundary.
    if next == ' ' {
        return end;
    }

    // Drop the word crossing the boundary along with the spaces before it.
    let kept = text[..end]
        .trim_end_matches(|c: char| c != ' ')
        .trim_end_matches(' ');

    if kept.is_empty() {
        end
    } else {
        kept.len()
    }
}

fn skip_spaces(text: &str) -> &str {
    text.trim_start_matches(' ')
}

fn fill_spaces<W>(out: &mut W, mut count: usize) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    // Static buffer for quicker whitespace filling.
    static BUF: &str = "                                                                ";

    while count > 0 {
        out.write_str(&BUF[..usize::min(count, BUF.len())])?;
        count = count.saturating_sub(BUF.len());
    }

    Ok(())
}

/// Formats the full help of a parser: the usage line, the description and
/// the argument listing.
///
/// Constructed through [Parser::help][crate::Parser::help].
pub struct HelpFmt<'p> {
    usage: String,
    description: &'p str,
    chunks: Vec<Chunk>,
    width: Option<usize>,
}

impl<'p> HelpFmt<'p> {
    pub(crate) fn new(usage: String, description: &'p str, chunks: Vec<Chunk>) -> Self {
        Self {
            usage,
            description,
            chunks,
            width: None,
        }
    }

    /// Wrap to a fixed width instead of the width of stdout.
    pub fn width(self, width: usize) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }
}

impl fmt::Display for HelpFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = match self.width {
            Some(width) => width,
            None => Stream::Stdout.width(),
        };

        format_paragraph(f, &self.usage, USAGE_INDENT, width)?;

        if !self.description.is_empty() {
            f.write_char('\n')?;
            format_paragraph(f, self.description, 0, width)?;
        }

        format_list(f, &self.chunks, width)
    }
}
