//! Terminal output for `folio search`

use crate::query::Highlight;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A piece of a rendered snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlighted(&'a str),
}

/// Split a snippet on its highlight markers
///
/// An opening marker without a matching close highlights the rest of the
/// snippet.
pub fn split_highlights<'a>(snippet: &'a str, highlight: &Highlight) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();

    if highlight.open.is_empty() || highlight.close.is_empty() {
        segments.push(Segment::Plain(snippet));
        return segments;
    }

    let mut rest = snippet;
    while let Some(open_at) = rest.find(&highlight.open) {
        if open_at > 0 {
            segments.push(Segment::Plain(&rest[..open_at]));
        }

        let inner = &rest[open_at + highlight.open.len()..];
        match inner.find(&highlight.close) {
            Some(close_at) => {
                segments.push(Segment::Highlighted(&inner[..close_at]));
                rest = &inner[close_at + highlight.close.len()..];
            }
            None => {
                segments.push(Segment::Highlighted(inner));
                rest = "";
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Plain(rest));
    }

    segments
}

/// Print snippets with highlighted matches, separated by `--` lines
pub fn print_snippets(snippets: &[String], highlight: &Highlight, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for (i, snippet) in snippets.iter().enumerate() {
        if i > 0 {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(stdout, "--")?;
            stdout.reset()?;
        }

        for segment in split_highlights(snippet, highlight) {
            match segment {
                Segment::Plain(text) => write!(stdout, "{}", text)?,
                Segment::Highlighted(text) => {
                    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                    write!(stdout, "{}", text)?;
                    stdout.reset()?;
                }
            }
        }

        if !snippet.ends_with('\n') {
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Print snippets as the JSON array the HTTP API returns
pub fn print_json(snippets: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, snippets)?;
    writeln!(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Segment::*;

    #[test]
    fn test_split_highlights() {
        let segments = split_highlights("a <strong>b</strong> c", &Highlight::strong());
        assert_eq!(segments, vec![Plain("a "), Highlighted("b"), Plain(" c")]);
    }

    #[test]
    fn test_split_adjacent_highlights() {
        let segments = split_highlights(
            "<strong>ab</strong><strong>ab</strong>",
            &Highlight::strong(),
        );
        assert_eq!(segments, vec![Highlighted("ab"), Highlighted("ab")]);
    }

    #[test]
    fn test_split_unclosed() {
        let segments = split_highlights("x [tail", &Highlight::new("[", "]"));
        assert_eq!(segments, vec![Plain("x "), Highlighted("tail")]);
    }

    #[test]
    fn test_split_without_markers() {
        let segments = split_highlights("plain text", &Highlight::new("", ""));
        assert_eq!(segments, vec![Plain("plain text")]);
    }
}
