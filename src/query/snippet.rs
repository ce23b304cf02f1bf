//! Snippet rendering for match groups
//!
//! A snippet is the corpus text around one [`MatchGroup`](super::MatchGroup):
//! up to `lookaround` bytes before the first match and after the last one,
//! with every match wrapped in a highlight marker. The window is then
//! trimmed so the snippet starts and ends on whole lines.
//!
//! Trimming only ever removes context. When the line that holds the first
//! (or last) match is itself cut by the window, that partial line is kept
//! and the snippet starts (or ends) mid-line instead of losing the match.

use memchr::{memchr, memrchr};
use serde::{Deserialize, Serialize};

/// Marker pair wrapped around highlighted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub open: String,
    pub close: String,
}

impl Highlight {
    pub const STRONG_OPEN: &'static str = "<strong>";
    pub const STRONG_CLOSE: &'static str = "</strong>";

    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `<strong>` / `</strong>`
    pub fn strong() -> Self {
        Self::new(Self::STRONG_OPEN, Self::STRONG_CLOSE)
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self::strong()
    }
}

/// Renders match groups into highlighted, line-trimmed snippets
#[derive(Debug, Clone)]
pub struct SnippetFormatter {
    lookaround: usize,
    highlight: Highlight,
}

impl SnippetFormatter {
    pub fn new(lookaround: usize, highlight: Highlight) -> Self {
        Self {
            lookaround,
            highlight,
        }
    }

    pub fn lookaround(&self) -> usize {
        self.lookaround
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Render the snippet for one group of ascending offsets into `text`
    ///
    /// An empty group renders as an empty string.
    pub fn format(&self, text: &[u8], group: &[usize], query_len: usize) -> String {
        let spans = highlight_spans(group, query_len, text.len());
        let (Some(&(first_start, _)), Some(&(_, last_end))) = (spans.first(), spans.last()) else {
            return String::new();
        };

        let start = first_start.saturating_sub(self.lookaround);
        let end = text.len().min(last_end.saturating_add(self.lookaround));

        let start = snap_forward(text, trim_leading(text, start, first_start), first_start);
        let end = snap_back(text, trim_trailing(text, end, last_end), last_end);

        let mut out = String::with_capacity(end - start + spans.len() * self.marker_len());
        let mut cursor = start;

        for &(span_start, span_end) in &spans {
            out.push_str(&String::from_utf8_lossy(&text[cursor..span_start]));
            out.push_str(&self.highlight.open);
            out.push_str(&String::from_utf8_lossy(&text[span_start..span_end]));
            out.push_str(&self.highlight.close);
            cursor = span_end;
        }

        out.push_str(&String::from_utf8_lossy(&text[cursor..end]));
        out
    }

    fn marker_len(&self) -> usize {
        self.highlight.open.len() + self.highlight.close.len()
    }
}

/// Byte ranges to highlight, one per occurrence
///
/// Overlapping occurrences (`"aa"` at 0 and 1 in `"aaa"`) are merged into
/// one span covering both. Occurrences that merely touch stay separate.
/// Ranges are clamped to the text.
fn highlight_spans(group: &[usize], query_len: usize, text_len: usize) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(group.len());

    for &offset in group {
        let start = offset.min(text_len);
        let end = offset.saturating_add(query_len).min(text_len);

        match spans.last_mut() {
            Some(last) if start < last.1 || start == last.0 => last.1 = last.1.max(end),
            _ => spans.push((start, end)),
        }
    }

    spans
}

/// Move `start` past a leading partial line, never beyond `limit`
fn trim_leading(text: &[u8], start: usize, limit: usize) -> usize {
    if start == 0 || text[start - 1] == b'\n' {
        return start;
    }

    match memchr(b'\n', &text[start..limit]) {
        Some(i) => {
            let mut pos = start + i + 1;
            while pos < limit && text[pos] == b'\n' {
                pos += 1;
            }
            pos
        }
        None => start,
    }
}

/// Move `end` back before a trailing partial line, never below `limit`
///
/// Line breaks left at the end are dropped too, so a window reaching the
/// end of the text renders like one that stops mid-text.
fn trim_trailing(text: &[u8], end: usize, limit: usize) -> usize {
    let mut pos = if end == text.len() || text[end] == b'\n' {
        end
    } else {
        match memrchr(b'\n', &text[limit..end]) {
            Some(i) => limit + i,
            None => return end,
        }
    };

    while pos > limit && text[pos - 1] == b'\n' {
        pos -= 1;
    }
    pos
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Advance to the next UTF-8 character boundary, stopping at `limit`
fn snap_forward(text: &[u8], mut pos: usize, limit: usize) -> usize {
    while pos < limit && is_continuation(text[pos]) {
        pos += 1;
    }
    pos
}

/// Retreat to the previous UTF-8 character boundary, stopping at `limit`
fn snap_back(text: &[u8], mut pos: usize, limit: usize) -> usize {
    while pos > limit && pos < text.len() && is_continuation(text[pos]) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong(lookaround: usize) -> SnippetFormatter {
        SnippetFormatter::new(lookaround, Highlight::strong())
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(strong(10).format(b"anything", &[], 3), "");
    }

    #[test]
    fn test_whole_corpus_window() {
        let text = b"the cat sat\non the mat\n";
        let out = strong(50).format(text, &[5, 9, 20], 2);
        assert_eq!(
            out,
            "the c<strong>at</strong> s<strong>at</strong>\non the m<strong>at</strong>"
        );
    }

    #[test]
    fn test_partial_match_line_is_kept() {
        let text = b"the cat sat\non the mat\n";

        let out = strong(3).format(text, &[5, 9], 2);
        assert_eq!(out, "e c<strong>at</strong> s<strong>at</strong>");

        let out = strong(3).format(text, &[20], 2);
        assert_eq!(out, "e m<strong>at</strong>");
    }

    #[test]
    fn test_last_line_renders_like_any_other() {
        let at_end = strong(1).format(b"xx\nab\n", &[3], 2);
        let mid_text = strong(1).format(b"xx\nab\nyy", &[3], 2);

        assert_eq!(at_end, "<strong>ab</strong>");
        assert_eq!(at_end, mid_text);
        assert_eq!(strong(50).format(b"ab\n\n\n", &[0], 2), "<strong>ab</strong>");
    }

    #[test]
    fn test_trims_partial_context_lines() {
        let text = b"alpha line\nbravo needle here\ncharlie line\n";
        let offset = 17; // "needle"
        let out = strong(12).format(text, &[offset], 6);

        // Window " line\nbravo needle here\ncharli" loses both partial lines
        assert_eq!(out, "bravo <strong>needle</strong> here");
    }

    #[test]
    fn test_window_on_line_boundaries_is_untouched() {
        let text = b"one\ntwo\nthree";
        // Window [4, 13) starts right after a newline and ends at text end
        let out = strong(4).format(text, &[8], 5);
        assert_eq!(out, "two\n<strong>three</strong>");
    }

    #[test]
    fn test_blank_lines_after_leading_cut_are_dropped() {
        let text = b"xxxx\n\n\nmatch\nyyyyyyyy";
        let out = strong(6).format(text, &[7], 5);
        assert_eq!(out, "<strong>match</strong>");
    }

    #[test]
    fn test_preserves_original_case() {
        let text = b"Now is the WINTER of our discontent";
        let out = strong(100).format(text, &[11], 6);
        assert!(out.contains("<strong>WINTER</strong>"));
    }

    #[test]
    fn test_overlapping_occurrences_merge() {
        let out = strong(10).format(b"aaaa", &[0, 1, 2], 2);
        assert_eq!(out, "<strong>aaaa</strong>");
    }

    #[test]
    fn test_adjacent_occurrences_stay_separate() {
        let out = strong(10).format(b"abab", &[0, 2], 2);
        assert_eq!(out, "<strong>ab</strong><strong>ab</strong>");
    }

    #[test]
    fn test_custom_marker() {
        let formatter = SnippetFormatter::new(10, Highlight::new("[", "]"));
        assert_eq!(formatter.format(b"to be or not", &[3], 2), "to [be] or not");
    }

    #[test]
    fn test_window_snaps_to_char_boundaries() {
        let text = "ééé needle ééé".as_bytes();
        let offset = text.len() - "needle ééé".len();
        // Lookaround of 4 bytes would cut "é" in half on both sides
        let out = strong(4).format(text, &[offset], 6);
        assert_eq!(out, "é <strong>needle</strong> é");
    }

    #[test]
    fn test_format_is_pure() {
        let text = b"first line\nsecond line\nthird line\n";
        let formatter = strong(8);
        assert_eq!(
            formatter.format(text, &[11, 18], 4),
            formatter.format(text, &[11, 18], 4)
        );
    }

    #[test]
    fn test_highlight_spans() {
        assert_eq!(highlight_spans(&[0, 1, 2], 2, 4), vec![(0, 4)]);
        assert_eq!(highlight_spans(&[0, 2], 2, 4), vec![(0, 2), (2, 4)]);
        assert_eq!(highlight_spans(&[3, 3], 2, 10), vec![(3, 5)]);
        assert_eq!(highlight_spans(&[8], 5, 10), vec![(8, 10)]);
    }
}
