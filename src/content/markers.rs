// exam-export-service/src/content/markers.rs

use std::ops::Range;

/// A pair of literal delimiters around a math expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPattern {
    pub open: &'static str,
    pub close: &'static str,
}

pub const BLOCK: MarkerPattern = MarkerPattern {
    open: "\\[",
    close: "\\]",
};

pub const INLINE: MarkerPattern = MarkerPattern {
    open: "##",
    close: "##",
};

/// One delimited occurrence: `whole` covers the delimiters, `inner` the
/// expression between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpan {
    pub whole: Range<usize>,
    pub inner: Range<usize>,
}

/// Left-to-right, non-overlapping, shortest-match scan. Expressions may
/// contain line breaks. An opener with no closer after it ends the scan.
pub fn find_markers(input: &str, pattern: &MarkerPattern) -> Vec<MarkerSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(open_at) = input[cursor..].find(pattern.open) {
        let inner_start = cursor + open_at + pattern.open.len();
        let Some(close_at) = input[inner_start..].find(pattern.close) else {
            break;
        };
        let inner_end = inner_start + close_at;
        let end = inner_end + pattern.close.len();

        spans.push(MarkerSpan {
            whole: cursor + open_at..end,
            inner: inner_start..inner_end,
        });
        cursor = end;
    }

    spans
}

/// Replaces every marker found by [`find_markers`] with `replace(inner)`.
pub fn replace_markers<F>(input: &str, pattern: &MarkerPattern, mut replace: F) -> String
where
    F: FnMut(&str) -> String,
{
    let spans = find_markers(input, pattern);
    if spans.is_empty() {
        return input.to_string();
    }

    let replacements: Vec<String> = spans
        .iter()
        .map(|span| replace(&input[span.inner.clone()]))
        .collect();

    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for (span, replacement) in spans.iter().zip(&replacements) {
        output.push_str(&input[last..span.whole.start]);
        output.push_str(replacement);
        last = span.whole.end;
    }
    output.push_str(&input[last..]);
    output
}
