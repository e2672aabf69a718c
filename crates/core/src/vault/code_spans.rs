//! Fenced code blocks and inline code spans of a markdown document.
//!
//! Spans are computed once per document in a single pass and then queried
//! by every stage that must leave code untouched.

use std::collections::HashMap;
use std::ops::Range;

/// Sorted, non-overlapping byte ranges covered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSpans {
    spans: Vec<Range<usize>>,
}

/// A piece of a document, either code or everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Code(&'a str),
}

impl CodeSpans {
    /// Find all fenced blocks and inline code spans in `text`.
    ///
    /// An unterminated fence runs to the end of the document.
    pub fn scan(text: &str) -> Self {
        let mut spans = Vec::new();
        let mut prose_start = 0;
        let mut fence: Option<(Fence, usize)> = None;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            match fence {
                None => {
                    if let Some(open) = Fence::opening(line) {
                        paragraph_spans(text, prose_start..offset, &mut spans);
                        fence = Some((open, offset));
                    }
                }
                Some((open, start)) => {
                    if open.is_closed_by(line) {
                        spans.push(start..offset + line.len());
                        prose_start = offset + line.len();
                        fence = None;
                    }
                }
            }
            offset += line.len();
        }

        match fence {
            Some((_, start)) => spans.push(start..text.len()),
            None => paragraph_spans(text, prose_start..text.len(), &mut spans),
        }

        Self { spans }
    }

    /// Build from already known ranges. They must be sorted and disjoint.
    pub fn from_ranges(spans: Vec<Range<usize>>) -> Self {
        debug_assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
        Self { spans }
    }

    /// True if `range` shares at least one byte with a code span.
    pub fn overlaps(&self, range: Range<usize>) -> bool {
        let idx = self.spans.partition_point(|s| s.end <= range.start);
        self.spans.get(idx).is_some_and(|s| s.start < range.end)
    }

    /// True if the byte at `pos` is inside a code span.
    pub fn contains(&self, pos: usize) -> bool {
        self.overlaps(pos..pos + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range<usize>> {
        self.spans.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Split `text` into alternating prose and code segments, in order.
    /// Empty segments are omitted.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut out = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut cursor = 0;
        for span in &self.spans {
            if span.start > cursor {
                out.push(Segment::Prose(&text[cursor..span.start]));
            }
            out.push(Segment::Code(&text[span.clone()]));
            cursor = span.end;
        }
        if cursor < text.len() {
            out.push(Segment::Prose(&text[cursor..]));
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: u8,
    len: usize,
}

impl Fence {
    fn opening(line: &str) -> Option<Self> {
        let rest = strip_indent(line)?;
        let marker = *rest.as_bytes().first()?;
        if marker != b'`' && marker != b'~' {
            return None;
        }
        let len = rest.bytes().take_while(|&b| b == marker).count();
        if len < 3 {
            return None;
        }
        // A backtick fence's info string cannot contain backticks.
        if marker == b'`' && rest[len..].contains('`') {
            return None;
        }
        Some(Self { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let len = rest.bytes().take_while(|&b| b == self.marker).count();
        len >= self.len && rest[len..].trim().is_empty()
    }
}

/// Strip up to three spaces of indentation.
fn strip_indent(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(' ');
    (line.len() - rest.len() <= 3).then_some(rest)
}

/// Collect inline code spans paragraph by paragraph. A blank line ends any
/// open span.
fn paragraph_spans(text: &str, region: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let mut start = region.start;
    let mut offset = region.start;
    for line in text[region.clone()].split_inclusive('\n') {
        if line.trim().is_empty() {
            inline_spans(text, start..offset, spans);
            start = offset + line.len();
        }
        offset += line.len();
    }
    inline_spans(text, start..region.end, spans);
}

/// Collect inline code spans inside `region`.
///
/// A run of N backticks opens a span closed by the next run of exactly N
/// backticks. Closing partners are precomputed right to left so the whole
/// region is handled in linear time.
fn inline_spans(text: &str, region: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let bytes = &text.as_bytes()[region.clone()];
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            runs.push((region.start + start, i - start));
        } else {
            i += 1;
        }
    }

    let mut next_same: Vec<Option<usize>> = vec![None; runs.len()];
    let mut last_seen: HashMap<usize, usize> = HashMap::new();
    for idx in (0..runs.len()).rev() {
        next_same[idx] = last_seen.get(&runs[idx].1).copied();
        last_seen.insert(runs[idx].1, idx);
    }

    let mut idx = 0;
    while idx < runs.len() {
        match next_same[idx] {
            Some(close) => {
                let (open_start, _) = runs[idx];
                let (close_start, close_len) = runs[close];
                spans.push(open_start..close_start + close_len);
                idx = close + 1;
            }
            None => idx += 1,
        }
    }
}
