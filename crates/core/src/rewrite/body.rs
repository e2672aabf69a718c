//! Markdown body rewriting.
//!
//! Four stages run in a fixed order: wiki links, video embeds, display math,
//! code tabs. The first three only touch prose; code spans are computed once
//! and carried through so that the last stage can skip code as well.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::asset::AssetClass;
use super::rules::{CodeTabs, MathMacros, RewriteRules};
use super::slug::{slugify, slugify_anchor};
use crate::report::{Event, Reporter};
use crate::vault::extractor::WIKILINK_RE;
use crate::vault::{AlternateLinkMap, CodeSpans, Hyperlink, Segment, VaultIndex};

static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"!\[([^\]\r\n]*)\]\((?:https?://(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]+)[^)\s]*|https?://youtu\.be/([A-Za-z0-9_-]+)[^)\s]*)\)",
    )
    .expect("video regex is valid")
});

static MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").expect("math regex is valid"));

/// What a body rewrite needs to know about the vault.
pub struct BodyContext<'a> {
    /// Id of the note being rewritten, for messages.
    pub note: &'a str,
    pub index: &'a VaultIndex,
    pub alternates: &'a AlternateLinkMap,
    pub rules: &'a RewriteRules,
    pub reporter: &'a dyn Reporter,
}

/// Rewrite a note body for Hugo.
pub fn rewrite_body(body: &str, ctx: &BodyContext<'_>) -> String {
    let mut text = SegmentedText::new(body, &CodeSpans::scan(body));
    text.map_prose(|prose| rewrite_links(prose, ctx));
    text.map_prose(embed_videos);
    text.map_prose(|prose| escape_math(prose, &ctx.rules.math_macros));
    let (joined, spans) = text.join();
    wrap_code_tabs(&joined, &spans, &ctx.rules.code_tabs)
}

/// A document cut into prose and code pieces so prose can be rewritten
/// without disturbing code.
struct SegmentedText {
    pieces: Vec<(bool, String)>,
}

impl SegmentedText {
    fn new(text: &str, spans: &CodeSpans) -> Self {
        let pieces = spans
            .segments(text)
            .into_iter()
            .map(|segment| match segment {
                Segment::Prose(s) => (false, s.to_string()),
                Segment::Code(s) => (true, s.to_string()),
            })
            .collect();
        Self { pieces }
    }

    fn map_prose(&mut self, mut f: impl FnMut(&str) -> String) {
        for (is_code, piece) in &mut self.pieces {
            if !*is_code {
                *piece = f(piece);
            }
        }
    }

    /// Concatenate the pieces, returning where the code ended up.
    fn join(self) -> (String, CodeSpans) {
        let mut out = String::new();
        let mut spans: Vec<Range<usize>> = Vec::new();
        for (is_code, piece) in self.pieces {
            if is_code {
                spans.push(out.len()..out.len() + piece.len());
            }
            out.push_str(&piece);
        }
        (out, CodeSpans::from_ranges(spans))
    }
}

/// Stage 1: wiki links to Hugo links, asset links and external links.
fn rewrite_links(prose: &str, ctx: &BodyContext<'_>) -> String {
    WIKILINK_RE
        .replace_all(prose, |caps: &Captures<'_>| {
            match Hyperlink::from_captures(caps, 0) {
                Some(link) => render_link(&link, ctx),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn render_link(link: &Hyperlink, ctx: &BodyContext<'_>) -> String {
    let label = link.label();

    if link.is_anchor() {
        let anchor = link.section.as_deref().map(slugify_anchor).unwrap_or_default();
        return format!("[{label}]({{{{< relref \"#{anchor}\" >}}}})");
    }

    let name = link.name();

    if link.is_asset() {
        return render_asset(link, name, label, ctx);
    }

    if let Some(url) = ctx.alternates.get(name) {
        return format!("[{label}]({url})");
    }

    let mut target = format!("{}.md", slugify(name));
    if let Some(section) = &link.section {
        target.push('#');
        target.push_str(&slugify_anchor(section));
    }
    format!("[{label}]({{{{< relref \"{target}\" >}}}})")
}

fn render_asset(link: &Hyperlink, name: &str, label: String, ctx: &BodyContext<'_>) -> String {
    if ctx.rules.routes.locate(ctx.index, name).is_none() {
        ctx.reporter.report(Event::MissingAsset {
            id: name.to_string(),
            note: ctx.note.to_string(),
        });
        return label;
    }

    let url = ctx.rules.routes.url(name);
    if link.embed && AssetClass::of(name).is_visual() {
        format!("![{label}]({url})")
    } else {
        format!("[{label}]({url})")
    }
}

/// Stage 2: YouTube image links to the `youtube` shortcode.
fn embed_videos(prose: &str) -> String {
    VIDEO_RE
        .replace_all(prose, |caps: &Captures<'_>| {
            let id = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            let title = caps[1].trim();
            if title.is_empty() {
                format!("{{{{< youtube id=\"{id}\" >}}}}")
            } else {
                let title = title.replace('"', "\\\"");
                format!("{{{{< youtube id=\"{id}\" title=\"{title}\" >}}}}")
            }
        })
        .into_owned()
}

/// Stage 3: escape display math so Hugo's markdown renderer leaves it alone.
fn escape_math(prose: &str, macros: &MathMacros) -> String {
    MATH_RE
        .replace_all(prose, |caps: &Captures<'_>| {
            format!("$${}$$", escape_tex(&macros.apply(&caps[1])))
        })
        .into_owned()
}

fn escape_tex(tex: &str) -> String {
    let mut out = String::with_capacity(tex.len() + tex.len() / 4);
    for c in tex.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            _ => out.push(c),
        }
    }
    out
}

/// Stage 4: wrap everything under a code heading in tab markers.
///
/// The wrapped region runs from the line after the heading to the next
/// heading of any level. Regions holding only whitespace are left alone.
fn wrap_code_tabs(text: &str, spans: &CodeSpans, tabs: &CodeTabs) -> String {
    let mut headings: Vec<(Range<usize>, bool)> = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if !spans.contains(offset)
            && let Some(title) = heading_text(line)
        {
            headings.push((offset..offset + line.len(), title == tabs.heading));
        }
        offset += line.len();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (i, (line, is_code)) in headings.iter().enumerate() {
        if !is_code {
            continue;
        }
        let end = headings.get(i + 1).map_or(text.len(), |(next, _)| next.start);
        let region = &text[line.end..end];
        let kept = region.trim_end();
        if kept.trim().is_empty() {
            continue;
        }

        out.push_str(&text[cursor..line.end]);
        out.push_str(&tabs.open);
        out.push('\n');
        out.push_str(kept);
        out.push('\n');
        out.push_str(&tabs.close);
        out.push('\n');
        let tail = &region[kept.len()..];
        out.push_str(tail.find('\n').map_or("", |nl| &tail[nl + 1..]));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Text of an ATX heading line, without markers.
fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    let rest = trimmed.strip_prefix("   ").or_else(|| trimmed.strip_prefix("  "));
    let rest = rest.or_else(|| trimmed.strip_prefix(' ')).unwrap_or(trimmed);

    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let title = after.trim();
    let title = title.trim_end_matches('#').trim_end();
    Some(title)
}
