//! URL-safe names for notes, assets and headings.

/// Slug of a file or note name.
///
/// Everything before the first `.` is lowercased, runs of characters outside
/// `[a-z0-9]` become a single `-`, and leading or trailing dashes are dropped.
/// The part from the first `.` on is kept, lowercased, as the extension.
pub fn slugify(name: &str) -> String {
    match name.split_once('.') {
        Some((base, ext)) => format!("{}.{}", dashed(base), ext.to_lowercase()),
        None => dashed(name),
    }
}

/// Slug of a heading, used as an in-page anchor. Dots are not special.
pub fn slugify_anchor(section: &str) -> String {
    dashed(section)
}

fn dashed(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Graph Theory", "graph-theory")]
    #[case("My Note!!.md", "my-note.md")]
    #[case("  C++ / Rust: notes!  ", "c-rust-notes")]
    #[case("Dijkstra's Algorithm", "dijkstra-s-algorithm")]
    #[case("already-slugged", "already-slugged")]
    #[case("Café Notes", "caf-notes")]
    #[case("Plot 1.PNG", "plot-1.png")]
    #[case("My Drawing.excalidraw", "my-drawing.excalidraw")]
    #[case("archive.tar.gz", "archive.tar.gz")]
    #[case("---", "")]
    fn slugs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    #[case("Time Complexity", "time-complexity")]
    #[case("Step 2.1: Relax", "step-2-1-relax")]
    fn anchors(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify_anchor(input), expected);
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["Graph Theory", "Plot 1.PNG", "a--b", "X.excalidraw", "My Note!!.md"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }
}
