use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use vaultpress_core::config::DuplicatePolicy;
use vaultpress_core::report::NullReporter;
use vaultpress_core::rewrite::{BodyContext, rewrite_body};
use vaultpress_core::{AlternateLinkMap, RewriteRules, VaultIndex};

#[test]
fn golden_note_body() {
    let input = include_str!("fixtures/heap_note.md");

    let index = VaultIndex::from_paths(
        Path::new("/vault"),
        ["Heap.md", "Graph Theory.md", "img/plot.png"].map(|f| PathBuf::from("/vault").join(f)),
        DuplicatePolicy::Warn,
        &NullReporter,
    )
    .unwrap();
    let alternates =
        AlternateLinkMap::from([("External Note".to_string(), "https://example.org/ext".to_string())]);
    let rules = RewriteRules::default();

    let body = rewrite_body(
        input,
        &BodyContext {
            note: "Heap Notes",
            index: &index,
            alternates: &alternates,
            rules: &rules,
            reporter: &NullReporter,
        },
    );

    assert_snapshot!(body);
}
