//! Custom separator tests.
//!
//! Separator configuration belongs to each builder, annotator and exporter
//! instance. Two configurations must never observe each other, whether
//! they run one after the other or on separate threads.

use annota::{
    NodeAnnotator, OutlineBuilder, PureNode, SeparatorConfig, SeparatorOverrides, annotate, export,
};

fn arrows() -> SeparatorConfig {
    SeparatorConfig::new()
        .with_node("*")
        .with_note("=>")
        .with_note_block("|")
        .with_escape("%")
}

// ============================================================================
// Equivalent Documents
// ============================================================================

#[test]
fn test_same_semantics_under_different_separators() {
    let default_tree = annotate("- Title: Note\n  > Detail\n  - Child", &SeparatorConfig::default());
    let arrow_tree = annotate("* Title=> Note\n  | Detail\n  * Child", &arrows());
    assert_eq!(default_tree, arrow_tree);
}

#[test]
fn test_escape_token_follows_configuration() {
    let tree = annotate("* x%=> y=> z", &arrows());
    assert_eq!(tree.children[0].content, "x=> y");
    assert_eq!(tree.children[0].inline_note.as_deref(), Some("z"));

    let tree = annotate("- x\\: y: z", &SeparatorConfig::default());
    assert_eq!(tree.children[0].content, "x: y");
    assert_eq!(tree.children[0].inline_note.as_deref(), Some("z"));
}

#[test]
fn test_export_uses_own_markers() {
    let config = arrows();
    let tree = annotate("* a: b=> c\n  | d", &config);
    let text = export(&tree, &config);
    assert_eq!(text, "* a: b=> c\n  | d\n");
    assert_eq!(annotate(&text, &config), tree);
}

// ============================================================================
// Isolation
// ============================================================================

#[test]
fn test_instances_do_not_share_configuration() {
    let custom = NodeAnnotator::new(arrows());
    let standard = NodeAnnotator::default();
    let node = PureNode::new("Title: Note=> Other");

    let by_custom = custom.annotate(&node);
    let by_standard = standard.annotate(&node);

    assert_eq!(by_custom.content, "Title: Note");
    assert_eq!(by_custom.inline_note.as_deref(), Some("Other"));
    assert_eq!(by_standard.content, "Title");
    assert_eq!(by_standard.inline_note.as_deref(), Some("Note=> Other"));

    // Using the custom instance first leaves the default one untouched
    assert_eq!(standard.config(), &SeparatorConfig::default());
}

#[test]
fn test_concurrent_annotators() {
    let standard_text = "- a: 1\n  > x\n".repeat(50);
    let arrow_text = "* a=> 1\n  | x\n".repeat(50);

    std::thread::scope(|scope| {
        let standard = scope.spawn(|| {
            let builder = OutlineBuilder::new(SeparatorConfig::default());
            let annotator = NodeAnnotator::new(SeparatorConfig::default());
            (0..20)
                .map(|_| annotator.annotate(&builder.build(&standard_text)))
                .collect::<Vec<_>>()
        });
        let arrow = scope.spawn(|| {
            let builder = OutlineBuilder::new(arrows());
            let annotator = NodeAnnotator::new(arrows());
            (0..20)
                .map(|_| annotator.annotate(&builder.build(&arrow_text)))
                .collect::<Vec<_>>()
        });

        let standard = standard.join().unwrap();
        let arrow = arrow.join().unwrap();
        assert_eq!(standard, arrow);
        for tree in &standard {
            assert_eq!(tree.children.len(), 50);
            assert!(tree.children.iter().all(|c| {
                c.content == "a"
                    && c.inline_note.as_deref() == Some("1")
                    && c.detailed_note.as_deref() == Some("x")
            }));
        }
    });
}

// ============================================================================
// Configuration Layers
// ============================================================================

#[test]
fn test_overrides_keep_unset_defaults() {
    let config = SeparatorConfig::from_overrides(SeparatorOverrides {
        note: Some("::".to_string()),
        ..Default::default()
    });
    assert_eq!(config.node(), "-");
    assert_eq!(config.note(), "::");
    assert_eq!(config.note_block(), ">");
    assert_eq!(config.escape(), "\\");

    let tree = annotate("- Lunch at 12:30 :: bring badge", &config);
    assert_eq!(tree.children[0].content, "Lunch at 12:30");
    assert_eq!(tree.children[0].inline_note.as_deref(), Some("bring badge"));
}

#[test]
fn test_disabled_inline_notes() {
    let config = SeparatorConfig::new().with_note("");
    let tree = annotate("- a: b\n  > c", &config);
    assert_eq!(tree.children[0].content, "a: b");
    assert_eq!(tree.children[0].inline_note, None);
    assert_eq!(tree.children[0].detailed_note.as_deref(), Some("c"));
}
