//! Tree marks loaded from TOML documents

use pretty_assertions::assert_eq;

use treemark::mark::file::load_mark;
use treemark::{render, Layout, MarkError, MarkFileError};

const DOWN_TREE: &str = r#"
layout = "d"
edge_type = "p"
coords = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.5, 1.0], [1.25, 2.0]]
edges = [[4, 3], [4, 2], [3, 0], [3, 1]]
tip_labels = ["a", "b", "c"]
tip_labels_colors = ["", "red", ""]
tip_labels_style = { "font-size" = "14px" }
node_sizes = [0, 0, 0, 5, 5]
node_markers = ["o", "o", "o", "s", "^"]
node_labels = ["", "", "", "x", ""]
admixture_edges = [{ src = 0, dest = 2, prop = 0.5, label = "10%" }]
"#;

#[test]
fn test_toml_to_scene() {
    let mark = load_mark(DOWN_TREE).unwrap();
    assert_eq!(mark.layout, Layout::Down);
    assert_eq!(mark.tip_color(1), Some("red"));

    let scene = render(&mark).unwrap();
    let nodes = scene.find_class("toytree-Nodes").unwrap();
    assert_eq!(nodes.children.len(), 2);
    assert_eq!(nodes.children[0].count("rect"), 1);
    assert_eq!(nodes.children[1].count("polygon"), 1);

    let admix = scene.find_class("toytree-AdmixEdges").unwrap();
    assert_eq!(admix.count("text"), 1);

    let tips = scene.find_class("toytree-TipLabels").unwrap();
    assert_eq!(tips.style().get("font-size"), Some("14px"));
    let colored: Vec<&str> = tips
        .children
        .iter()
        .flat_map(|g| g.children.iter())
        .filter_map(|t| t.attr("style"))
        .collect();
    assert_eq!(colored.len(), 1);
}

#[test]
fn test_length_mismatch_reports_field() {
    let source = "coords = [[1.0, 0.0], [0.0, 0.0]]\nedges = [[1, 0]]\nnode_sizes = [1.0]\n";
    let err = load_mark(source).unwrap_err();
    match err {
        MarkFileError::Mark(MarkError::LengthMismatch { field, .. }) => {
            assert_eq!(field, "node_sizes")
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_syntax_error_has_context() {
    let source = "coords = [[1.0, 0.0]\n";
    let err = load_mark(source).unwrap_err();
    let report = err.format(source, "broken.toml");
    assert!(report.contains("broken.toml"));
}
