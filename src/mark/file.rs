//! Loading tree marks from TOML documents
//!
//! Per-entity string arrays use an empty string for "unset":
//!
//! ```toml
//! layout = "r"
//! edge_type = "p"
//! coords = [[1.0, 0.0], [1.0, 1.0], [0.0, 0.5]]
//! edges = [[2, 0], [2, 1]]
//! tip_labels = ["a", "b"]
//! node_colors = ["red", "", ""]
//! admixture_edges = [{ src = 0, dest = 1, prop = 0.5, label = "20%" }]
//! ```

use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Point;
use crate::render::markers::Marker;
use crate::style::Style;

use super::{AdmixtureEdge, EdgeStyle, Layout, MarkError, Proportion, TreeMark};

/// Errors that can occur when loading a tree mark file
#[derive(Error, Debug)]
pub enum MarkFileError {
    #[error("failed to read tree mark file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tree mark TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid tree mark: {0}")]
    Mark(#[from] MarkError),
}

impl MarkFileError {
    /// Format the error with source context using ariadne
    ///
    /// Errors without a source location format as their message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = match self {
            MarkFileError::Toml(err) => err.span(),
            _ => None,
        };
        let Some(span) = span else {
            return format!("Error: {}\n", self);
        };
        let message = match self {
            MarkFileError::Toml(err) => err.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid tree mark file")
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", message),
        }
    }
}

/// Attachment fractions: one shared value or a `[src, dest]` pair
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProportionSpec {
    Shared(f64),
    Pair([f64; 2]),
}

impl From<ProportionSpec> for Proportion {
    fn from(spec: ProportionSpec) -> Self {
        match spec {
            ProportionSpec::Shared(p) => Proportion::Shared(p),
            ProportionSpec::Pair([s, d]) => Proportion::Independent(s, d),
        }
    }
}

/// One admixture edge entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdmixtureSpec {
    pub src: usize,
    pub dest: usize,
    pub prop: Option<ProportionSpec>,
    pub style: Option<Style>,
    pub label: Option<String>,
}

/// TOML structure of a tree mark document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkFile {
    pub layout: Option<String>,
    pub edge_type: Option<String>,
    pub coords: Vec<[f64; 2]>,
    pub edges: Vec<[usize; 2]>,
    pub radii: Option<Vec<f64>>,

    pub edge_style: Option<Style>,
    pub edge_align_style: Option<Style>,
    pub edge_colors: Vec<String>,
    pub edge_widths: Vec<f64>,

    pub node_style: Option<Style>,
    pub node_sizes: Vec<f64>,
    pub node_markers: Vec<String>,
    pub node_colors: Vec<String>,
    pub node_labels: Vec<String>,
    pub node_labels_style: Option<Style>,
    pub node_labels_colors: Vec<String>,
    pub node_hover: Vec<String>,

    pub tip_labels: Vec<String>,
    pub tip_labels_angles: Vec<f64>,
    pub tip_labels_colors: Vec<String>,
    pub tip_labels_style: Option<Style>,
    pub tip_labels_align: bool,
    pub xbaseline: f64,
    pub ybaseline: f64,

    pub admixture_edges: Vec<AdmixtureSpec>,
}

fn optional(values: Vec<String>) -> Vec<Option<String>> {
    values
        .into_iter()
        .map(|v| (!v.is_empty()).then_some(v))
        .collect()
}

impl MarkFile {
    /// Parse a tree mark document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, MarkFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a tree mark document
    pub fn from_file(path: &Path) -> Result<Self, MarkFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Build and validate the tree mark this document describes
    pub fn into_mark(self) -> Result<TreeMark, MarkError> {
        let coords = self.coords.iter().map(|[x, y]| Point::new(*x, *y)).collect();
        let edges = self.edges.iter().map(|[p, c]| (*p, *c)).collect();
        let mut mark = TreeMark::new(coords, edges);

        if let Some(layout) = &self.layout {
            mark.layout = layout.parse::<Layout>()?;
        }
        if let Some(edge_type) = &self.edge_type {
            mark.edge_type = edge_type.parse::<EdgeStyle>()?;
        }
        mark.radii = self.radii;

        if let Some(style) = self.edge_style {
            mark.edge_style = style;
        }
        if let Some(style) = self.edge_align_style {
            mark.edge_align_style = style;
        }
        mark.edge_colors = optional(self.edge_colors);
        mark.edge_widths = self.edge_widths.into_iter().map(Some).collect();

        if let Some(style) = self.node_style {
            mark.node_style = style;
        }
        mark.node_sizes = self.node_sizes.into_iter().map(Some).collect();
        mark.node_markers = self
            .node_markers
            .iter()
            .map(|m| m.parse::<Marker>())
            .collect::<Result<_, _>>()?;
        mark.node_colors = optional(self.node_colors);
        mark.node_labels = optional(self.node_labels);
        if let Some(style) = self.node_labels_style {
            mark.node_labels_style = style;
        }
        mark.node_labels_colors = optional(self.node_labels_colors);
        mark.node_hover = optional(self.node_hover);

        mark.tip_labels = self.tip_labels.into_iter().map(Some).collect();
        mark.tip_labels_angles = self.tip_labels_angles;
        mark.tip_labels_colors = optional(self.tip_labels_colors);
        if let Some(style) = self.tip_labels_style {
            mark.tip_labels_style = style;
        }
        mark.tip_labels_align = self.tip_labels_align;
        mark.xbaseline = self.xbaseline;
        mark.ybaseline = self.ybaseline;

        mark.admixture_edges = self
            .admixture_edges
            .into_iter()
            .map(|spec| AdmixtureEdge {
                src: spec.src,
                dest: spec.dest,
                proportion: spec.prop.map(Proportion::from).unwrap_or_default(),
                style: spec.style,
                label: spec.label,
            })
            .collect();

        mark.validate()?;
        Ok(mark)
    }
}

/// Parse and validate a tree mark from a TOML string
pub fn load_mark(content: &str) -> Result<TreeMark, MarkFileError> {
    Ok(MarkFile::from_str(content)?.into_mark()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markers::MarkerShape;

    const CHERRY: &str = r#"
layout = "l"
edge_type = "b"
coords = [[1.0, 0.0], [1.0, 1.0], [0.0, 0.5]]
edges = [[2, 0], [2, 1]]
tip_labels = ["a", "b"]
node_sizes = [4, 4, 6]
node_markers = ["o", "s", "r2x1"]
node_colors = ["red", "", ""]
edge_style = { stroke = "blue", "stroke-width" = 3 }
admixture_edges = [
    { src = 0, dest = 1, prop = 0.25, label = "x" },
    { src = 1, dest = 0, prop = [0.1, 0.9] },
]
"#;

    #[test]
    fn test_load_mark() {
        let mark = load_mark(CHERRY).unwrap();
        assert_eq!(mark.layout, Layout::Left);
        assert_eq!(mark.edge_type, EdgeStyle::Curved);
        assert_eq!(mark.edges, vec![(2, 0), (2, 1)]);
        assert_eq!(mark.node_color(0), Some("red"));
        assert_eq!(mark.node_color(1), None);
        assert_eq!(mark.node_marker(2).shape, MarkerShape::Rect { width: 2.0, height: 1.0 });
        assert_eq!(mark.edge_style.get("stroke-width"), Some("3"));
        assert_eq!(mark.admixture_edges[0].proportion, Proportion::Shared(0.25));
        assert_eq!(
            mark.admixture_edges[1].proportion,
            Proportion::Independent(0.1, 0.9)
        );
        // defaults survive for styles the file leaves out
        assert_eq!(mark.node_labels_style.get("font-size"), Some("9px"));
    }

    #[test]
    fn test_unknown_layout() {
        let err = load_mark("layout = \"q\"\ncoords = [[0.0, 0.0]]").unwrap_err();
        assert!(matches!(err, MarkFileError::Mark(MarkError::UnknownLayout(_))));
    }

    #[test]
    fn test_bad_marker() {
        let err = load_mark("coords = [[0.0, 0.0]]\nnode_markers = [\"?\"]").unwrap_err();
        assert!(matches!(err, MarkFileError::Mark(MarkError::InvalidMarker(_))));
    }

    #[test]
    fn test_toml_error_formats_with_context() {
        let source = "coords = [[0.0, 0.0]]\nedges = \"oops\"\n";
        let err = load_mark(source).unwrap_err();
        assert!(matches!(err, MarkFileError::Toml(_)));
        let formatted = err.format(source, "tree.toml");
        assert!(formatted.contains("tree.toml"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(MarkFile::from_str("colour = 1").is_err());
    }
}
