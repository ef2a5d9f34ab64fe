//! The tree mark: immutable input tables produced by an upstream layout
//!
//! A [`TreeMark`] bundles everything a render pass consumes: node
//! coordinates, the edge table, layout and edge style, per-entity style
//! overrides, label text and admixture edge descriptors. Per-entity arrays
//! left empty mean "unset for every entity".

pub mod file;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Point;
use crate::render::markers::Marker;
use crate::style::Style;

pub use file::{MarkFile, MarkFileError};

/// Errors for inconsistent input tables
#[derive(Debug, Error, PartialEq)]
pub enum MarkError {
    #[error("unknown layout '{0}' (expected one of r, l, u, d, c)")]
    UnknownLayout(String),

    #[error("unknown edge type '{0}' (expected one of c, p, b)")]
    UnknownEdgeType(String),

    #[error("invalid marker shape '{0}'")]
    InvalidMarker(String),

    #[error("{field} has {found} entries but {expected} were expected")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("edge {edge} references node {node} but there are only {nnodes} nodes")]
    EdgeOutOfRange {
        edge: usize,
        node: usize,
        nnodes: usize,
    },

    #[error("{ntips} tip labels for a tree of {nnodes} nodes")]
    TooManyTips { ntips: usize, nnodes: usize },

    #[error("the radial layout requires one radius per node")]
    MissingRadii,

    #[error("a tree mark needs at least one node")]
    Empty,
}

impl MarkError {
    fn length(field: &'static str, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            field,
            expected,
            found,
        }
    }
}

/// Overall tree orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Root on the left, tips on the right
    #[default]
    Right,
    /// Root on the right, tips on the left
    Left,
    /// Root at the bottom, tips at the top
    Up,
    /// Root at the top, tips at the bottom
    Down,
    /// Root at the center, tips on a circle
    Radial,
}

impl Layout {
    pub fn is_radial(&self) -> bool {
        matches!(self, Layout::Radial)
    }

    /// Depth runs along the screen x axis (rightward and leftward trees)
    pub fn depth_is_x(&self) -> bool {
        matches!(self, Layout::Right | Layout::Left)
    }

    /// One-letter code used in input files
    pub fn code(&self) -> &'static str {
        match self {
            Layout::Right => "r",
            Layout::Left => "l",
            Layout::Up => "u",
            Layout::Down => "d",
            Layout::Radial => "c",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Right => "right",
            Layout::Left => "left",
            Layout::Up => "up",
            Layout::Down => "down",
            Layout::Radial => "radial",
        };
        f.write_str(name)
    }
}

impl FromStr for Layout {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "right" => Ok(Layout::Right),
            "l" | "left" => Ok(Layout::Left),
            "u" | "up" => Ok(Layout::Up),
            "d" | "down" => Ok(Layout::Down),
            "c" | "circular" | "radial" => Ok(Layout::Radial),
            _ => Err(MarkError::UnknownLayout(s.to_string())),
        }
    }
}

/// Interpolation shape of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    /// Single segment from child to parent (phylogram)
    #[default]
    Straight,
    /// Corner at the parent's depth (cladogram)
    RightAngled,
    /// Cubic curve through the corner position
    Curved,
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeStyle::Straight => "straight",
            EdgeStyle::RightAngled => "right-angled",
            EdgeStyle::Curved => "curved",
        };
        f.write_str(name)
    }
}

impl FromStr for EdgeStyle {
    type Err = MarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "straight" | "phylogram" => Ok(EdgeStyle::Straight),
            "p" | "right-angled" | "cladogram" => Ok(EdgeStyle::RightAngled),
            "b" | "curved" | "bezier" => Ok(EdgeStyle::Curved),
            _ => Err(MarkError::UnknownEdgeType(s.to_string())),
        }
    }
}

/// Fraction along each branch at which an admixture edge attaches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proportion {
    /// One fraction for both endpoints; may produce a shared mid-depth
    Shared(f64),
    /// Independent fractions for source and destination
    Independent(f64, f64),
}

impl Proportion {
    /// Fractions for (source, destination), broadcasting a shared value
    pub fn pair(&self) -> (f64, f64) {
        match *self {
            Proportion::Shared(p) => (p, p),
            Proportion::Independent(s, d) => (s, d),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Proportion::Shared(_))
    }
}

impl Default for Proportion {
    fn default() -> Self {
        Proportion::Shared(0.5)
    }
}

/// An auxiliary edge between two branches outside the tree topology
#[derive(Debug, Clone, PartialEq)]
pub struct AdmixtureEdge {
    pub src: usize,
    pub dest: usize,
    pub proportion: Proportion,
    /// Style for this edge; the group default applies when absent
    pub style: Option<Style>,
    pub label: Option<String>,
}

impl AdmixtureEdge {
    pub fn new(src: usize, dest: usize) -> Self {
        Self {
            src,
            dest,
            proportion: Proportion::default(),
            style: None,
            label: None,
        }
    }

    pub fn with_proportion(mut self, proportion: Proportion) -> Self {
        self.proportion = proportion;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Default shared edge style
pub fn default_edge_style() -> Style {
    Style::from([
        ("stroke", "#262626"),
        ("stroke-linecap", "round"),
        ("stroke-opacity", "1"),
        ("stroke-width", "2"),
    ])
}

/// Default style of the edges extending tips to an aligned baseline
pub fn default_edge_align_style() -> Style {
    Style::from([
        ("stroke", "darkgrey"),
        ("stroke-dasharray", "2,4"),
        ("stroke-linecap", "round"),
        ("stroke-width", "2"),
    ])
}

/// Default shared node marker style
pub fn default_node_style() -> Style {
    Style::from([("fill", "rgb(40%,76.1%,64.7%)"), ("stroke", "none")])
}

/// Default node label style
pub fn default_node_labels_style() -> Style {
    Style::from([("fill", "#262626"), ("font-size", "9px")])
}

/// Input tables for one tree render
///
/// Node `i` has layout coordinates `coords[i]`; the root is the last node
/// and tips are nodes `0..ntips()`. Edges are `(parent, child)` pairs
/// ordered root to tip.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMark {
    pub coords: Vec<Point>,
    pub edges: Vec<(usize, usize)>,
    /// Distance of each node from the origin, required by the radial layout
    pub radii: Option<Vec<f64>>,
    pub layout: Layout,
    pub edge_type: EdgeStyle,

    pub edge_style: Style,
    pub edge_align_style: Style,
    pub edge_colors: Vec<Option<String>>,
    pub edge_widths: Vec<Option<f64>>,

    pub node_style: Style,
    pub node_sizes: Vec<Option<f64>>,
    pub node_markers: Vec<Marker>,
    pub node_colors: Vec<Option<String>>,
    pub node_labels: Vec<Option<String>>,
    pub node_labels_style: Style,
    pub node_labels_colors: Vec<Option<String>>,
    pub node_hover: Vec<Option<String>>,

    pub tip_labels: Vec<Option<String>>,
    /// Rotation of each tip label in degrees, clockwise in screen space
    pub tip_labels_angles: Vec<f64>,
    pub tip_labels_colors: Vec<Option<String>>,
    pub tip_labels_style: Style,
    pub tip_labels_align: bool,
    /// Layout-space x of the aligned tip baseline (rightward and leftward trees)
    pub xbaseline: f64,
    /// Layout-space y of the aligned tip baseline (upward and downward trees)
    pub ybaseline: f64,

    pub admixture_edges: Vec<AdmixtureEdge>,
}

impl TreeMark {
    /// Create a mark from node coordinates and `(parent, child)` edges
    pub fn new(coords: Vec<Point>, edges: Vec<(usize, usize)>) -> Self {
        Self {
            coords,
            edges,
            radii: None,
            layout: Layout::default(),
            edge_type: EdgeStyle::default(),
            edge_style: default_edge_style(),
            edge_align_style: default_edge_align_style(),
            edge_colors: vec![],
            edge_widths: vec![],
            node_style: default_node_style(),
            node_sizes: vec![],
            node_markers: vec![],
            node_colors: vec![],
            node_labels: vec![],
            node_labels_style: default_node_labels_style(),
            node_labels_colors: vec![],
            node_hover: vec![],
            tip_labels: vec![],
            tip_labels_angles: vec![],
            tip_labels_colors: vec![],
            tip_labels_style: Style::new(),
            tip_labels_align: false,
            xbaseline: 0.0,
            ybaseline: 0.0,
            admixture_edges: vec![],
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_edge_type(mut self, edge_type: EdgeStyle) -> Self {
        self.edge_type = edge_type;
        self
    }

    pub fn with_radii(mut self, radii: Vec<f64>) -> Self {
        self.radii = Some(radii);
        self
    }

    pub fn with_tip_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.tip_labels = labels.into_iter().map(|s| Some(s.into())).collect();
        self
    }

    pub fn with_tip_angles(mut self, angles: Vec<f64>) -> Self {
        self.tip_labels_angles = angles;
        self
    }

    /// Align tip labels on a baseline at layout coordinate `baseline`
    pub fn with_tip_alignment(mut self, baseline: f64) -> Self {
        self.tip_labels_align = true;
        self.xbaseline = baseline;
        self.ybaseline = baseline;
        self
    }

    pub fn with_node_sizes(mut self, sizes: Vec<Option<f64>>) -> Self {
        self.node_sizes = sizes;
        self
    }

    pub fn with_node_labels(mut self, labels: Vec<Option<String>>) -> Self {
        self.node_labels = labels;
        self
    }

    pub fn with_admixture_edge(mut self, edge: AdmixtureEdge) -> Self {
        self.admixture_edges.push(edge);
        self
    }

    pub fn nnodes(&self) -> usize {
        self.coords.len()
    }

    pub fn ntips(&self) -> usize {
        self.tip_labels.len()
    }

    pub fn node_size(&self, idx: usize) -> Option<f64> {
        self.node_sizes.get(idx).copied().flatten()
    }

    pub fn node_marker(&self, idx: usize) -> Marker {
        self.node_markers.get(idx).cloned().unwrap_or_default()
    }

    pub fn node_color(&self, idx: usize) -> Option<&str> {
        self.node_colors.get(idx).and_then(|c| c.as_deref())
    }

    pub fn node_label(&self, idx: usize) -> Option<&str> {
        self.node_labels.get(idx).and_then(|c| c.as_deref())
    }

    pub fn node_label_color(&self, idx: usize) -> Option<&str> {
        self.node_labels_colors.get(idx).and_then(|c| c.as_deref())
    }

    pub fn node_hover(&self, idx: usize) -> Option<&str> {
        self.node_hover.get(idx).and_then(|c| c.as_deref())
    }

    pub fn tip_angle(&self, tidx: usize) -> f64 {
        self.tip_labels_angles.get(tidx).copied().unwrap_or(0.0)
    }

    pub fn tip_color(&self, tidx: usize) -> Option<&str> {
        self.tip_labels_colors.get(tidx).and_then(|c| c.as_deref())
    }

    /// Check table lengths and index ranges
    pub fn validate(&self) -> Result<(), MarkError> {
        let nnodes = self.nnodes();
        if nnodes == 0 {
            return Err(MarkError::Empty);
        }
        let nedges = self.edges.len();

        for (edge, &(parent, child)) in self.edges.iter().enumerate() {
            for node in [parent, child] {
                if node >= nnodes {
                    return Err(MarkError::EdgeOutOfRange { edge, node, nnodes });
                }
            }
        }

        check_len("edge_colors", self.edge_colors.len(), nedges)?;
        check_len("edge_widths", self.edge_widths.len(), nedges)?;
        check_len("node_sizes", self.node_sizes.len(), nnodes)?;
        check_len("node_markers", self.node_markers.len(), nnodes)?;
        check_len("node_colors", self.node_colors.len(), nnodes)?;
        check_len("node_labels", self.node_labels.len(), nnodes)?;
        check_len("node_labels_colors", self.node_labels_colors.len(), nnodes)?;
        check_len("node_hover", self.node_hover.len(), nnodes)?;

        let ntips = self.ntips();
        if ntips > nnodes {
            return Err(MarkError::TooManyTips { ntips, nnodes });
        }
        check_len("tip_labels_angles", self.tip_labels_angles.len(), ntips)?;
        check_len("tip_labels_colors", self.tip_labels_colors.len(), ntips)?;

        if self.layout.is_radial() {
            match &self.radii {
                Some(radii) if radii.len() == nnodes => {}
                _ => return Err(MarkError::MissingRadii),
            }
        }
        Ok(())
    }
}

/// Per-entity arrays are either unset (empty) or one entry per entity
fn check_len(field: &'static str, found: usize, expected: usize) -> Result<(), MarkError> {
    if found == 0 || found == expected {
        Ok(())
    } else {
        Err(MarkError::length(field, expected, found))
    }
}
