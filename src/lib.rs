//! Treemark - render laid-out trees into a vector scene graph
//!
//! This library takes the output of a tree layout (node coordinates, an
//! edge table and per-entity styling) and builds grouped drawable
//! primitives: edge paths, node markers and text labels, for the
//! rightward, leftward, upward, downward and radial layouts.
//!
//! # Example
//!
//! ```rust
//! use treemark::{render, Point, TreeMark};
//!
//! let mark = TreeMark::new(
//!     vec![Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 0.5)],
//!     vec![(2, 0), (2, 1)],
//! )
//! .with_tip_labels(["a", "b"]);
//!
//! let scene = render(&mark).unwrap();
//! assert_eq!(scene.count("path"), 2);
//! ```

pub mod error;
pub mod geometry;
pub mod mark;
pub mod render;
pub mod scene;
pub mod style;

pub use error::RenderError;
pub use geometry::{Axes, AxesConfig, Cartesian, GeometryError, Point, Projection};
pub use mark::{
    AdmixtureEdge, EdgeStyle, Layout, MarkError, MarkFile, MarkFileError, Proportion, TreeMark,
};
pub use render::{Render, RenderContext, SceneConfig};
pub use scene::{Element, SceneGroup};
pub use style::Style;

use style::fmt_num;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Canvas and projection configuration
    pub axes: AxesConfig,
    /// Scene graph configuration
    pub scene: SceneConfig,
    /// Debug mode: dump the scene outline to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axes configuration
    pub fn with_axes(mut self, config: AxesConfig) -> Self {
        self.axes = config;
        self
    }

    /// Set the scene configuration
    pub fn with_scene(mut self, config: SceneConfig) -> Self {
        self.scene = config;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a tree mark with default configuration
///
/// Returns a detached `svg` root element containing the tree mark group.
pub fn render(mark: &TreeMark) -> Result<Element, RenderError> {
    render_with_config(mark, RenderConfig::default())
}

/// Render a tree mark with custom configuration
///
/// # Example
///
/// ```rust
/// use treemark::{render_with_config, AxesConfig, Point, RenderConfig, SceneConfig, TreeMark};
///
/// let mark = TreeMark::new(vec![Point::new(1.0, 0.0), Point::new(0.0, 0.0)], vec![(1, 0)]);
/// let config = RenderConfig::new()
///     .with_axes(AxesConfig::default().with_size(200.0, 100.0))
///     .with_scene(SceneConfig::default().with_class_prefix("tm-"));
///
/// let scene = render_with_config(&mark, config).unwrap();
/// assert!(scene.find_class("tm-Edges").is_some());
/// ```
pub fn render_with_config(mark: &TreeMark, config: RenderConfig) -> Result<Element, RenderError> {
    let axes = Cartesian::fit(mark, &config.axes);
    let (width, height) = (config.axes.width, config.axes.height);

    let mut root = Element::new("svg")
        .with_attr("width", fmt_num(width))
        .with_attr("height", fmt_num(height))
        .with_attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)));

    let mut ctx = RenderContext::new(&mut root, &axes, &config.scene);
    mark.render(&mut ctx)?;

    if config.debug {
        eprintln!("=== Scene Debug ===");
        eprint!("{}", root.outline());
        eprintln!("===================");
    }

    Ok(root)
}
