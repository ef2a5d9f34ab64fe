//! Scene construction for renderable marks
//!
//! Each mark kind implements [`Render`] once. A render runs its passes in
//! a fixed order against a [`RenderContext`] and attaches a single group to
//! the context's parent element, so a failed render leaves the parent as it
//! was.

pub mod config;
pub mod edges;
pub mod labels;
pub mod markers;
pub mod text;

pub use config::SceneConfig;
pub use labels::{tip_label_placement, TextAnchor, TipPlacement};
pub use markers::{Marker, MarkerPrimitives, MarkerShape, SvgPrimitives};
pub use text::{layout_text, FontMetrics, HelveticaMetrics, TextBox};

use crate::geometry::{Axes, Projection};
use crate::mark::TreeMark;
use crate::scene::{Element, SceneGroup};
use crate::RenderError;

/// Everything a mark needs to attach itself to a host scene
pub struct RenderContext<'a> {
    /// Element the rendered mark group is appended to
    pub parent: &'a mut Element,
    pub axes: &'a dyn Axes,
    pub scene: &'a SceneConfig,
    pub fonts: &'a dyn FontMetrics,
    pub primitives: &'a dyn MarkerPrimitives,
    next_id: usize,
}

impl<'a> RenderContext<'a> {
    /// A context using Helvetica metrics and plain SVG marker primitives
    pub fn new(parent: &'a mut Element, axes: &'a dyn Axes, scene: &'a SceneConfig) -> Self {
        Self {
            parent,
            axes,
            scene,
            fonts: &HelveticaMetrics,
            primitives: &SvgPrimitives,
            next_id: 0,
        }
    }

    pub fn with_fonts(mut self, fonts: &'a dyn FontMetrics) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_primitives(mut self, primitives: &'a dyn MarkerPrimitives) -> Self {
        self.primitives = primitives;
        self
    }

    /// A fresh element id, unique within this context
    pub fn next_id(&mut self, kind: &str) -> String {
        let id = format!("{}-{}", kind, self.next_id);
        self.next_id += 1;
        id
    }
}

/// A mark that can build its scene graph
pub trait Render {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;
}

impl Render for TreeMark {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        self.validate()?;
        log::debug!(
            "rendering tree mark: {} nodes, {} edges, {} layout",
            self.nnodes(),
            self.edges.len(),
            self.layout
        );

        let proj = Projection::project(self, ctx.axes);
        let scene = ctx.scene;

        let mut group = Element::group()
            .with_attr("class", SceneGroup::Mark.class(&scene.class_prefix))
            .with_attr("id", ctx.next_id("tree"));

        let passes = [
            edges::mark_edges(self, &proj, scene),
            edges::mark_align_edges(self, &proj, scene),
            edges::mark_admixture_edges(self, &proj, scene)?,
            markers::mark_nodes(self, &proj, scene, ctx.primitives),
            labels::mark_node_labels(self, &proj, scene, ctx.fonts),
            labels::mark_tip_labels(self, &proj, scene, ctx.fonts),
        ];
        group.children.extend(passes.into_iter().flatten());

        ctx.parent.push(group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cartesian, LinearScale, Point};
    use crate::mark::AdmixtureEdge;

    fn axes() -> Cartesian {
        Cartesian::new(
            LinearScale::new((0.0, 1.0), (0.0, 100.0)),
            LinearScale::new((0.0, 1.0), (100.0, 0.0)),
        )
    }

    fn cherry() -> TreeMark {
        TreeMark::new(
            vec![Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 0.5)],
            vec![(2, 0), (2, 1)],
        )
        .with_tip_labels(["a", "b"])
    }

    #[test]
    fn test_render_attaches_one_group() {
        let mut root = Element::new("svg");
        let axes = axes();
        let scene = SceneConfig::default();
        let mut ctx = RenderContext::new(&mut root, &axes, &scene);
        cherry().render(&mut ctx).unwrap();
        assert_eq!(ctx.next_id("tree"), "tree-1");

        assert_eq!(root.children.len(), 1);
        let mark = &root.children[0];
        assert_eq!(mark.attr("class"), Some("toytree-mark-Toytree"));
        assert_eq!(mark.attr("id"), Some("tree-0"));
        let classes: Vec<&str> = mark.children.iter().filter_map(|c| c.attr("class")).collect();
        assert_eq!(classes, vec!["toytree-Edges", "toytree-TipLabels"]);
    }

    #[test]
    fn test_failed_render_leaves_parent_untouched() {
        let mut root = Element::new("svg");
        let axes = axes();
        let scene = SceneConfig::default();
        let mut ctx = RenderContext::new(&mut root, &axes, &scene);
        let mark = cherry().with_admixture_edge(AdmixtureEdge::new(2, 0));
        assert!(mark.render(&mut ctx).is_err());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_repeated_renders_are_identical() {
        let axes = axes();
        let scene = SceneConfig::default();
        let mark = cherry().with_node_sizes(vec![Some(5.0), Some(5.0), Some(5.0)]);

        let mut first = Element::new("svg");
        mark.render(&mut RenderContext::new(&mut first, &axes, &scene)).unwrap();
        let mut second = Element::new("svg");
        mark.render(&mut RenderContext::new(&mut second, &axes, &scene)).unwrap();
        assert_eq!(first, second);
    }
}
