//! Routing of admixture edges between two branches
//!
//! An admixture edge leaves the source branch part of the way toward the
//! source's parent, crosses to the destination branch and ends at the depth
//! of the destination's parent. When the two branches overlap in depth and
//! the caller gave one shared proportion, both midpoints land on a single
//! depth so the connector runs perpendicular to the depth axis.
//!
//! Coordinates below are split into `depth` (screen x for rightward and
//! leftward trees, screen y for upward and downward ones) and `perp`.

use crate::mark::{AdmixtureEdge, EdgeStyle, Layout, Proportion};

use super::error::GeometryError;
use super::path::ResolvedPath;
use super::projection::Projection;
use super::Point;

/// A branch in depth/perpendicular coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
struct Branch {
    depth: f64,
    perp: f64,
    parent_depth: f64,
    parent_perp: f64,
}

impl Branch {
    /// Perpendicular offset that keeps a point at `mid` on a diagonal branch
    fn shift_at(&self, mid: f64) -> f64 {
        if self.parent_perp - self.perp == 0.0 {
            return 0.0;
        }
        let theta = ((self.parent_depth - self.depth) / (self.parent_perp - self.perp)).atan();
        let shift = (mid - self.depth) / theta.tan();
        if shift.is_finite() {
            shift
        } else {
            log::warn!("degenerate admixture branch at depth {:.3}; no shift applied", mid);
            0.0
        }
    }
}

/// A routed admixture edge in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedAdmixture {
    /// Source, source midpoint, destination midpoint, destination end
    pub points: [Point; 4],
    /// Depth of the source and destination midpoints
    pub mids: (f64, f64),
    /// Text anchor for the edge label, present when the edge has one
    pub label_pos: Option<Point>,
}

impl RoutedAdmixture {
    pub fn path(&self) -> ResolvedPath {
        ResolvedPath::polyline(&self.points)
    }

    /// Whether both midpoints resolved to one shared depth
    pub fn is_level(&self) -> bool {
        self.mids.0 == self.mids.1
    }
}

/// Whether the depth intervals of the two branches do not overlap
///
/// The test is the same interval check on every linear layout, mirrored for
/// trees whose depth decreases away from the root.
pub fn branches_disjoint(layout: Layout, src: (f64, f64), dest: (f64, f64)) -> bool {
    let (sy, psy) = src;
    let (dy, pdy) = dest;
    match layout {
        Layout::Right | Layout::Down => psy >= dy || sy <= pdy,
        Layout::Left | Layout::Up | Layout::Radial => psy <= dy || sy >= pdy,
    }
}

/// Routes admixture edges over one projected tree
#[derive(Debug, Clone, Copy)]
pub struct AdmixtureRouter<'a> {
    edges: &'a [(usize, usize)],
    proj: &'a Projection,
    layout: Layout,
    style: EdgeStyle,
    label_offset: f64,
}

impl<'a> AdmixtureRouter<'a> {
    pub fn new(
        edges: &'a [(usize, usize)],
        proj: &'a Projection,
        layout: Layout,
        style: EdgeStyle,
    ) -> Self {
        Self {
            edges,
            proj,
            layout,
            style,
            label_offset: 12.0,
        }
    }

    /// Perpendicular nudge of labels on rightward and leftward trees
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    fn parent_of(&self, node: usize) -> Result<usize, GeometryError> {
        self.edges
            .iter()
            .find(|(_, child)| *child == node)
            .map(|(parent, _)| *parent)
            .ok_or_else(|| GeometryError::root_endpoint(node))
    }

    /// A screen point split into (depth, perp)
    fn split(&self, p: Point) -> (f64, f64) {
        if self.layout.depth_is_x() {
            (p.x, p.y)
        } else {
            (p.y, p.x)
        }
    }

    fn join(&self, depth: f64, perp: f64) -> Point {
        if self.layout.depth_is_x() {
            Point::new(depth, perp)
        } else {
            Point::new(perp, depth)
        }
    }

    fn branch(&self, node: usize) -> Result<Branch, GeometryError> {
        let nnodes = self.proj.len();
        if node >= nnodes {
            return Err(GeometryError::out_of_range(node, nnodes));
        }
        let parent = self.parent_of(node)?;
        let (depth, perp) = self.split(self.proj.node(node));
        let (parent_depth, parent_perp) = self.split(self.proj.node(parent));
        Ok(Branch {
            depth,
            perp,
            parent_depth,
            parent_perp,
        })
    }

    /// Midpoint depth of the source and destination branches
    fn midpoints(&self, src: &Branch, dest: &Branch, proportion: Proportion) -> (f64, f64) {
        let (sp, dp) = proportion.pair();
        let (sy, psy) = (src.depth, src.parent_depth);
        let (dy, pdy) = (dest.depth, dest.parent_depth);
        let disjoint = branches_disjoint(self.layout, (sy, psy), (dy, pdy));

        if disjoint || !proportion.is_shared() {
            return match self.layout {
                Layout::Right | Layout::Down => {
                    (sy - (sy - psy).abs() * sp, dy - (dy - pdy).abs() * dp)
                }
                _ => (sy + (sy - psy).abs() * sp, dy + (dy - pdy).abs() * dp),
            };
        }

        let mid = match self.layout {
            Layout::Right => {
                let (amin, amax) = (sy.min(dy), psy.max(pdy));
                amin + (amax - amin) * sp
            }
            Layout::Down => {
                let (amin, amax) = (sy.min(dy), psy.max(pdy));
                amin - (amax - amin).abs() * sp
            }
            _ => {
                let (amin, amax) = (sy.max(dy), psy.min(pdy));
                amin + (amax - amin).abs() * sp
            }
        };
        (mid, mid)
    }

    /// Route one admixture edge
    pub fn route(&self, edge: &AdmixtureEdge) -> Result<RoutedAdmixture, GeometryError> {
        if self.layout.is_radial() {
            return Err(GeometryError::UnsupportedLayout {
                layout: self.layout,
            });
        }
        let src = self.branch(edge.src)?;
        let dest = self.branch(edge.dest)?;
        let (src_mid, dest_mid) = self.midpoints(&src, &dest, edge.proportion);

        // straight branches are diagonal, so midpoints slide along them
        let (src_shift, dest_shift, end_perp) = match self.style {
            EdgeStyle::Straight => (
                src.shift_at(src_mid),
                dest.shift_at(dest_mid),
                dest.parent_perp,
            ),
            _ => (0.0, 0.0, dest.perp),
        };

        let src_mid_perp = src.perp + src_shift;
        let dest_mid_perp = dest.perp + dest_shift;
        let points = [
            self.join(src.depth, src.perp),
            self.join(src_mid, src_mid_perp),
            self.join(dest_mid, dest_mid_perp),
            self.join(dest.parent_depth, end_perp),
        ];

        let label_pos = edge.label.as_ref().map(|_| {
            let depth = (src_mid + dest_mid) / 2.0;
            let mut perp = (src_mid_perp + dest_mid_perp) / 2.0;
            if self.layout.depth_is_x() {
                perp += self.label_offset;
            }
            self.join(depth, perp)
        });

        Ok(RoutedAdmixture {
            points,
            mids: (src_mid, dest_mid),
            label_pos,
        })
    }
}
