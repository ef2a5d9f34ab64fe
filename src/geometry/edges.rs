//! Tree edge paths, including the radial arc construction

use crate::mark::{EdgeStyle, Layout};

use super::path::{ArcParams, PathParams, PathTemplate, ResolvedPath};
use super::projection::Projection;
use super::Point;

/// Offsets added to the root position so the origin never coincides with a
/// node coordinate in the angle computation
pub const ORIGIN_NUDGE: Point = Point {
    x: 0.000000123,
    y: 0.000000321,
};

/// A built path for one edge-table row
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    /// Row in the edge table
    pub row: usize,
    pub parent: usize,
    pub child: usize,
    pub path: ResolvedPath,
}

impl EdgePath {
    /// Stable `"parent,child"` identifier
    pub fn key(&self) -> String {
        format!("{},{}", self.parent, self.child)
    }

    pub fn d(&self) -> String {
        self.path.to_svg_d()
    }
}

/// Arc from a child to the parent's radius circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialArc {
    /// Angle of the child seen from the origin
    pub theta: f64,
    /// Arc end point on the parent's radius circle
    pub end: Point,
    pub radius: f64,
    pub sweep: bool,
}

impl RadialArc {
    pub fn is_finite(&self) -> bool {
        self.theta.is_finite() && self.end.is_finite() && self.radius.is_finite()
    }

    pub fn params(&self) -> ArcParams {
        ArcParams {
            end: self.end,
            radius: self.radius,
            sweep: self.sweep,
        }
    }
}

/// The root's screen position nudged off any exact alignment
pub fn nudged_origin(root: Point) -> Point {
    Point::new(root.x + ORIGIN_NUDGE.x, root.y + ORIGIN_NUDGE.y)
}

/// Compute the arc a radial edge sweeps from `child` to the parent's circle
///
/// `radius` is the parent's distance from `origin` in screen units.
pub fn radial_arc(child: Point, parent: Point, origin: Point, radius: f64) -> RadialArc {
    let theta = ((origin.y - child.y) / (child.x - origin.x)).atan();

    let end = if child.x >= origin.x {
        Point::new(
            origin.x + theta.cos() * radius,
            origin.y - theta.sin() * radius,
        )
    } else {
        Point::new(
            origin.x - theta.cos() * radius,
            origin.y + theta.sin() * radius,
        )
    };

    RadialArc {
        theta,
        end,
        radius,
        sweep: sweep_flag(parent, end, origin),
    }
}

/// Arc direction that keeps the arc outside the tree interior
///
/// Cases split on which side of the origin's horizontal the parent and the
/// arc end fall, then on whether the parent lies right of the arc end.
pub fn sweep_flag(parent: Point, end: Point, origin: Point) -> bool {
    if parent.y <= origin.y {
        if end.y <= origin.y {
            parent.x >= end.x
        } else {
            true
        }
    } else if end.y >= origin.y {
        parent.x < end.x
    } else {
        false
    }
}

/// Build one path per edge, emitted tip-to-root (edge table read in reverse)
pub fn edge_paths(
    edges: &[(usize, usize)],
    proj: &Projection,
    layout: Layout,
    style: EdgeStyle,
) -> Vec<EdgePath> {
    let template = PathTemplate::select(layout, style);
    let radial = match (template, proj.radii.as_ref(), proj.is_empty()) {
        (PathTemplate::Arc, Some(radii), false) => Some((radii, nudged_origin(proj.root()))),
        _ => None,
    };

    edges
        .iter()
        .enumerate()
        .rev()
        .map(|(row, &(parent, child))| {
            let c = proj.node(child);
            let p = proj.node(parent);
            let mut params = PathParams::new(c, p);

            if let Some((radii, origin)) = radial {
                let arc = radial_arc(c, p, origin, radii[parent] - origin.x);
                log::trace!(
                    "edge {},{}: theta={:.4} d=({:.3},{:.3}) flag={}",
                    parent,
                    child,
                    arc.theta,
                    arc.end.x,
                    arc.end.y,
                    arc.sweep as u8
                );
                if arc.is_finite() {
                    params = params.with_arc(arc.params());
                } else {
                    log::warn!(
                        "degenerate arc for edge {},{}; drawing a straight segment",
                        parent,
                        child
                    );
                }
            }

            EdgePath {
                row,
                parent,
                child,
                path: template.resolve(&params),
            }
        })
        .collect()
}

/// Straight paths from each tip's natural position to its aligned position
pub fn align_paths(proj: &Projection, ntips: usize) -> Vec<ResolvedPath> {
    let Some(tips) = proj.tips.as_ref() else {
        return vec![];
    };
    (0..ntips.min(tips.len()))
        .map(|tidx| PathTemplate::Line.resolve(&PathParams::new(proj.node(tidx), tips[tidx])))
        .collect()
}
