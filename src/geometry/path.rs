//! Edge path templates
//!
//! Every (layout, edge style) pair maps to one [`PathTemplate`], selected
//! once per render. A template turns a small [`PathParams`] value into
//! segments, and [`ResolvedPath::to_svg_d`] formats them with a fixed three
//! decimals so output is reproducible.

use crate::mark::{EdgeStyle, Layout};

use super::Point;

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Cubic Bezier curve with two control points
    CubicTo { c1: Point, c2: Point, end: Point },
    /// Circular arc to point
    ArcTo {
        end: Point,
        radius: f64,
        sweep: bool, // true = clockwise in SVG coordinates (y-down)
    },
}

/// A resolved path ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// A polyline through `points`
    pub fn polyline(points: &[Point]) -> Self {
        let segments = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathSegment::MoveTo(*p)
                } else {
                    PathSegment::LineTo(*p)
                }
            })
            .collect();
        Self { segments }
    }

    /// First point of the path
    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(segment_end)
    }

    /// Final point of the path
    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(segment_end)
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            let part = match seg {
                PathSegment::MoveTo(p) => format!("M {:.3} {:.3}", p.x, p.y),
                PathSegment::LineTo(p) => format!("L {:.3} {:.3}", p.x, p.y),
                PathSegment::CubicTo { c1, c2, end } => format!(
                    "C {:.3} {:.3}, {:.3} {:.3}, {:.3} {:.3}",
                    c1.x, c1.y, c2.x, c2.y, end.x, end.y
                ),
                PathSegment::ArcTo { end, radius, sweep } => {
                    // A rx ry x-axis-rotation large-arc-flag sweep-flag x y
                    let sw = if *sweep { 1 } else { 0 };
                    format!(
                        "A {:.3} {:.3} 0 0 {} {:.3} {:.3}",
                        radius, radius, sw, end.x, end.y
                    )
                }
            };
            parts.push(part);
        }
        parts.join(" ")
    }
}

fn segment_end(seg: &PathSegment) -> Point {
    match seg {
        PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
        PathSegment::CubicTo { end, .. } | PathSegment::ArcTo { end, .. } => *end,
    }
}

/// Arc geometry for radial edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Point on the parent's radius circle angularly aligned with the child
    pub end: Point,
    pub radius: f64,
    pub sweep: bool,
}

/// Inputs to a path template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParams {
    pub child: Point,
    pub parent: Point,
    pub arc: Option<ArcParams>,
}

impl PathParams {
    pub fn new(child: Point, parent: Point) -> Self {
        Self {
            child,
            parent,
            arc: None,
        }
    }

    pub fn with_arc(mut self, arc: ArcParams) -> Self {
        self.arc = Some(arc);
        self
    }
}

/// Path shapes, one per (layout, edge style) family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTemplate {
    /// `M c L p`
    Line,
    /// `M c L (px, cy) L p` for trees whose depth runs along x
    CornerDepthX,
    /// `M c L (cx, py) L p` for trees whose depth runs along y
    CornerDepthY,
    /// Cubic through the corner, depth along x
    CurveDepthX,
    /// Cubic through the corner, depth along y
    CurveDepthY,
    /// `M c A d L p` for radial trees
    Arc,
}

impl PathTemplate {
    /// The template for a layout and edge style
    ///
    /// Radial trees draw every non-straight style as an arc.
    pub fn select(layout: Layout, style: EdgeStyle) -> Self {
        match (style, layout) {
            (EdgeStyle::Straight, _) => PathTemplate::Line,
            (_, Layout::Radial) => PathTemplate::Arc,
            (EdgeStyle::RightAngled, Layout::Up | Layout::Down) => PathTemplate::CornerDepthY,
            (EdgeStyle::RightAngled, _) => PathTemplate::CornerDepthX,
            (EdgeStyle::Curved, Layout::Up | Layout::Down) => PathTemplate::CurveDepthY,
            (EdgeStyle::Curved, _) => PathTemplate::CurveDepthX,
        }
    }

    /// Build the segments for one edge
    ///
    /// The arc template without arc parameters degrades to a line.
    pub fn resolve(&self, params: &PathParams) -> ResolvedPath {
        let c = params.child;
        let p = params.parent;
        let segments = match self {
            PathTemplate::Line => vec![PathSegment::MoveTo(c), PathSegment::LineTo(p)],
            PathTemplate::CornerDepthX => vec![
                PathSegment::MoveTo(c),
                PathSegment::LineTo(Point::new(p.x, c.y)),
                PathSegment::LineTo(p),
            ],
            PathTemplate::CornerDepthY => vec![
                PathSegment::MoveTo(c),
                PathSegment::LineTo(Point::new(c.x, p.y)),
                PathSegment::LineTo(p),
            ],
            PathTemplate::CurveDepthX => {
                let corner = Point::new(p.x, c.y);
                vec![
                    PathSegment::MoveTo(c),
                    PathSegment::CubicTo {
                        c1: corner,
                        c2: corner,
                        end: p,
                    },
                ]
            }
            PathTemplate::CurveDepthY => {
                let corner = Point::new(c.x, p.y);
                vec![
                    PathSegment::MoveTo(c),
                    PathSegment::CubicTo {
                        c1: corner,
                        c2: corner,
                        end: p,
                    },
                ]
            }
            PathTemplate::Arc => match params.arc {
                Some(arc) => vec![
                    PathSegment::MoveTo(c),
                    PathSegment::ArcTo {
                        end: arc.end,
                        radius: arc.radius,
                        sweep: arc.sweep,
                    },
                    PathSegment::LineTo(p),
                ],
                None => vec![PathSegment::MoveTo(c), PathSegment::LineTo(p)],
            },
        };
        ResolvedPath::new(segments)
    }

    /// Build and format the `d` string for one edge
    pub fn format(&self, params: &PathParams) -> String {
        self.resolve(params).to_svg_d()
    }
}
