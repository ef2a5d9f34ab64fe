//! Projection of layout-space coordinates into screen space

use crate::mark::{Layout, TreeMark};

use super::config::AxesConfig;
use super::Point;

/// Maps layout-space values onto screen pixels
///
/// Implemented by [`Cartesian`]; hosts with their own coordinate system can
/// supply another implementation.
pub trait Axes {
    fn project_x(&self, x: f64) -> f64;
    fn project_y(&self, y: f64) -> f64;

    fn project(&self, p: Point) -> Point {
        Point::new(self.project_x(p.x), self.project_y(p.y))
    }
}

/// A linear mapping from a data domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Pixels per data unit (signed)
    pub fn scale(&self) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            0.0
        } else {
            (self.range.1 - self.range.0) / span
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        self.range.0 + (value - self.domain.0) * self.scale()
    }
}

/// Cartesian axes with independent x and y scales; y grows upward in data space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Cartesian {
    pub fn new(x: LinearScale, y: LinearScale) -> Self {
        Self { x, y }
    }

    /// Fit the extent of a tree mark onto a canvas
    ///
    /// The extent covers every node, the aligned-tip baseline when tips are
    /// aligned, and the full tip circle for the radial layout (which always
    /// uses one scale for both axes).
    pub fn fit(mark: &TreeMark, config: &AxesConfig) -> Self {
        let mut xs: Vec<f64> = mark.coords.iter().map(|p| p.x).collect();
        let mut ys: Vec<f64> = mark.coords.iter().map(|p| p.y).collect();

        if mark.tip_labels_align {
            match mark.layout {
                Layout::Right | Layout::Left => xs.push(mark.xbaseline),
                Layout::Up | Layout::Down => ys.push(mark.ybaseline),
                Layout::Radial => {}
            }
        }
        if let (Layout::Radial, Some(radii), Some(root)) =
            (mark.layout, mark.radii.as_ref(), mark.coords.last())
        {
            let r = radii.iter().copied().fold(0.0_f64, f64::max);
            xs.extend([root.x - r, root.x + r]);
            ys.extend([root.y - r, root.y + r]);
        }

        let x_domain = padded_extent(&xs);
        let y_domain = padded_extent(&ys);
        let x_range = (config.padding, config.width - config.padding);
        let y_range = (config.height - config.padding, config.padding);

        if config.equal_aspect || mark.layout.is_radial() {
            Self::fit_equal(x_domain, y_domain, x_range, y_range)
        } else {
            Self::new(
                LinearScale::new(x_domain, x_range),
                LinearScale::new(y_domain, y_range),
            )
        }
    }

    /// Shared scale on both axes, each domain widened around its center
    fn fit_equal(
        x_domain: (f64, f64),
        y_domain: (f64, f64),
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Self {
        let avail_w = (x_range.1 - x_range.0).abs();
        let avail_h = (y_range.1 - y_range.0).abs();
        let scale = (avail_w / (x_domain.1 - x_domain.0)).min(avail_h / (y_domain.1 - y_domain.0));

        let widen = |(lo, hi): (f64, f64), avail: f64| {
            let center = (lo + hi) / 2.0;
            let half = avail / scale / 2.0;
            (center - half, center + half)
        };
        Self::new(
            LinearScale::new(widen(x_domain, avail_w), x_range),
            LinearScale::new(widen(y_domain, avail_h), y_range),
        )
    }
}

impl Axes for Cartesian {
    fn project_x(&self, x: f64) -> f64 {
        self.x.map(x)
    }

    fn project_y(&self, y: f64) -> f64 {
        self.y.map(y)
    }
}

/// Min and max of `values`, widened by half a unit when they coincide
fn padded_extent(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (-0.5, 0.5);
    }
    if hi - lo == 0.0 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Screen-space coordinates for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub nodes_x: Vec<f64>,
    pub nodes_y: Vec<f64>,
    /// Screen x of each node's radius laid out rightward from the root (radial layout only)
    pub radii: Option<Vec<f64>>,
    /// Aligned tip positions, present when tip alignment is on
    pub tips: Option<Vec<Point>>,
}

impl Projection {
    /// Project every node, plus radii and aligned tips where they apply
    pub fn project(mark: &TreeMark, axes: &dyn Axes) -> Self {
        let nodes_x: Vec<f64> = mark.coords.iter().map(|p| axes.project_x(p.x)).collect();
        let nodes_y: Vec<f64> = mark.coords.iter().map(|p| axes.project_y(p.y)).collect();

        // radii are measured from the root along +x
        let root_x = mark.coords.last().map(|p| p.x).unwrap_or(0.0);
        let radii = match (mark.layout, &mark.radii) {
            (Layout::Radial, Some(radii)) => Some(
                radii
                    .iter()
                    .map(|r| axes.project_x(root_x + r))
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        };

        let tips = mark
            .tip_labels_align
            .then(|| aligned_tips(mark, axes, &nodes_x, &nodes_y));

        Self {
            nodes_x,
            nodes_y,
            radii,
            tips,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_x.is_empty()
    }

    pub fn node(&self, idx: usize) -> Point {
        Point::new(self.nodes_x[idx], self.nodes_y[idx])
    }

    /// The root is the last node
    pub fn root(&self) -> Point {
        self.node(self.len() - 1)
    }

    /// Position a tip label anchors to: aligned when alignment is on
    pub fn tip_position(&self, tidx: usize) -> Point {
        match &self.tips {
            Some(tips) => tips[tidx],
            None => self.node(tidx),
        }
    }
}

fn aligned_tips(mark: &TreeMark, axes: &dyn Axes, nodes_x: &[f64], nodes_y: &[f64]) -> Vec<Point> {
    let ntips = mark.ntips();
    match mark.layout {
        Layout::Right | Layout::Left => {
            let x = axes.project_x(mark.xbaseline);
            (0..ntips).map(|i| Point::new(x, nodes_y[i])).collect()
        }
        Layout::Up | Layout::Down => {
            let y = axes.project_y(mark.ybaseline);
            (0..ntips).map(|i| Point::new(nodes_x[i], y)).collect()
        }
        Layout::Radial => {
            let radius = mark
                .radii
                .as_ref()
                .map(|r| r.iter().copied().fold(0.0_f64, f64::max))
                .unwrap_or(0.0);
            let origin = mark.coords.last().copied().unwrap_or_default();
            (0..ntips)
                .map(|i| {
                    let theta = mark.tip_angle(i).to_radians();
                    let cx = origin.x + radius * theta.cos();
                    let cy = origin.y - radius * theta.sin();
                    axes.project(Point::new(cx, cy))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identityish() -> Cartesian {
        // x: [0, 10] -> [0, 100]; y: [0, 10] -> [100, 0]
        Cartesian::new(
            LinearScale::new((0.0, 10.0), (0.0, 100.0)),
            LinearScale::new((0.0, 10.0), (100.0, 0.0)),
        )
    }

    fn tree() -> TreeMark {
        TreeMark::new(
            vec![
                Point::new(4.0, 0.0),
                Point::new(6.0, 2.0),
                Point::new(0.0, 1.0),
            ],
            vec![(2, 0), (2, 1)],
        )
        .with_tip_labels(["a", "b"])
    }

    #[test]
    fn test_linear_scale() {
        let s = LinearScale::new((0.0, 2.0), (10.0, 30.0));
        assert_eq!(s.map(1.0), 20.0);
        assert_eq!(s.scale(), 10.0);
        let flat = LinearScale::new((3.0, 3.0), (0.0, 10.0));
        assert_eq!(flat.map(3.0), 5.0);
    }

    #[test]
    fn test_project_nodes() {
        let proj = Projection::project(&tree(), &identityish());
        assert_eq!(proj.node(0), Point::new(40.0, 100.0));
        assert_eq!(proj.root(), Point::new(0.0, 90.0));
        assert!(proj.tips.is_none());
        assert_eq!(proj.tip_position(1), proj.node(1));
    }

    #[test]
    fn test_aligned_tips_rightward() {
        let mark = tree().with_tip_alignment(8.0);
        let proj = Projection::project(&mark, &identityish());
        let tips = proj.tips.as_ref().unwrap();
        assert_eq!(tips[0], Point::new(80.0, 100.0));
        assert_eq!(tips[1], Point::new(80.0, 80.0));
    }

    #[test]
    fn test_aligned_tips_downward() {
        let mark = tree().with_layout(Layout::Down).with_tip_alignment(5.0);
        let proj = Projection::project(&mark, &identityish());
        let tips = proj.tips.as_ref().unwrap();
        assert_eq!(tips[0], Point::new(40.0, 50.0));
        assert_eq!(tips[1], Point::new(60.0, 50.0));
    }

    #[test]
    fn test_aligned_tips_radial() {
        let mark = TreeMark::new(
            vec![Point::new(2.0, 0.0), Point::new(0.0, 3.0), Point::new(0.0, 0.0)],
            vec![(2, 0), (2, 1)],
        )
        .with_layout(Layout::Radial)
        .with_radii(vec![2.0, 3.0, 0.0])
        .with_tip_labels(["a", "b"])
        .with_tip_angles(vec![0.0, -90.0])
        .with_tip_alignment(0.0);
        let proj = Projection::project(&mark, &identityish());
        let tips = proj.tips.as_ref().unwrap();
        // both tips sit on the circle of the largest radius
        assert!((tips[0].x - 30.0).abs() < 1e-9);
        assert!((tips[0].y - 100.0).abs() < 1e-9);
        assert!((tips[1].x - 0.0).abs() < 1e-9);
        assert!((tips[1].y - 70.0).abs() < 1e-9);
        assert_eq!(proj.radii.as_ref().unwrap(), &vec![20.0, 30.0, 0.0]);
    }

    #[test]
    fn test_fit_covers_canvas() {
        let axes = Cartesian::fit(&tree(), &AxesConfig::default());
        assert_eq!(axes.project_x(0.0), 20.0);
        assert_eq!(axes.project_x(6.0), 380.0);
        assert_eq!(axes.project_y(0.0), 380.0);
        assert_eq!(axes.project_y(2.0), 20.0);
    }

    #[test]
    fn test_fit_equal_aspect() {
        let config = AxesConfig::default().with_size(400.0, 200.0).with_padding(0.0);
        let mark = TreeMark::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![(1, 0)],
        );
        let axes = Cartesian::fit(&mark, &config.with_equal_aspect(true));
        assert_eq!(axes.x.scale(), 200.0);
        assert_eq!(axes.y.scale(), -200.0);
        assert_eq!(axes.project_x(0.5), 200.0);
    }
}
