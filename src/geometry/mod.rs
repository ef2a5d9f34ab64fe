//! Geometry engine: projection of layout coordinates and path construction
//!
//! Everything in this module is a pure function of the input tables and the
//! projected coordinates. Nothing here touches the scene graph.

pub mod admixture;
pub mod config;
pub mod edges;
pub mod error;
pub mod path;
pub mod projection;

pub use admixture::{branches_disjoint, AdmixtureRouter, RoutedAdmixture};
pub use config::AxesConfig;
pub use edges::{align_paths, edge_paths, EdgePath};
pub use error::GeometryError;
pub use path::{PathSegment, PathTemplate, ResolvedPath};
pub use projection::{Axes, Cartesian, LinearScale, Projection};

/// A 2D point in either layout or screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
