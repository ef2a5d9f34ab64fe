//! Error type for the render pipeline

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::mark::MarkError;

/// Errors that can occur during a render
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// Inconsistent input tables
    #[error("invalid tree mark: {0}")]
    Mark(#[from] MarkError),

    /// Input the geometry engine cannot route
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

impl RenderError {
    /// Whether the failure is an unsupported admixture request rather than bad tables
    pub fn is_unsupported(&self) -> bool {
        matches!(self, RenderError::Geometry(err) if err.is_unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: RenderError = GeometryError::root_endpoint(3).into();
        assert!(err.is_unsupported());
        assert!(err.to_string().starts_with("geometry error:"));

        let err: RenderError = MarkError::Empty.into();
        assert!(!err.is_unsupported());
        assert_eq!(err.to_string(), "invalid tree mark: a tree mark needs at least one node");
    }
}
