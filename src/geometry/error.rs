//! Error types for the geometry engine

use thiserror::Error;

use crate::mark::Layout;

/// Errors raised while routing auxiliary edges
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// An admixture endpoint has no parent branch to route along
    #[error("admixture edge endpoint {node} is the root and has no parent branch")]
    RootEndpoint { node: usize },

    /// Admixture edges are only routed on the linear layouts
    #[error("admixture edges are not supported on the {layout} layout")]
    UnsupportedLayout { layout: Layout },

    /// A node index outside the node table
    #[error("node index {index} out of range for {nnodes} nodes")]
    NodeOutOfRange { index: usize, nnodes: usize },
}

impl GeometryError {
    /// Create a root endpoint error
    pub fn root_endpoint(node: usize) -> Self {
        Self::RootEndpoint { node }
    }

    /// Create a node out of range error
    pub fn out_of_range(index: usize, nnodes: usize) -> Self {
        Self::NodeOutOfRange { index, nnodes }
    }

    /// Whether this error marks input the router cannot handle, as opposed to malformed input
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::RootEndpoint { .. } | Self::UnsupportedLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_endpoint_display() {
        let err = GeometryError::root_endpoint(4);
        assert!(err.to_string().contains("endpoint 4"));
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_out_of_range_display() {
        let err = GeometryError::out_of_range(9, 5);
        assert_eq!(err.to_string(), "node index 9 out of range for 5 nodes");
        assert!(!err.is_unsupported());
    }
}
