//! Configuration for projecting layout coordinates onto a canvas

/// Canvas extent used to fit layout coordinates into pixels
#[derive(Debug, Clone, PartialEq)]
pub struct AxesConfig {
    /// Canvas width in pixels
    pub width: f64,

    /// Canvas height in pixels
    pub height: f64,

    /// Margin kept free on every side of the canvas
    pub padding: f64,

    /// Use the same scale on both axes
    pub equal_aspect: bool,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            padding: 20.0,
            equal_aspect: false,
        }
    }
}

impl AxesConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the canvas padding
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set whether both axes share one scale
    pub fn with_equal_aspect(mut self, equal: bool) -> Self {
        self.equal_aspect = equal;
        self
    }
}
