//! Configuration for scene construction

/// Options that shape the emitted scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Prefix for group class names (e.g., "toytree-" for "toytree-Edges")
    pub class_prefix: String,

    /// Perpendicular nudge of admixture labels on rightward and leftward trees
    pub admixture_label_offset: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            class_prefix: "toytree-".to_string(),
            admixture_label_offset: 12.0,
        }
    }
}

impl SceneConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Remove the class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix.clear();
        self
    }

    /// Set the admixture label offset
    pub fn with_admixture_label_offset(mut self, offset: f64) -> Self {
        self.admixture_label_offset = offset;
        self
    }
}
