//! Shared types used throughout the library.

mod direction;

pub use direction::{Axis, Direction};

use std::fmt;

/// A namespaced identifier such as `computercraft:turtle_can_use`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceLocation {
    pub namespace: String,
    pub path: String,
}

impl ResourceLocation {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse a resource location, defaulting to the `minecraft` namespace.
    /// "computercraft:turtle_can_use" -> ("computercraft", "turtle_can_use")
    /// "lever" -> ("minecraft", "lever")
    pub fn parse(location: &str) -> Self {
        if let Some((namespace, path)) = location.split_once(':') {
            Self::new(namespace, path)
        } else {
            Self::new("minecraft", location)
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
