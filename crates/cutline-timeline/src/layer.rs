//! Layer stack: ordered lanes that group clips and define z-order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer identifier, sequential from 1.
///
/// Ascending id means ascending stack position: layer 2 renders on top of
/// layer 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl LayerId {
    /// The default layer every timeline starts with.
    pub const FIRST: Self = Self(1);
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer {}", self.0)
    }
}

/// A single lane on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
}

impl Layer {
    /// Display name ("Layer 1", "Layer 2", ...).
    pub fn name(&self) -> String {
        self.id.to_string()
    }
}

/// Ordered set of layers.
///
/// Layers are created on demand, never removed, and never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Create a stack with the default layer.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer { id: LayerId::FIRST }],
        }
    }

    /// Append a new empty layer with the next sequential id.
    pub fn add_layer(&mut self) -> LayerId {
        let id = LayerId(self.layers.len() as u32 + 1);
        self.layers.push(Layer { id });
        id
    }

    /// The layer new clips are appended to.
    pub fn default_layer(&self) -> LayerId {
        LayerId::FIRST
    }

    /// Whether a layer exists.
    pub fn contains(&self, id: LayerId) -> bool {
        id.0 >= 1 && (id.0 as usize) <= self.layers.len()
    }

    /// Rendering z-index of a layer (0 = bottom of the stack).
    pub fn z_index(&self, id: LayerId) -> Option<usize> {
        self.contains(id).then(|| id.0 as usize - 1)
    }

    /// Layers in stack order, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}
