//! Precedence-ordered composite source

use crate::domain::PropertySource;

/// Stack of sources, highest precedence first
///
/// A key is answered by the first layer that supplies it. The origin reported
/// by [`PropertySource::locate`] is the name of that layer.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below all existing ones
    pub fn with_lowest(mut self, layer: impl PropertySource + 'static) -> Self {
        self.push_lowest(Box::new(layer));
        self
    }

    /// Add a boxed layer below all existing ones
    pub fn push_lowest(&mut self, layer: Box<dyn PropertySource>) {
        self.layers.push(layer);
    }

    /// Layer names, highest precedence first
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PropertySource for LayeredSource {
    fn name(&self) -> &str {
        "layered"
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.locate(key).map(|(_, value)| value)
    }

    fn locate(&self, key: &str) -> Option<(&str, &str)> {
        self.layers.iter().find_map(|layer| layer.locate(key))
    }
}

impl std::fmt::Debug for LayeredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layer_names())
            .finish()
    }
}
