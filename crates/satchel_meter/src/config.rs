//! Meter configuration

use serde::{Deserialize, Serialize};

/// Starting shape of a meter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Upper bound (must be at least 1)
    pub maximum: u32,

    /// Starting value (None = start full)
    pub value: Option<u32>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            maximum: 100,
            value: None,
        }
    }
}

impl MeterConfig {
    /// Health pool preset
    pub fn health() -> Self {
        Self::default()
    }

    /// Mana pool preset
    pub fn mana() -> Self {
        Self {
            maximum: 50,
            ..Default::default()
        }
    }

    /// Set maximum
    pub fn with_maximum(mut self, maximum: u32) -> Self {
        self.maximum = maximum;
        self
    }

    /// Set starting value
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}
