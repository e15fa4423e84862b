use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::geom::Vec3;

/// One entry of a recommended part list, as the catalog supplies it.
///
/// Position in the list is the assembly order: index 0 is the base part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    /// Display name, e.g. `"垫片：PTFE"`.
    #[serde(rename = "partName", alias = "name")]
    pub name: String,
    /// Model code per vendor.
    #[serde(rename = "models", alias = "modelsByVendor", default)]
    pub models_by_vendor: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl PartSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models_by_vendor: BTreeMap::new(),
            quantity: None,
        }
    }

    pub fn with_model(mut self, vendor: impl Into<String>, model: impl Into<String>) -> Self {
        self.models_by_vendor.insert(vendor.into(), model.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Text shown next to a highlighted part.
    pub fn label_text(&self) -> String {
        match self.quantity {
            Some(q) => format!("{} ×{}", self.name, q),
            None => self.name.clone(),
        }
    }
}

/// A part annotated for display: archetype, placement and reveal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPart {
    pub spec: PartSpec,
    /// Position in assembly order, contiguous over `0..N`.
    pub index: usize,
    pub archetype: Archetype,
    pub position: Vec3,
    /// Offset from session start at which this part is revealed.
    pub reveal_delay_ms: u64,
    pub visible: bool,
    pub highlighted: bool,
    pub scale: f64,
}
