//! Runtime configuration for the frame controller and the host loop.

use serde::Deserialize;

use crate::error::GuiError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Horizontal gap inserted after each widget inside a group.
    pub group_margin: i32,
    /// Column of the first cell's left content edge.
    pub left_margin: i32,
    /// Menu entries are padded to this many columns.
    pub menu_item_width: usize,
    /// Key token that ends the host loop while no field is being edited.
    pub quit_key: String,
    pub poll_timeout_ms: u32,
    /// Log per-frame timings.
    pub debug: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            group_margin: 1,
            left_margin: 1,
            menu_item_width: 20,
            quit_key: "q".to_string(),
            poll_timeout_ms: 50,
            debug: false,
        }
    }
}

impl GuiConfig {
    pub fn from_json(text: &str) -> Result<Self, GuiError> {
        let config: GuiConfig = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Margins below 1 would place borders off-grid or on top of content.
    fn sanitized(mut self) -> Self {
        self.left_margin = self.left_margin.max(1);
        self.group_margin = self.group_margin.max(0);
        self
    }
}
