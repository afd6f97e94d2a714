//! # Splitter Configuration
//!
//! Element ids, the custom property name, and drag behavior switches. Every
//! field has a default, so an empty JSON object is a valid configuration.
//!
//! ## Example
//!
//! ```rust
//! use split_core::config::{OverlapPolicy, SplitterConfig};
//!
//! let config = SplitterConfig::from_json(r#"{ "overlap_policy": "ignore" }"#).unwrap();
//! assert_eq!(config.handle_id, "splitter");
//! assert_eq!(config.overlap_policy, OverlapPolicy::Ignore);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SplitError, SplitResult};
use crate::geometry::{SplitProperty, DEFAULT_SPLIT_PROPERTY};

/// What a start event does while another drag is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Detach the live session, then start the new one
    #[default]
    Supersede,
    /// Drop the new start event
    Ignore,
}

/// Splitter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Id of the drag handle element
    pub handle_id: String,

    /// Id of the left pane element
    pub left_pane_id: String,

    /// Id of the right pane element
    pub right_pane_id: String,

    /// Root custom property holding the split point
    pub property_name: String,

    pub overlap_policy: OverlapPolicy,

    /// Re-center the split point whenever the window is resized
    pub recenter_on_resize: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            handle_id: "splitter".to_string(),
            left_pane_id: "item-left".to_string(),
            right_pane_id: "item-right".to_string(),
            property_name: DEFAULT_SPLIT_PROPERTY.to_string(),
            overlap_policy: OverlapPolicy::default(),
            recenter_on_resize: true,
        }
    }
}

impl SplitterConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> SplitResult<Self> {
        let config: SplitterConfig = serde_json::from_str(json)
            .map_err(|e| SplitError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SplitResult<()> {
        for (field, value) in [
            ("handle_id", &self.handle_id),
            ("left_pane_id", &self.left_pane_id),
            ("right_pane_id", &self.right_pane_id),
        ] {
            if value.trim().is_empty() {
                return Err(SplitError::invalid_config(field, "must not be empty"));
            }
        }

        if !self.property_name.starts_with("--") || self.property_name.len() <= 2 {
            return Err(SplitError::invalid_config(
                "property_name",
                format!("'{}' is not a custom property name", self.property_name),
            ));
        }
        Ok(())
    }

    pub fn split_property(&self) -> SplitProperty {
        SplitProperty::new(&self.property_name)
    }
}
