//! Configuration snapshot consumed by the conversion pipeline.
//!
//! The snapshot is supplied by the host (settings system or a YAML file);
//! the library never reads configuration storage itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Master switch; when false no scanning or conversion happens.
    pub enabled: bool,
    /// File extensions eligible for conversion.
    pub supported_file_types: Vec<String>,
    /// Explicit custom spacing scale from settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_spacing_scale: Option<HashMap<String, f64>>,
    pub show_visual_feedback: bool,
    pub show_hover_tooltips: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            supported_file_types: ["html", "jsx", "tsx", "vue", "svelte"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            custom_spacing_scale: None,
            show_visual_feedback: true,
            show_hover_tooltips: true,
        }
    }
}

impl Config {
    pub fn supports_file_type(&self, extension: &str) -> bool {
        self.supported_file_types
            .iter()
            .any(|ext| ext == extension)
    }

    /// Effective custom scale: project-derived entries merged under the
    /// explicit settings scale, with explicit entries winning on conflicts.
    pub fn merged_scale(
        &self,
        project: Option<&HashMap<String, f64>>,
    ) -> Option<HashMap<String, f64>> {
        if project.is_none() && self.custom_spacing_scale.is_none() {
            return None;
        }
        let mut merged = HashMap::new();
        if let Some(project) = project {
            merged.extend(project.iter().map(|(k, &v)| (k.clone(), v)));
        }
        if let Some(explicit) = &self.custom_spacing_scale {
            merged.extend(explicit.iter().map(|(k, &v)| (k.clone(), v)));
        }
        Some(merged)
    }
}
