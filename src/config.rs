use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct InspectorConfig {
    #[serde(default = "InspectorConfig::default_max_inheritance_depth")]
    pub max_inheritance_depth: usize,
    #[serde(default = "InspectorConfig::default_property_cache_limit")]
    pub property_cache_limit: Option<usize>,
    #[serde(default = "InspectorConfig::default_array_view_height")]
    pub array_view_height: f32,
    #[serde(default = "InspectorConfig::default_array_row_height")]
    pub array_row_height: f32,
    #[serde(default = "InspectorConfig::default_layer_strip_rows")]
    pub layer_strip_rows: usize,
    #[serde(default = "InspectorConfig::default_float_drag_speed")]
    pub float_drag_speed: f64,
    #[serde(default = "InspectorConfig::default_int_drag_speed")]
    pub int_drag_speed: f64,
    #[serde(default = "InspectorConfig::default_text_field_max_len")]
    pub text_field_max_len: usize,
    #[serde(default)]
    pub windows: WindowTitles,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowTitles {
    #[serde(default = "WindowTitles::default_inspector")]
    pub inspector: String,
    #[serde(default = "WindowTitles::default_tree")]
    pub tree: String,
}

impl InspectorConfig {
    const fn default_max_inheritance_depth() -> usize {
        10
    }

    const fn default_property_cache_limit() -> Option<usize> {
        Some(256)
    }

    const fn default_array_view_height() -> f32 {
        240.0
    }

    const fn default_array_row_height() -> f32 {
        20.0
    }

    const fn default_layer_strip_rows() -> usize {
        4
    }

    const fn default_float_drag_speed() -> f64 {
        0.01
    }

    const fn default_int_drag_speed() -> f64 {
        1.0
    }

    const fn default_text_field_max_len() -> usize {
        256
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_inheritance_depth: Self::default_max_inheritance_depth(),
            property_cache_limit: Self::default_property_cache_limit(),
            array_view_height: Self::default_array_view_height(),
            array_row_height: Self::default_array_row_height(),
            layer_strip_rows: Self::default_layer_strip_rows(),
            float_drag_speed: Self::default_float_drag_speed(),
            int_drag_speed: Self::default_int_drag_speed(),
            text_field_max_len: Self::default_text_field_max_len(),
            windows: WindowTitles::default(),
        }
    }
}

impl WindowTitles {
    fn default_inspector() -> String {
        "Node Inspector".to_string()
    }

    fn default_tree() -> String {
        "Scene Tree".to_string()
    }
}

impl Default for WindowTitles {
    fn default() -> Self {
        Self { inspector: Self::default_inspector(), tree: Self::default_tree() }
    }
}

impl InspectorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read inspector config {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse inspector config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("Inspector config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}
