use crate::cell::{Material, Rgb};
use crate::validation::validate_options;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Construction-time settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Cells per axis (N)
    pub dimension: usize,
    pub cell_size: f32,
    pub initial_spacing: f32,
    pub max_spacing: f32,

    pub background_color: Rgb,
    pub default_color: Rgb,
    pub default_opacity: f32,
    pub on_color: Rgb,
    pub on_opacity: f32,
    pub highlight_color: Rgb,
    pub highlight_opacity: f32,
    pub selected_color: Rgb,
    pub selected_opacity: f32,

    /// Hover colour over an on cell (a click turns it off)
    pub hover_on_color: Rgb,
    /// Hover colour over an off cell (a click turns it on)
    pub hover_off_color: Rgb,

    /// Overrides the windowing system's pixels-per-point when set
    pub pixel_density: Option<f32>,
    pub width_fraction: f32,
    pub height_fraction: f32,

    pub axes_helper: bool,
    pub camera_position: [f32; 3],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            dimension: 8,
            cell_size: 3.0,
            initial_spacing: 0.5,
            max_spacing: 8.5,
            background_color: Rgb(0x252525),
            default_color: Rgb(0x0CBCDC),
            default_opacity: 0.45,
            on_color: Rgb(0xFF2D55),
            on_opacity: 0.95,
            highlight_color: Rgb(0xFFD400),
            highlight_opacity: 0.6,
            selected_color: Rgb(0x00FF00),
            selected_opacity: 0.6,
            hover_on_color: Rgb(0x7A0019),
            hover_off_color: Rgb(0xFF0000),
            pixel_density: None,
            width_fraction: 1.0,
            height_fraction: 1.0,
            axes_helper: true,
            camera_position: [10.0, 10.0, 100.0],
        }
    }
}

impl EditorOptions {
    /// Parse options from JSON and reject invalid combinations
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: EditorOptions =
            serde_json::from_str(json).context("Failed to parse editor options")?;
        options.ensure_valid()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        let options = Self::from_json_str(&json)
            .with_context(|| format!("Invalid options in {}", path.display()))?;
        log::info!("Loaded editor options from {}", path.display());
        Ok(options)
    }

    /// Fail with every validation error joined into one message
    pub fn ensure_valid(&self) -> Result<()> {
        let result = validate_options(self);
        for warning in result.warnings() {
            log::warn!("{}", warning.message);
        }
        if result.is_valid() {
            return Ok(());
        }
        let messages: Vec<&str> = result.errors().iter().map(|i| i.message.as_str()).collect();
        Err(anyhow!(messages.join("; ")))
    }

    pub fn default_material(&self) -> Material {
        Material::new(self.default_color, self.default_opacity)
    }

    pub fn on_material(&self) -> Material {
        Material::new(self.on_color, self.on_opacity)
    }

    pub fn highlight_material(&self) -> Material {
        Material::new(self.highlight_color, self.highlight_opacity)
    }

    pub fn selected_material(&self) -> Material {
        Material::new(self.selected_color, self.selected_opacity)
    }
}
