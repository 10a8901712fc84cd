use egui::Color32;
use serde::{Deserialize, Serialize};

/// Environment variable holding an optional JSON override for [`EngineConfig`]
pub const CONFIG_ENV_VAR: &str = "XENEDIT_CONFIG";

/// Startup settings for a drawing session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct EngineConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color32,
    pub default_color: Color32,
    pub default_stroke_width: u32,
    /// Resolution the raster is embedded at in PDF exports
    pub pdf_dpi: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 800,
            background: Color32::WHITE,
            default_color: Color32::BLACK,
            default_stroke_width: 3,
            pdf_dpi: 100.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the override from [`CONFIG_ENV_VAR`], falling back to defaults.
    pub fn from_env() -> Self {
        let Ok(json) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Using config from {CONFIG_ENV_VAR}: {config:?}");
                config
            }
            Err(err) => {
                log::warn!("Ignoring invalid {CONFIG_ENV_VAR}: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "canvas_width": 320, "pdf_dpi": 72.0 }"#).unwrap();
        assert_eq!(config.canvas_width, 320);
        assert_eq!(config.canvas_height, 800);
        assert_eq!(config.pdf_dpi, 72.0);
        assert_eq!(config.background, Color32::WHITE);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(EngineConfig::from_json("{ canvas_width: }").is_err());
    }
}
