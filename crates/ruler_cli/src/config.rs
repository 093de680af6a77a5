//! Ruler configuration file handling

use anyhow::{Context, Result};
use ruler_widgets::{GestureConfig, MeasureSpec, PhysicsConfig, Ruler, RulerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration (ruler.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RulerFile {
    #[serde(default)]
    pub ruler: RulerConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Size of the simulated widget
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    /// Omit to use the ruler's intrinsic height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

fn default_width() -> f32 {
    1080.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: None,
        }
    }
}

impl RulerFile {
    /// Load configuration from a file, or from `ruler.toml` in a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("ruler.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `ruler init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Build a validated ruler sized to the viewport
    pub fn build_ruler(&self) -> Result<Ruler> {
        let mut ruler = Ruler::builder()
            .config(self.ruler.clone())
            .gesture(self.gesture.clone())
            .physics(self.physics.clone())
            .build()
            .inspect_err(|err| tracing::warn!("rejected ruler configuration: {}", err))
            .context("Invalid ruler configuration")?;

        let height_spec = match self.viewport.height {
            Some(height) => MeasureSpec::Exactly(height),
            None => MeasureSpec::Unspecified,
        };
        let size = ruler.measure(MeasureSpec::Exactly(self.viewport.width), height_spec);
        ruler.resize(size.width, size.height);
        tracing::debug!("viewport {}x{}", size.width, size.height);
        Ok(ruler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let file = RulerFile::default();
        let text = file.to_toml().unwrap();
        assert!(text.contains("[ruler]"));
        assert!(text.contains("[physics]"));
        assert!(text.contains("start_color = \"#ff3415b0\""));
        assert_eq!(RulerFile::from_toml(&text).unwrap(), file);
    }

    #[test]
    fn test_sections_are_optional() {
        let file = RulerFile::from_toml(
            r#"
            [ruler]
            min_value = 10
            max_value = 20

            [viewport]
            height = 500.0
            "#,
        )
        .unwrap();
        assert_eq!(file.ruler.min_value, 10);
        assert_eq!(file.gesture, GestureConfig::default());
        assert_eq!(file.viewport.width, 1080.0);

        let ruler = file.build_ruler().unwrap();
        assert_eq!(ruler.current_value(), 10);
        assert_eq!(ruler.geometry().height, 500.0);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let file = RulerFile::from_toml("[ruler]\nmin_value = 5\nmax_value = 1\n").unwrap();
        let err = file.build_ruler().unwrap_err();
        assert!(format!("{err:#}").contains("Empty value range"));
    }

    #[test]
    fn test_missing_file() {
        let err = RulerFile::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("ruler init"));
    }
}
