//! Canvas configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives a
//! 400x400 white canvas titled "Sketchpad" using the built-in mono font.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::graphics::{Color, Font, MonoSize, Typeface};

pub const DEFAULT_TITLE: &str = "Sketchpad";
pub const DEFAULT_WIDTH: i64 = 400;
pub const DEFAULT_HEIGHT: i64 = 400;
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub title: String,
    pub width: i64,
    pub height: i64,
    /// `[r, g, b]`
    pub background: [u8; 3],
    /// Outline font for text; the built-in mono face is used when absent
    pub font: Option<PathBuf>,
    /// Pixel size for `font`
    pub font_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: DEFAULT_BACKGROUND,
            font: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl CanvasConfig {
    /// `<config dir>/sketchpad/config.toml`
    pub fn default_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("sketchpad")
        } else {
            PathBuf::from(".config/sketchpad")
        };

        config_dir.join("config.toml")
    }

    pub fn from_toml(content: &str) -> eyre::Result<Self> {
        toml::from_str(content).wrap_err("parsing canvas config")
    }

    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).wrap_err_with(|| format!("in {}", path.display()))
    }

    /// Like [`CanvasConfig::load`], but a missing file gives the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                Self::from_toml(&content).wrap_err_with(|| format!("in {}", path.display()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).wrap_err_with(|| format!("reading config {}", path.display())),
        }
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::new(r, g, b)
    }

    /// Loads the configured typeface, if any
    pub fn resolve_font(&self) -> eyre::Result<Font> {
        match &self.font {
            Some(path) => {
                let typeface = Typeface::from_file(path)?;
                Ok(Font::face(Arc::new(typeface), self.font_size))
            }
            None => Ok(Font::Mono(MonoSize::default())),
        }
    }
}
