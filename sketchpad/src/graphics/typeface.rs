use std::{fmt::Display, path::Path};

use eyre::WrapErr;
use fontdue::{Font as FontData, FontSettings};

/// Simple wrapper for the `&'static str` returned by `fontdue`;
/// we need something that implements `Error` for `eyre`
#[derive(Debug)]
pub struct FontError(&'static str);
impl Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontError: {}", self.0)
    }
}
impl std::error::Error for FontError {}

/// An outline font parsed by `fontdue`, shared between every [`Font`](super::Font) that uses it
pub struct Typeface {
    name: String,
    data: FontData,
}
impl Typeface {
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> eyre::Result<Self> {
        let name = name.into();
        let data = FontData::from_bytes(bytes, FontSettings::default())
            .map_err(FontError)
            .wrap_err_with(|| format!("processing font {name}"))?;

        Ok(Self { name, data })
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).wrap_err_with(|| format!("reading font {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_bytes(name, &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn data(&self) -> &FontData {
        &self.data
    }
}
impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
