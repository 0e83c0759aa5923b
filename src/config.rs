//! Configuration: color palette overrides loaded from TOML.
//!
//! ```toml
//! [colors.message]
//! fg = "#64c864"
//!
//! [colors.error]
//! fg = "#e64646"
//! bg = "default"
//! attrs = ["bold", "underline"]
//! ```
//!
//! Ids that are not mentioned keep their built-in style. An id that is
//! mentioned is replaced as a whole, so omitted fields mean terminal
//! defaults.

use crate::buffer::{Modifiers, Rgb, Style};
use crate::color::{ColorId, Palette};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style overrides keyed by color id name (`"message"`, `"error"`, ...).
    pub colors: BTreeMap<String, ColorSpec>,
}

/// Style override for a single color id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorSpec {
    /// Foreground: `#rrggbb` or `"default"`.
    pub fg: Option<String>,
    /// Background: `#rrggbb` or `"default"`.
    pub bg: Option<String>,
    /// Text attributes.
    pub attrs: Vec<Attr>,
}

/// A text attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attr {
    /// Bold text.
    Bold,
    /// Dim text.
    Dim,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Blinking text.
    Blink,
    /// Reverse video.
    Reverse,
    /// Invisible text.
    Hidden,
    /// Struck-through text.
    Strikethrough,
}

impl From<Attr> for Modifiers {
    fn from(attr: Attr) -> Self {
        match attr {
            Attr::Bold => Self::BOLD,
            Attr::Dim => Self::DIM,
            Attr::Italic => Self::ITALIC,
            Attr::Underline => Self::UNDERLINE,
            Attr::Blink => Self::BLINK,
            Attr::Reverse => Self::REVERSED,
            Attr::Hidden => Self::HIDDEN,
            Attr::Strikethrough => Self::STRIKETHROUGH,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("TOML parse error: {e}")))
    }

    /// Load configuration from a TOML file.
    ///
    /// Returns `Config::default()` if the file doesn't exist, so the palette
    /// always has sensible defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file not found at '{}'; using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read '{}': {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    /// Build the palette: built-in defaults with this file's overrides.
    pub fn palette(&self) -> Result<Palette> {
        let mut palette = Palette::default();
        for (name, spec) in &self.colors {
            let cid: ColorId = name.parse()?;
            palette.set(cid, spec.style()?);
            tracing::debug!(color = %cid, "palette override applied");
        }
        Ok(palette)
    }
}

impl ColorSpec {
    /// Resolve this spec into a concrete style.
    pub fn style(&self) -> Result<Style> {
        Ok(Style {
            fg: parse_color(self.fg.as_deref())?,
            bg: parse_color(self.bg.as_deref())?,
            modifiers: self
                .attrs
                .iter()
                .fold(Modifiers::empty(), |acc, &attr| acc | Modifiers::from(attr)),
        })
    }
}

fn parse_color(value: Option<&str>) -> Result<Option<Rgb>> {
    match value {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("default") => Ok(None),
        Some(v) => Rgb::from_hex(v)
            .map(Some)
            .ok_or_else(|| Error::Config(format!("invalid color '{v}'"))),
    }
}
