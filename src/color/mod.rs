//! Color module: The closed set of color tags and the styles they map to.
//!
//! Widgets never name concrete colors. They classify their text with a
//! [`ColorId`] and the [`Palette`] held by the screen decides how it looks.

mod palette;

pub use palette::Palette;

use enum_map::Enum;
use std::str::FromStr;

/// Color classification tag.
///
/// `Normal` is the terminal default and is what every cleared widget falls
/// back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Default)]
pub enum ColorId {
    /// Default text.
    #[default]
    Normal,
    /// Informational messages.
    Message,
    /// Error messages.
    Error,
    /// Warnings.
    Warning,
    /// Questions asked of the user.
    Prompt,
    /// Option hints shown next to a prompt.
    Options,
    /// Progress meter bar.
    Progress,
    /// Status bar.
    Status,
}

impl ColorId {
    /// Every color id, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::Message,
        Self::Error,
        Self::Warning,
        Self::Prompt,
        Self::Options,
        Self::Progress,
        Self::Status,
    ];

    /// The name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Message => "message",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Prompt => "prompt",
            Self::Options => "options",
            Self::Progress => "progress",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cid| cid.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::Config(format!("unknown color id '{s}'")))
    }
}
