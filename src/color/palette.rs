//! Palette: `ColorId` to `Style` lookup table.

use super::ColorId;
use crate::buffer::{Modifiers, Rgb, Style};
use enum_map::{enum_map, EnumMap};

/// Maps every [`ColorId`] to a concrete [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: EnumMap<ColorId, Style>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: enum_map! {
                ColorId::Normal => Style::RESET,
                ColorId::Message => Style::RESET.fg(Rgb::new(100, 200, 100)),
                ColorId::Error => Style::RESET
                    .fg(Rgb::new(230, 70, 70))
                    .add_modifiers(Modifiers::BOLD),
                ColorId::Warning => Style::RESET.fg(Rgb::new(230, 190, 60)),
                ColorId::Prompt => Style::RESET.fg(Rgb::new(90, 170, 230)),
                ColorId::Options => Style::RESET
                    .fg(Rgb::new(90, 170, 230))
                    .add_modifiers(Modifiers::BOLD),
                ColorId::Progress => Style::RESET
                    .fg(Rgb::WHITE)
                    .bg(Rgb::new(0, 120, 60)),
                ColorId::Status => Style::RESET
                    .fg(Rgb::WHITE)
                    .bg(Rgb::new(40, 40, 40)),
            },
        }
    }
}

impl Palette {
    /// A palette where every id is drawn in the terminal defaults.
    pub fn monochrome() -> Self {
        Self {
            styles: EnumMap::from_fn(|_| Style::RESET),
        }
    }

    /// The style for `cid`.
    #[inline]
    pub fn get(&self, cid: ColorId) -> Style {
        self.styles[cid]
    }

    /// Replace the style for `cid`.
    pub fn set(&mut self, cid: ColorId, style: Style) {
        self.styles[cid] = style;
    }

    /// The style for `cid` laid over the `Normal` style.
    ///
    /// Colors that `cid` sets win; the ones it leaves unset fall back to
    /// `Normal`. Modifiers of both are combined.
    pub fn normal_backed(&self, cid: ColorId) -> Style {
        let normal = self.styles[ColorId::Normal];
        let style = self.styles[cid];
        Style {
            fg: style.fg.or(normal.fg),
            bg: style.bg.or(normal.bg),
            modifiers: style.modifiers | normal.modifiers,
        }
    }
}
