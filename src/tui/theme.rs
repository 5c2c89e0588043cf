//! Color themes for the terminal skin

use clap::ValueEnum;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeName {
    /// Apricot / tea green / light blue pastel palette
    #[default]
    Palette,
    /// Terminal default colors only
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    /// "Done" button, progress stat
    pub accent: Color,
    /// Completed cards, time stat
    pub done: Color,
    /// Sets stat, running timer
    pub info: Color,
    pub border: Color,
    pub cursor: Color,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Palette => Self::palette(),
            ThemeName::Mono => Self::mono(),
        }
    }

    pub fn palette() -> Self {
        Self {
            text: Color::Rgb(0x47, 0x55, 0x69),
            muted: Color::Rgb(0x94, 0xA3, 0xB8),
            accent: Color::Rgb(0xFC, 0xC5, 0xB0),
            done: Color::Rgb(0xD5, 0xEA, 0xB2),
            info: Color::Rgb(0xB6, 0xDF, 0xED),
            border: Color::Rgb(0xEE, 0xEE, 0xEE),
            cursor: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }

    pub fn mono() -> Self {
        Self {
            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Reset,
            done: Color::Gray,
            info: Color::Reset,
            border: Color::DarkGray,
            cursor: Color::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named(ThemeName::default())
    }
}
