use bevy::prelude::*;
use std::str::FromStr;

use crate::engine::error::BackgroundError;

/// Host colour scheme. Reassembled text blends toward the contrasting colour.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Colour particles converge to as the words form.
    pub fn text_color(self) -> Vec3 {
        match self {
            Theme::Light => Vec3::ZERO,
            Theme::Dark => Vec3::ONE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = BackgroundError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(BackgroundError::UnknownTheme(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_theme_flag() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(BackgroundError::UnknownTheme(_))
        ));
    }

    #[test]
    fn text_colour_contrasts_with_background() {
        assert_eq!(Theme::Dark.text_color(), Vec3::ONE);
        assert_eq!(Theme::Light.text_color(), Vec3::ZERO);
    }
}
