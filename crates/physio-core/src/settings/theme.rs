//! Color themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Purple,
    Blue,
    #[default]
    Green,
    Orange,
    Pink,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Purple,
        Theme::Blue,
        Theme::Green,
        Theme::Orange,
        Theme::Pink,
        Theme::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Purple => "purple",
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Orange => "orange",
            Theme::Pink => "pink",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_green() {
        assert_eq!(Theme::default(), Theme::Green);
    }

    #[test]
    fn test_parse() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!(matches!(
            "teal".parse::<Theme>(),
            Err(SettingsError::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_serde_matches_stored_value() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(theme, Theme::Orange);
    }
}
