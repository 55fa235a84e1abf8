use super::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Log level. The set is closed and carries no ordering: a level filter
/// matches one level exactly, it never means "this level and above".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    /// Every supported level.
    pub const ALL: [Level; 4] = [Level::Info, Level::Warn, Level::Error, Level::Debug];

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Debug => "debug",
        }
    }

    /// Bracketed upper-case label written in front of every record.
    pub fn prefix(self) -> String {
        format!("[{}]", self.as_str().to_uppercase())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ApexError;

    fn from_str(s: &str) -> ApexResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "debug" => Ok(Level::Debug),
            _ => Err(ApexError::UnknownLevel(s.to_owned())),
        }
    }
}

/// Named style palette.
///
/// Theme names are not validated: an unrecognised name is kept as
/// [`Theme::Unknown`] and every level then resolves to the empty style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Unknown(String),
}

impl Theme {
    pub fn as_str(&self) -> &str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Theme {
    fn from(name: &str) -> Self {
        match name {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => Theme::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Theme::from(name.as_str())
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_owned()
    }
}

impl FromStr for Theme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Theme::from(s))
    }
}
