use super::*;
use nu_ansi_term::Color;

/// Presentation hint attached to every record: the style directive of the
/// active theme plus the terminal colour it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleDescriptor {
    directive: &'static str,
    color: Option<Color>,
}

impl StyleDescriptor {
    pub const EMPTY: StyleDescriptor = StyleDescriptor {
        directive: "",
        color: None,
    };

    const fn rgb(directive: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            directive,
            color: Some(Color::Rgb(r, g, b)),
        }
    }

    pub fn directive(&self) -> &'static str {
        self.directive
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }

    /// Paints `text` for a terminal; the empty style leaves it untouched.
    pub fn paint(&self, text: &str) -> String {
        match self.color {
            Some(color) => color.paint(text).to_string(),
            None => text.to_owned(),
        }
    }
}

const DARK: [StyleDescriptor; 4] = [
    StyleDescriptor::rgb("color: #64D2FF;", 0x64, 0xD2, 0xFF),
    StyleDescriptor::rgb("color: #FFD60A;", 0xFF, 0xD6, 0x0A),
    StyleDescriptor::rgb("color: #FF375F;", 0xFF, 0x37, 0x5F),
    StyleDescriptor::rgb("color: #5E5CE6;", 0x5E, 0x5C, 0xE6),
];

const LIGHT: [StyleDescriptor; 4] = [
    StyleDescriptor::rgb("color: #007AFF;", 0x00, 0x7A, 0xFF),
    StyleDescriptor::rgb("color: #FF9500;", 0xFF, 0x95, 0x00),
    StyleDescriptor::rgb("color: #FF3B30;", 0xFF, 0x3B, 0x30),
    StyleDescriptor::rgb("color: #5856D6;", 0x58, 0x56, 0xD6),
];

fn table(theme: &Theme) -> Option<&'static [StyleDescriptor; 4]> {
    match theme {
        Theme::Dark => Some(&DARK),
        Theme::Light => Some(&LIGHT),
        Theme::Unknown(_) => None,
    }
}

const fn slot(level: Level) -> usize {
    match level {
        Level::Info => 0,
        Level::Warn => 1,
        Level::Error => 2,
        Level::Debug => 3,
    }
}

/// Looks up the style of `level` in `theme`. Unknown themes resolve to
/// [`StyleDescriptor::EMPTY`].
pub fn resolve_style(theme: &Theme, level: Level) -> StyleDescriptor {
    table(theme)
        .map(|styles| styles[slot(level)])
        .unwrap_or(StyleDescriptor::EMPTY)
}
