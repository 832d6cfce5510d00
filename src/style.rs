//! Style Module — style code to text decoration lookup.
//!
//! Responsibilities:
//! - Fixed palette of decorations keyed by the closed `Style` enum
//! - Encoding a glyph through its decoration as ANSI SGR text

use crossterm::style::{Attribute, Color, ContentStyle};

use crate::types::{Attrs, Style};

/// Colour and attribute transform applied to styled glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attrs,
}

impl Decoration {
    pub const PLAIN: Decoration = Decoration {
        fg: None,
        bg: None,
        attrs: Attrs::empty(),
    };

    pub const fn new(fg: Option<Color>, bg: Option<Color>, attrs: Attrs) -> Self {
        Self { fg, bg, attrs }
    }

    fn content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg;
        style.background_color = self.bg;
        if self.attrs.contains(Attrs::BOLD) {
            style.attributes.set(Attribute::Bold);
        }
        if self.attrs.contains(Attrs::ITALIC) {
            style.attributes.set(Attribute::Italic);
        }
        if self.attrs.contains(Attrs::UNDERLINE) {
            style.attributes.set(Attribute::Underlined);
        }
        if self.attrs.contains(Attrs::REVERSE) {
            style.attributes.set(Attribute::Reverse);
        }
        style
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

fn default_decoration(style: Style) -> Decoration {
    match style {
        Style::None => Decoration::PLAIN,
        Style::Header => Decoration::new(Some(Color::Black), Some(Color::Cyan), Attrs::BOLD),
        Style::Border => Decoration::new(Some(Color::DarkGrey), None, Attrs::empty()),
        Style::Button => Decoration::new(Some(Color::Black), Some(Color::Green), Attrs::empty()),
        Style::Arrow => Decoration::new(Some(Color::Yellow), None, Attrs::BOLD),
        Style::Input => Decoration::new(Some(Color::White), Some(Color::DarkGrey), Attrs::empty()),
        Style::InputActive => {
            Decoration::new(Some(Color::Black), Some(Color::White), Attrs::UNDERLINE)
        }
        Style::Highlight => Decoration::new(None, None, Attrs::REVERSE),
        Style::Negative => Decoration::new(Some(Color::Red), None, Attrs::empty()),
        Style::Positive => Decoration::new(Some(Color::Green), None, Attrs::empty()),
        Style::Muted => Decoration::new(Some(Color::DarkGrey), None, Attrs::ITALIC),
    }
}

/// Lookup table from style code to decoration. `Style::None` is always plain.
#[derive(Debug, Clone)]
pub struct StyleTable {
    entries: [Decoration; Style::COUNT],
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            entries: Style::ALL.map(default_decoration),
        }
    }
}

impl StyleTable {
    pub fn get(&self, style: Style) -> Decoration {
        self.entries[style.id() as usize]
    }

    /// Override a palette entry. `Style::None` cannot be redefined.
    pub fn set(&mut self, style: Style, decoration: Decoration) {
        if style != Style::None {
            self.entries[style.id() as usize] = decoration;
        }
    }

    /// Encode `text` through the decoration of `style`.
    pub fn encode(&self, text: &str, style: Style) -> String {
        let decoration = self.get(style);
        if style == Style::None || decoration.is_plain() {
            return text.to_string();
        }
        decoration.content_style().apply(text).to_string()
    }
}
