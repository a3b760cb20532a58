//! Classification to terminal color mapping.

use core_syntax::Highlight;
use crossterm::style::Color;

/// Foreground color for `class`; `None` means the terminal default.
pub fn highlight_color(class: Highlight) -> Option<Color> {
    match class {
        Highlight::Normal => None,
        Highlight::Comment | Highlight::BlockComment => Some(Color::DarkCyan),
        Highlight::Keyword1 => Some(Color::DarkYellow),
        Highlight::Keyword2 => Some(Color::DarkGreen),
        Highlight::String => Some(Color::DarkMagenta),
        Highlight::Number => Some(Color::DarkRed),
        Highlight::Match => Some(Color::DarkBlue),
    }
}
