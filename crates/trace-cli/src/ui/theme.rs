//! Badges and the light/dark color palette.

use owo_colors::{OwoColorize, Style};
use trace_core::theme::ThemeMode;

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, true) => "[\u{2139}]",
            (Self::Info, false) => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Err => Style::new().red(),
            Self::Info => Style::new().cyan(),
        }
    }
}

/// Styles shared across renderers.
pub mod styles {
    use owo_colors::Style;
    use trace_core::theme::ThemeMode;

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn bold() -> Style {
        Style::new().bold()
    }

    /// Accent color for titles and dates; brighter on dark terminals.
    pub fn accent(palette: ThemeMode) -> Style {
        match palette {
            ThemeMode::Light => Style::new().blue().bold(),
            ThemeMode::Dark => Style::new().bright_cyan().bold(),
        }
    }
}

/// Apply `style` when color output is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Spinner frames for the active symbol set.
pub fn spinner_frames(unicode: bool) -> &'static [&'static str] {
    if unicode {
        &[
            "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}",
            "\u{2827}", "\u{2807}", "\u{280F}", "",
        ]
    } else {
        &["|", "/", "-", "\\", ""]
    }
}

/// Label for the theme a toggle would switch to.
pub fn toggle_label(palette: ThemeMode) -> &'static str {
    match palette {
        ThemeMode::Light => "Dark mode",
        ThemeMode::Dark => "Light mode",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_display() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
        assert_eq!(Badge::Err.display(false), "[ERR]");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("hello", styles::bold(), false), "hello");
        assert_ne!(styled("hello", styles::bold(), true), "hello");
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(ThemeMode::Light), "Dark mode");
        assert_eq!(toggle_label(ThemeMode::Dark), "Light mode");
    }

    #[test]
    fn test_spinner_frames() {
        assert_eq!(spinner_frames(false).len(), 5);
        assert_eq!(spinner_frames(true).len(), 11);
    }
}
