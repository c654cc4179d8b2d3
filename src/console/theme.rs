//! Presentation theme for the operator console

use console::Style;

/// Styles applied to console output. Passed to the console by value; there is
/// no process-wide color state.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub info: Style,
    pub accent: Style,
    pub success: Style,
    pub warning: Style,
    pub failure: Style,
    pub emphasis: Style,
}

impl Theme {
    /// ANSI colors, forced on regardless of terminal detection
    pub fn colored() -> Self {
        Self {
            header: Style::new().magenta().bright().bold().force_styling(true),
            info: Style::new().blue().bright().force_styling(true),
            accent: Style::new().cyan().bright().force_styling(true),
            success: Style::new().green().bright().force_styling(true),
            warning: Style::new().yellow().bright().force_styling(true),
            failure: Style::new().red().bright().force_styling(true),
            emphasis: Style::new().bold().force_styling(true),
        }
    }

    /// No styling at all
    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            info: Style::new(),
            accent: Style::new(),
            success: Style::new(),
            warning: Style::new(),
            failure: Style::new(),
            emphasis: Style::new(),
        }
    }

    pub fn from_flag(color: bool) -> Self {
        if color {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Green for buys, red for sells
    pub fn side(&self, side: &str) -> &Style {
        if side.eq_ignore_ascii_case("BUY") {
            &self.success
        } else {
            &self.failure
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_emits_no_escape_codes() {
        let theme = Theme::plain();
        let text = theme.failure.apply_to("Error").to_string();
        assert_eq!(text, "Error");
    }

    #[test]
    fn test_colored_theme_emits_escape_codes() {
        let theme = Theme::colored();
        let text = theme.success.apply_to("OK").to_string();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("OK"));
    }

    #[test]
    fn test_side_style_selection() {
        let theme = Theme::colored();
        let buy = theme.side("buy").apply_to("x").to_string();
        let sell = theme.side("SELL").apply_to("x").to_string();
        assert_eq!(buy, theme.success.apply_to("x").to_string());
        assert_eq!(sell, theme.failure.apply_to("x").to_string());
    }
}
