//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 19;

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" adlens v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Navigation header
            Constraint::Length(1), // [2] Separator
            Constraint::Length(1), // [3] Tab/Shift+Tab
            Constraint::Length(1), // [4] 1-3
            Constraint::Length(1), // [5] Up/Down
            Constraint::Length(1), // [6] Padding
            Constraint::Length(1), // [7] Data header
            Constraint::Length(1), // [8] Separator
            Constraint::Length(1), // [9] [ / ]
            Constraint::Length(1), // [10] r
            Constraint::Length(1), // [11] s
            Constraint::Length(1), // [12] f
            Constraint::Length(1), // [13] a
            Constraint::Length(1), // [14] Padding
            Constraint::Length(1), // [15] q/Esc, ?
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

        let section = |text: &'static str| {
            Line::from(vec![Span::styled(
                text,
                Style::default()
                    .fg(self.theme.warn())
                    .add_modifier(Modifier::BOLD),
            )])
        };
        let sep = "─".repeat(inner.width as usize);

        Paragraph::new(section("Navigation"))
            .alignment(Alignment::Left)
            .render(chunks[1], buf);
        buf.set_string(chunks[2].x, chunks[2].y, &sep, Style::default().fg(self.theme.muted()));

        render_keybinding(chunks[3], buf, "Tab / Shift+Tab", "Switch view", self.theme);
        render_keybinding(chunks[4], buf, "1-3", "Jump to view", self.theme);
        render_keybinding(chunks[5], buf, "Up/Down or j/k", "Scroll", self.theme);

        Paragraph::new(section("Data"))
            .alignment(Alignment::Left)
            .render(chunks[7], buf);
        buf.set_string(chunks[8].x, chunks[8].y, &sep, Style::default().fg(self.theme.muted()));

        render_keybinding(chunks[9], buf, "[ / ]", "Change date window", self.theme);
        render_keybinding(chunks[10], buf, "r", "Reload data", self.theme);
        render_keybinding(chunks[11], buf, "s", "Cycle ad sort (Creatives)", self.theme);
        render_keybinding(chunks[12], buf, "f", "Filter low spend (Creatives)", self.theme);
        render_keybinding(chunks[13], buf, "a", "Run AI analysis", self.theme);

        render_keybinding(chunks[15], buf, "q / Esc / ?", "Quit / close help", self.theme);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<18}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc, Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, POPUP_WIDTH);
        assert_eq!(popup_area.height, POPUP_HEIGHT);
        assert_eq!(popup_area.x, (100 - POPUP_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - POPUP_HEIGHT) / 2);
    }

    #[test]
    fn test_help_popup_small_terminal() {
        // Terminal smaller than popup
        let area = Rect::new(0, 0, 30, 10);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }
}
