//! Analysis tab: AI-generated report with styled section headings

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::format;
use crate::tui::theme::Theme;
use crate::tui::widgets::tabs::{Tab, TabBar};

/// Rows consumed by header and tabs
const CHROME_ROWS: u16 = 3;

/// Marker the model is instructed to put on section headings
const HEADING_PREFIX: &str = "## ";

/// Whether a report line is a section heading
pub fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with(HEADING_PREFIX)
}

/// What the analysis tab currently has to show
pub enum AnalysisContent<'a> {
    /// No report requested yet
    Idle,
    /// Request in flight
    Running,
    /// Finished report text
    Done(&'a str),
    /// Request failed
    Failed(&'a str),
}

/// Analysis view widget
pub struct AnalysisView<'a> {
    content: AnalysisContent<'a>,
    scroll: usize,
    tab: Tab,
    theme: Theme,
}

impl<'a> AnalysisView<'a> {
    pub fn new(content: AnalysisContent<'a>, scroll: usize, theme: Theme) -> Self {
        Self {
            content,
            scroll,
            tab: Tab::Analysis,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Greatest scroll offset that still leaves a full page of lines
    pub fn max_scroll_offset(line_count: usize, area_height: u16) -> usize {
        let visible = area_height.saturating_sub(CHROME_ROWS) as usize;
        line_count.saturating_sub(visible.max(1))
    }
}

impl Widget for AnalysisView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 40 || area.height < CHROME_ROWS {
            return;
        }
        let t = self.theme;

        buf.set_string(
            area.x + 1,
            area.y,
            "AI Analysis",
            Style::default().fg(t.text()).add_modifier(Modifier::BOLD),
        );

        let tab_area = Rect::new(area.x, area.y + 1, area.width, 1);
        TabBar::new(self.tab, t).render(tab_area, buf);

        let body_y = area.y + CHROME_ROWS;
        let width = area.width.saturating_sub(2) as usize;

        match self.content {
            AnalysisContent::Idle => {
                buf.set_string(
                    area.x + 1,
                    body_y,
                    "Press a to generate an analysis of the loaded account.",
                    Style::default().fg(t.muted()),
                );
            }
            AnalysisContent::Running => {
                buf.set_string(
                    area.x + 1,
                    body_y,
                    "Generating analysis...",
                    Style::default().fg(t.accent()),
                );
            }
            AnalysisContent::Failed(message) => {
                buf.set_string(
                    area.x + 1,
                    body_y,
                    format::truncate(&format!("Analysis failed: {}", message), width),
                    Style::default().fg(t.error()),
                );
            }
            AnalysisContent::Done(text) => {
                let visible = area.height.saturating_sub(CHROME_ROWS) as usize;
                for (i, line) in text.lines().skip(self.scroll).take(visible).enumerate() {
                    let y = body_y + i as u16;
                    let style = if is_heading(line) {
                        Style::default().fg(t.accent()).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(t.text())
                    };
                    let display = if is_heading(line) {
                        line.trim_start().trim_start_matches(HEADING_PREFIX)
                    } else {
                        line
                    };
                    buf.set_string(area.x + 1, y, format::truncate(display, width), style);
                }
            }
        }
    }
}
