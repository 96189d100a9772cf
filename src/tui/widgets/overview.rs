//! Overview tab: account KPI strip and campaign table

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::format;
use crate::tui::theme::{rate_level, RateKind, Theme};
use crate::tui::widgets::tabs::{Tab, TabBar};
use crate::types::{AccountInfo, AccountSummary, Campaign, DateWindow};

/// Rows consumed by header, tabs, KPI strip and table header
const CHROME_ROWS: u16 = 7;

/// Data references for the overview
pub struct OverviewData<'a> {
    pub account: &'a AccountInfo,
    pub window: DateWindow,
    pub summary: &'a AccountSummary,
    pub campaigns: &'a [Campaign],
    pub loaded_at: DateTime<Local>,
}

/// Overview view widget
pub struct Overview<'a> {
    data: OverviewData<'a>,
    scroll: usize,
    tab: Tab,
    theme: Theme,
}

impl<'a> Overview<'a> {
    pub fn new(data: OverviewData<'a>, scroll: usize, theme: Theme) -> Self {
        Self {
            data,
            scroll,
            tab: Tab::Overview,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Greatest scroll offset that still leaves a full page of rows
    pub fn max_scroll_offset(campaign_count: usize, area_height: u16) -> usize {
        let visible = area_height.saturating_sub(CHROME_ROWS) as usize;
        campaign_count.saturating_sub(visible.max(1))
    }
}

struct Kpi {
    label: &'static str,
    value: String,
    kind: Option<RateKind>,
    raw: f64,
}

impl Widget for Overview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 40 || area.height < CHROME_ROWS {
            return;
        }
        let t = self.theme;

        // Header: account, window, currency, load time
        let header = format!(
            "{}  ·  {}  ·  {}  ·  updated {}",
            self.data.account.name,
            self.data.window.label(),
            self.data.account.currency.as_deref().unwrap_or("USD"),
            self.data.loaded_at.format("%H:%M:%S"),
        );
        buf.set_string(
            area.x + 1,
            area.y,
            format::truncate(&header, area.width as usize - 2),
            Style::default().fg(t.text()).add_modifier(Modifier::BOLD),
        );

        // Tab bar
        let tab_area = Rect::new(area.x, area.y + 1, area.width, 1);
        TabBar::new(self.tab, t).render(tab_area, buf);

        // KPI strip
        let s = self.data.summary;
        let kpis = [
            Kpi {
                label: "SPEND",
                value: format::money(s.spend),
                kind: None,
                raw: s.spend,
            },
            Kpi {
                label: "ROAS",
                value: format::times(s.roas),
                kind: Some(RateKind::Roas),
                raw: s.roas,
            },
            Kpi {
                label: "CPA",
                value: format::money(s.cpa),
                kind: None,
                raw: s.cpa,
            },
            Kpi {
                label: "CTR",
                value: format::pct(s.ctr),
                kind: Some(RateKind::Ctr),
                raw: s.ctr,
            },
            Kpi {
                label: "CPM",
                value: format::money(s.cpm),
                kind: None,
                raw: s.cpm,
            },
            Kpi {
                label: "PURCH",
                value: format::count(s.purchases),
                kind: None,
                raw: s.purchases,
            },
            Kpi {
                label: "HOOK",
                value: format::pct(s.hook_rate),
                kind: Some(RateKind::HookRate),
                raw: s.hook_rate,
            },
            Kpi {
                label: "HOLD",
                value: format::pct(s.hold_rate),
                kind: Some(RateKind::HoldRate),
                raw: s.hold_rate,
            },
        ];

        let label_y = area.y + 3;
        let value_y = area.y + 4;
        let col_width = (area.width.saturating_sub(2) / kpis.len() as u16).max(8);
        for (i, kpi) in kpis.iter().enumerate() {
            let x = area.x + 1 + i as u16 * col_width;
            if x + col_width > area.x + area.width {
                break;
            }
            buf.set_string(x, label_y, kpi.label, Style::default().fg(t.muted()));
            let value_style = match kpi.kind {
                Some(kind) => Style::default().fg(t.rate_color(rate_level(kind, kpi.raw))),
                None if kpi.label == "SPEND" => {
                    Style::default().fg(t.money()).add_modifier(Modifier::BOLD)
                }
                None => Style::default().fg(t.text()),
            };
            buf.set_string(x, value_y, &kpi.value, value_style);
        }

        // Campaign table header
        let table_y = area.y + 6;
        let name_width = area.width.saturating_sub(56).max(16) as usize;
        let header = format!(
            "{:<width$} {:<9} {:>10} {:>7} {:>9} {:>7} {:>6}",
            "CAMPAIGN",
            "STATUS",
            "SPEND",
            "ROAS",
            "CPA",
            "CTR",
            "PURCH",
            width = name_width,
        );
        buf.set_string(
            area.x + 1,
            table_y,
            header,
            Style::default().fg(t.muted()).add_modifier(Modifier::BOLD),
        );

        // Rows, spend descending
        let mut rows: Vec<&Campaign> = self.data.campaigns.iter().collect();
        rows.sort_by(|a, b| b.metrics.spend.total_cmp(&a.metrics.spend));

        let visible = area.height.saturating_sub(CHROME_ROWS) as usize;
        for (i, c) in rows.iter().skip(self.scroll).take(visible).enumerate() {
            let y = table_y + 1 + i as u16;
            let m = &c.metrics;
            let mut x = area.x + 1;

            let name_style = if c.status == "ACTIVE" {
                Style::default().fg(t.text())
            } else {
                Style::default().fg(t.muted())
            };
            buf.set_string(
                x,
                y,
                format!("{:<width$}", format::truncate(&c.name, name_width), width = name_width),
                name_style,
            );
            x += name_width as u16 + 1;

            buf.set_string(x, y, format!("{:<9}", format::truncate(&c.status, 9)), name_style);
            x += 10;

            buf.set_string(
                x,
                y,
                format!("{:>10}", format::money(m.spend)),
                Style::default().fg(t.money()),
            );
            x += 11;

            buf.set_string(
                x,
                y,
                format!("{:>7}", format::times(m.roas)),
                Style::default().fg(t.rate_color(rate_level(RateKind::Roas, m.roas))),
            );
            x += 8;

            buf.set_string(
                x,
                y,
                format!("{:>9}", format::money(m.cpa)),
                Style::default().fg(t.text()),
            );
            x += 10;

            buf.set_string(
                x,
                y,
                format!("{:>7}", format::pct(m.ctr)),
                Style::default().fg(t.rate_color(rate_level(RateKind::Ctr, m.ctr))),
            );
            x += 8;

            buf.set_string(
                x,
                y,
                format!("{:>6}", format::count(m.purchases)),
                Style::default().fg(t.text()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll_offset_with_room() {
        // 30 rows, 20 visible lines after chrome
        assert_eq!(Overview::max_scroll_offset(30, CHROME_ROWS + 20), 10);
    }

    #[test]
    fn test_max_scroll_offset_everything_fits() {
        assert_eq!(Overview::max_scroll_offset(5, CHROME_ROWS + 20), 0);
    }

    #[test]
    fn test_max_scroll_offset_tiny_terminal() {
        // Degenerate height never underflows
        assert_eq!(Overview::max_scroll_offset(10, 0), 9);
    }
}
