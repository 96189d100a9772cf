//! Creatives tab: ad-level table with cyclable sort

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::format;
use crate::tui::theme::{rate_level, RateKind, Theme};
use crate::tui::widgets::tabs::{Tab, TabBar};
use crate::types::Ad;

/// Rows consumed by header, tabs, sort line and table header
const CHROME_ROWS: u16 = 5;

/// Spend floor applied when the low-spend filter is on
pub const MIN_SPEND_FILTER: f64 = 10.0;

/// Sort key for the ad table, cycled with the `s` key.
/// All keys sort descending; for CPA that surfaces the most expensive
/// conversions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdSort {
    #[default]
    Spend,
    Roas,
    Cpa,
    Ctr,
    HookRate,
    HoldRate,
}

impl AdSort {
    pub fn label(self) -> &'static str {
        match self {
            Self::Spend => "spend",
            Self::Roas => "roas",
            Self::Cpa => "cpa",
            Self::Ctr => "ctr",
            Self::HookRate => "hook",
            Self::HoldRate => "hold",
        }
    }

    /// Next sort key (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Spend => Self::Roas,
            Self::Roas => Self::Cpa,
            Self::Cpa => Self::Ctr,
            Self::Ctr => Self::HookRate,
            Self::HookRate => Self::HoldRate,
            Self::HoldRate => Self::Spend,
        }
    }

    /// Sort key value for an ad
    fn key(self, ad: &Ad) -> f64 {
        match self {
            Self::Spend => ad.metrics.spend,
            Self::Roas => ad.metrics.roas,
            Self::Cpa => ad.metrics.cpa,
            Self::Ctr => ad.metrics.ctr,
            Self::HookRate => ad.metrics.hook_rate,
            Self::HoldRate => ad.metrics.hold_rate,
        }
    }
}

/// Creatives view widget
pub struct CreativesView<'a> {
    ads: &'a [Ad],
    sort: AdSort,
    filter_low_spend: bool,
    scroll: usize,
    tab: Tab,
    theme: Theme,
}

impl<'a> CreativesView<'a> {
    pub fn new(
        ads: &'a [Ad],
        sort: AdSort,
        filter_low_spend: bool,
        scroll: usize,
        theme: Theme,
    ) -> Self {
        Self {
            ads,
            sort,
            filter_low_spend,
            scroll,
            tab: Tab::Creatives,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Greatest scroll offset that still leaves a full page of rows
    pub fn max_scroll_offset(ad_count: usize, area_height: u16) -> usize {
        let visible = area_height.saturating_sub(CHROME_ROWS) as usize;
        ad_count.saturating_sub(visible.max(1))
    }

    /// Ads in render order for the current sort key and spend filter
    pub fn sorted<'b>(ads: &'b [Ad], sort: AdSort, filter_low_spend: bool) -> Vec<&'b Ad> {
        let mut rows: Vec<&Ad> = ads
            .iter()
            .filter(|a| !filter_low_spend || a.metrics.spend >= MIN_SPEND_FILTER)
            .collect();
        rows.sort_by(|a, b| sort.key(b).total_cmp(&sort.key(a)));
        rows
    }
}

impl Widget for CreativesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 60 || area.height < CHROME_ROWS {
            return;
        }
        let t = self.theme;

        let rows = Self::sorted(self.ads, self.sort, self.filter_low_spend);

        let header = format!("Ads ({})", rows.len());
        buf.set_string(
            area.x + 1,
            area.y,
            header,
            Style::default().fg(t.text()).add_modifier(Modifier::BOLD),
        );

        let tab_area = Rect::new(area.x, area.y + 1, area.width, 1);
        TabBar::new(self.tab, t).render(tab_area, buf);

        // Sort and filter indicator line
        let filter = if self.filter_low_spend {
            format!("  ·  spend ≥ ${:.0} (f)", MIN_SPEND_FILTER)
        } else {
            String::new()
        };
        let sort_line = format!("sort: {} (press s to cycle){}", self.sort.label(), filter);
        buf.set_string(area.x + 1, area.y + 2, &sort_line, Style::default().fg(t.muted()));

        // Table header
        let table_y = area.y + 3;
        let name_width = area.width.saturating_sub(64).max(16) as usize;
        let header = format!(
            "{:<width$} {:<10} {:>10} {:>7} {:>9} {:>7} {:>7} {:>7}",
            "AD",
            "CREATIVE",
            "SPEND",
            "ROAS",
            "CPA",
            "CTR",
            "HOOK",
            "HOLD",
            width = name_width,
        );
        buf.set_string(
            area.x + 1,
            table_y,
            header,
            Style::default().fg(t.muted()).add_modifier(Modifier::BOLD),
        );

        let visible = area.height.saturating_sub(CHROME_ROWS) as usize;
        for (i, ad) in rows.iter().skip(self.scroll).take(visible).enumerate() {
            let y = table_y + 1 + i as u16;
            let m = &ad.metrics;
            let mut x = area.x + 1;

            let name_style = if ad.status == "ACTIVE" {
                Style::default().fg(t.text())
            } else {
                Style::default().fg(t.muted())
            };
            buf.set_string(
                x,
                y,
                format!("{:<width$}", format::truncate(&ad.name, name_width), width = name_width),
                name_style,
            );
            x += name_width as u16 + 1;

            let creative = if ad.creative_type.is_empty() {
                "-".to_string()
            } else {
                format::truncate(&ad.creative_type, 10)
            };
            buf.set_string(x, y, format!("{:<10}", creative), Style::default().fg(t.muted()));
            x += 11;

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
                format!("{:>7}", format::pct(m.hook_rate)),
                Style::default().fg(t.rate_color(rate_level(RateKind::HookRate, m.hook_rate))),
            );
            x += 8;

            buf.set_string(
                x,
                y,
                format!("{:>7}", format::pct(m.hold_rate)),
                Style::default().fg(t.rate_color(rate_level(RateKind::HoldRate, m.hold_rate))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metrics;

    fn ad(name: &str, spend: f64, roas: f64) -> Ad {
        Ad {
            id: name.to_string(),
            name: name.to_string(),
            status: "ACTIVE".into(),
            adset_name: "Broad".into(),
            campaign_name: "Prospecting".into(),
            creative_type: "VIDEO".into(),
            metrics: Metrics {
                spend,
                roas,
                ..Metrics::default()
            },
        }
    }

    #[test]
    fn test_sort_cycle_is_closed() {
        let mut sort = AdSort::Spend;
        for _ in 0..6 {
            sort = sort.next();
        }
        assert_eq!(sort, AdSort::Spend);
    }

    #[test]
    fn test_sorted_by_spend_desc() {
        let ads = vec![ad("small", 10.0, 5.0), ad("big", 500.0, 0.5)];
        let rows = CreativesView::sorted(&ads, AdSort::Spend, false);
        assert_eq!(rows[0].name, "big");
    }

    #[test]
    fn test_sorted_by_roas_desc() {
        let ads = vec![ad("small", 10.0, 5.0), ad("big", 500.0, 0.5)];
        let rows = CreativesView::sorted(&ads, AdSort::Roas, false);
        assert_eq!(rows[0].name, "small");
    }

    #[test]
    fn test_low_spend_filter_drops_small_ads() {
        let ads = vec![ad("tiny", 2.0, 5.0), ad("big", 500.0, 0.5)];
        let rows = CreativesView::sorted(&ads, AdSort::Spend, true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "big");

        // Boundary is inclusive
        let ads = vec![ad("edge", MIN_SPEND_FILTER, 1.0)];
        assert_eq!(CreativesView::sorted(&ads, AdSort::Spend, true).len(), 1);
    }

    #[test]
    fn test_max_scroll_offset() {
        assert_eq!(CreativesView::max_scroll_offset(30, CHROME_ROWS + 20), 10);
        assert_eq!(CreativesView::max_scroll_offset(3, CHROME_ROWS + 20), 0);
    }
}
