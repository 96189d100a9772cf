//! Type definitions for adlens

mod entity;
mod error;
pub mod metrics;
mod raw;

pub use entity::*;
pub use error::*;
pub use metrics::Metrics;
pub use raw::*;

use clap::ValueEnum;
use serde::Serialize;

/// Reporting period token, passed through opaquely to the Graph API.
/// The core does no date math; the platform resolves these server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum DateWindow {
    #[value(name = "last_7d")]
    Last7d,
    #[value(name = "last_14d")]
    Last14d,
    #[default]
    #[value(name = "last_30d")]
    Last30d,
    #[value(name = "last_90d")]
    Last90d,
    #[value(name = "this_month")]
    ThisMonth,
    #[value(name = "last_month")]
    LastMonth,
}

impl DateWindow {
    /// Wire token as the API expects it (`date_preset` value)
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Last7d => "last_7d",
            Self::Last14d => "last_14d",
            Self::Last30d => "last_30d",
            Self::Last90d => "last_90d",
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
        }
    }

    /// Human label for headers and selectors
    pub fn label(self) -> &'static str {
        match self {
            Self::Last7d => "Last 7 days",
            Self::Last14d => "Last 14 days",
            Self::Last30d => "Last 30 days",
            Self::Last90d => "Last 90 days",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
        }
    }

    /// All windows in selector order
    pub fn all() -> &'static [DateWindow] {
        &[
            Self::Last7d,
            Self::Last14d,
            Self::Last30d,
            Self::Last90d,
            Self::ThisMonth,
            Self::LastMonth,
        ]
    }

    /// Next window in selector order (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Last7d => Self::Last14d,
            Self::Last14d => Self::Last30d,
            Self::Last30d => Self::Last90d,
            Self::Last90d => Self::ThisMonth,
            Self::ThisMonth => Self::LastMonth,
            Self::LastMonth => Self::Last7d,
        }
    }

    /// Previous window in selector order (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Last7d => Self::LastMonth,
            Self::Last14d => Self::Last7d,
            Self::Last30d => Self::Last14d,
            Self::Last90d => Self::Last30d,
            Self::ThisMonth => Self::Last90d,
            Self::LastMonth => Self::ThisMonth,
        }
    }
}

/// Displays as the wire token, which is also what clap accepts back
impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_tokens() {
        assert_eq!(DateWindow::Last7d.as_token(), "last_7d");
        assert_eq!(DateWindow::ThisMonth.as_token(), "this_month");
        assert_eq!(DateWindow::LastMonth.as_token(), "last_month");
    }

    #[test]
    fn test_window_default() {
        assert_eq!(DateWindow::default(), DateWindow::Last30d);
    }

    #[test]
    fn test_window_display_matches_token() {
        assert_eq!(DateWindow::Last90d.to_string(), "last_90d");
    }

    #[test]
    fn test_window_cycle_is_closed() {
        let mut w = DateWindow::Last7d;
        for _ in 0..DateWindow::all().len() {
            w = w.next();
        }
        assert_eq!(w, DateWindow::Last7d);
    }

    #[test]
    fn test_window_prev_inverts_next() {
        for w in DateWindow::all() {
            assert_eq!(w.next().prev(), *w);
        }
    }
}
