//! Meta Ads performance dashboard: fetch, normalize and aggregate ad
//! insights, browse them in a TUI, and run an AI analysis over the numbers.

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
