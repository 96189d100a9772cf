//! Terminal user interface

pub mod app;
pub mod format;
pub mod theme;
pub mod widgets;

pub use app::{run, App, LaunchConfig};
pub use theme::Theme;
