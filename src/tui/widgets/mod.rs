//! TUI widgets

pub mod analysis;
pub mod creatives;
pub mod help;
pub mod overview;
pub mod spinner;
pub mod tabs;
