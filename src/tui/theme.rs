//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Performance ratios that get threshold-based coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Ctr,
    Roas,
    HookRate,
    HoldRate,
}

/// Classification of a ratio against its benchmark thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLevel {
    Strong,
    Fair,
    Weak,
    /// Zero or missing, rendered muted instead of alarming
    None,
}

/// Classify a ratio value against the benchmarks for its kind
pub fn rate_level(kind: RateKind, value: f64) -> RateLevel {
    if value <= 0.0 {
        return RateLevel::None;
    }
    let (strong, fair) = match kind {
        RateKind::Ctr => (1.5, 0.8),
        RateKind::Roas => (2.0, 1.0),
        RateKind::HookRate => (30.0, 15.0),
        RateKind::HoldRate => (40.0, 20.0),
    };
    if value >= strong {
        RateLevel::Strong
    } else if value >= fair {
        RateLevel::Fair
    } else {
        RateLevel::Weak
    }
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, sort markers)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Spend/money text color
    pub fn money(self) -> Color {
        match self {
            Self::Dark => Color::Magenta,
            Self::Light => Color::Indexed(90), // dark magenta (ANSI 256)
        }
    }

    /// Above-benchmark indicator color
    pub fn good(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Mid-benchmark indicator color
    pub fn warn(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Error/below-benchmark indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Color for a classified ratio
    pub fn rate_color(self, level: RateLevel) -> Color {
        match level {
            RateLevel::Strong => self.good(),
            RateLevel::Fair => self.warn(),
            RateLevel::Weak => self.error(),
            RateLevel::None => self.muted(),
        }
    }
}
