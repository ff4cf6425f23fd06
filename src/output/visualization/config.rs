//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust,ignore
/// use kdv_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Soliton, α = 0.5");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "u")
    pub ylabel: String,

    /// Line color for single-curve plots (default: RED)
    pub line_color: RGBColor,

    /// Colors for multi-curve plots, cycled; `None` uses the default palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "u".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Spatial snapshots `u(x)`; x label "x", default title "Profile Evolution"
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Profile Evolution".to_string()),
            ..Self::default()
        }
    }

    /// Time series panels; x label "t", default title "Diagnostics"
    pub fn diagnostics(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "t".to_string(),
            ylabel: String::new(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Diagnostics".to_string()),
            ..Self::default()
        }
    }

    /// Color of the `index`-th curve
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && !colors.is_empty()
        {
            return colors[index % colors.len()];
        }

        const PALETTE: [RGBColor; 8] = [
            BLACK,
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
        ];
        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
