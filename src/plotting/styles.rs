use plotters::style::{RGBAColor, RGBColor};

/// Chart color palette, one per UI theme.
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Series color; indigo, matching the dashboard accent.
    pub accent: RGBColor,
}

impl ChartTheme {
    pub fn dark() -> Self {
        Self {
            background_color: RGBAColor(15, 17, 26, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            accent: RGBColor(129, 140, 248),
        }
    }

    pub fn light() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(17, 24, 39, 0.9),
            grid_color: RGBAColor(17, 24, 39, 0.12),
            axis_color: RGBAColor(17, 24, 39, 0.8),
            accent: RGBColor(79, 70, 229),
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 15,
            margin: 10,
            label_area_size: 50,
        }
    }
}
