mod chart;
mod styles;


pub use chart::{history_chart_png, PlotError};
pub use styles::{ChartStyle, ChartTheme};
