use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use once_cell::sync::Lazy;
use tokio::sync::Mutex as TokioMutex;

use super::styles::{ChartStyle, ChartTheme};
use crate::types::CommitHistory;

pub type PlotError = Box<dyn Error + Send + Sync>;

const CHART_SIZE: (u32, u32) = (640, 360);

// Rendered charts keyed by repository, theme and data, with a 5-minute expiration
static PLOT_CACHE: Lazy<Arc<TokioMutex<LruCache<PlotCacheKey, (Vec<u8>, Instant)>>>> =
    Lazy::new(|| {
        Arc::new(TokioMutex::new(LruCache::new(
            NonZeroUsize::new(10).unwrap(),
        )))
    });

#[derive(Hash, Eq, PartialEq)]
struct PlotCacheKey {
    repo: String,
    dark: bool,
    data_hash: u64,
}

impl PlotCacheKey {
    fn new(repo: &str, history: &CommitHistory, dark: bool) -> Self {
        let mut hasher = DefaultHasher::new();
        history.0.hash(&mut hasher);

        Self {
            repo: repo.to_string(),
            dark,
            data_hash: hasher.finish(),
        }
    }
}

/// Render the commit-history chart for one repository as PNG bytes.
pub async fn history_chart_png(
    repo: &str,
    history: &CommitHistory,
    dark: bool,
) -> Result<Vec<u8>, PlotError> {
    let cache_key = PlotCacheKey::new(repo, history, dark);

    if let Some((png, rendered_at)) = PLOT_CACHE.lock().await.get(&cache_key) {
        if rendered_at.elapsed() < Duration::from_secs(300) {
            return Ok(png.clone());
        }
    }

    let repo_name = repo.to_string();
    let history = history.clone();
    let png =
        tokio::task::spawn_blocking(move || render_png(&repo_name, &history, dark)).await??;

    PLOT_CACHE
        .lock()
        .await
        .put(cache_key, (png.clone(), Instant::now()));

    Ok(png)
}

/// Draw into an RGB buffer and PNG-encode it.
pub(crate) fn render_png(
    repo: &str,
    history: &CommitHistory,
    dark: bool,
) -> Result<Vec<u8>, PlotError> {
    let (width, height) = CHART_SIZE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(repo, history, dark, &root)?;
        root.present()?;
    }

    let rgb = image::RgbImage::from_raw(width, height, buffer)
        .ok_or("chart buffer size mismatch")?;
    let mut png = Vec::new();
    rgb.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

fn draw_chart(
    repo: &str,
    history: &CommitHistory,
    dark: bool,
    root: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), PlotError> {
    let theme = if dark {
        ChartTheme::dark()
    } else {
        ChartTheme::light()
    };
    let style = ChartStyle::default();

    root.fill(&theme.background_color)?;

    if history.is_empty() {
        return Ok(());
    }

    let max_count = (history.max_count() as f64 * 1.2).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{repo}: commits per day"),
            ("sans-serif", (style.font_size + 10) as i32)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin as i32)
        .set_all_label_area_size(style.label_area_size as i32)
        .build_cartesian_2d(0f64..history.len() as f64, 0f64..max_count)?;

    // Sparse x labels: endpoints plus quarter marks, so thirty daily labels
    // never collide.
    let labels: Vec<String> = history.iter().map(|(label, _)| label.clone()).collect();
    let x_label_formatter = move |x: &f64| {
        let idx = *x as usize;
        if idx >= labels.len() {
            return String::new();
        }
        let step = (labels.len() / 4).max(1);
        if idx == 0 || idx == labels.len() - 1 || idx % step == 0 {
            labels[idx].clone()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Commits")
        .label_style(
            ("sans-serif", style.font_size as i32)
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        .x_label_style(
            ("sans-serif", style.font_size as i32)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    let points: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .map(|(idx, (_, count))| (idx as f64, *count as f64))
        .collect();

    chart.draw_series(AreaSeries::new(
        points.clone(),
        0.0,
        theme.accent.mix(0.25),
    ))?;
    chart.draw_series(LineSeries::new(
        points,
        theme.accent.stroke_width(style.line_width),
    ))?;

    Ok(())
}
