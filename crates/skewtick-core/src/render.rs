//! PNG chart rendering.
//!
//! Two line charts are produced per run: traded volume by date and the
//! rolling skewness of log returns (defined windows only). Files are written
//! as `{symbol}_volume.png` and `{symbol}_skew.png` under the output
//! directory, which is created on demand; existing files are overwritten.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use thiserror::Error;
use time::macros::format_description;
use time::Date;
use tracing::{debug, info, warn};

use crate::{PriceSeries, ReturnSeries, Symbol};

/// 10x4 inch figure at 100 dpi.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1000, 400);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render an empty {what} series")]
    EmptySeries { what: &'static str },
    #[error("rolling values ({values}) do not line up with return dates ({dates})")]
    LengthMismatch { values: usize, dates: usize },
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Writes the volume and rolling-skew charts into one directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    text: bool,
}

impl ChartRenderer {
    /// Renderer with captions and axis labels when a system font is usable.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let text = font_available();
        if !text {
            warn!("no usable system font found; charts will be drawn without text");
        }
        Self {
            output_dir: output_dir.into(),
            size: DEFAULT_CHART_SIZE,
            text,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Skip captions and tick labels regardless of font availability.
    pub fn without_text(mut self) -> Self {
        self.text = false;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn volume_path(&self, symbol: &Symbol) -> PathBuf {
        self.output_dir
            .join(format!("{}_volume.png", symbol.file_stem()))
    }

    pub fn skew_path(&self, symbol: &Symbol) -> PathBuf {
        self.output_dir.join(format!("{}_skew.png", symbol.file_stem()))
    }

    /// Line chart of volume by bar date.
    pub fn render_volume(&self, series: &PriceSeries, title: &str) -> Result<PathBuf, RenderError> {
        if series.is_empty() {
            return Err(RenderError::EmptySeries { what: "price" });
        }

        let dates = series.dates();
        let points: Vec<(usize, f64)> = series
            .volumes()
            .into_iter()
            .enumerate()
            .map(|(i, volume)| (i, volume as f64))
            .collect();
        let peak = points.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let y_range = 0.0..if peak > 0.0 { peak * 1.05 } else { 1.0 };

        let path = self.volume_path(&series.symbol);
        self.draw_line_chart(&path, title, &dates, &points, y_range, |v| {
            format!("{:.1}M", v / 1_000_000.0)
        })?;
        info!(path = %path.display(), bars = series.len(), "wrote volume chart");
        Ok(path)
    }

    /// Line chart of the defined rolling skewness values.
    ///
    /// `rolling` must have one slot per return; `None` slots are dropped.
    pub fn render_rolling_skew(
        &self,
        symbol: &Symbol,
        returns: &ReturnSeries,
        rolling: &[Option<f64>],
        title: &str,
    ) -> Result<PathBuf, RenderError> {
        if rolling.len() != returns.len() {
            return Err(RenderError::LengthMismatch {
                values: rolling.len(),
                dates: returns.len(),
            });
        }

        let (dates, values): (Vec<Date>, Vec<f64>) = returns
            .points()
            .iter()
            .zip(rolling)
            .filter_map(|(point, value)| value.map(|v| (point.date, v)))
            .unzip();
        if values.is_empty() {
            return Err(RenderError::EmptySeries {
                what: "rolling skew",
            });
        }

        let points: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
        let low = values.iter().copied().fold(f64::INFINITY, f64::min);
        let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let y_range = padded_range(low, high);

        let path = self.skew_path(symbol);
        self.draw_line_chart(&path, title, &dates, &points, y_range, |v| format!("{v:.2}"))?;
        info!(path = %path.display(), points = values.len(), "wrote rolling skew chart");
        Ok(path)
    }

    fn draw_line_chart(
        &self,
        path: &Path,
        title: &str,
        dates: &[Date],
        points: &[(usize, f64)],
        y_range: Range<f64>,
        y_format: impl Fn(f64) -> String,
    ) -> Result<(), RenderError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;
        debug!(path = %path.display(), text = self.text, "drawing chart");

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let x_range = 0..dates.len().saturating_sub(1).max(1);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(12);
        if self.text {
            builder
                .caption(title, (FONT_FAMILY, 20))
                .x_label_area_size(36)
                .y_label_area_size(64);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_error)?;

        if self.text {
            let x_format = |index: &usize| dates.get(*index).map(format_date).unwrap_or_default();
            let y_label = |value: &f64| y_format(*value);
            chart
                .configure_mesh()
                .x_labels(6)
                .y_labels(6)
                .x_label_formatter(&x_format)
                .y_label_formatter(&y_label)
                .draw()
                .map_err(draw_error)?;
        }

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                BLUE.stroke_width(2),
            ))
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

/// Overrides the font file used for chart text.
pub const FONT_ENV_VAR: &str = "SKEWTICK_FONT";

const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

fn font_available() -> bool {
    *FONT_REGISTERED.get_or_init(register_system_font)
}

/// Register the first readable candidate as the chart font family.
fn register_system_font() -> bool {
    let from_env = std::env::var_os(FONT_ENV_VAR).map(PathBuf::from);
    let candidates = from_env
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = fs::read(&path) else {
            continue;
        };
        // The font registry holds `'static` data for the life of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!(path = %path.display(), "registered chart font");
                return (FONT_FAMILY, 12).into_font().box_size("0").is_ok();
            }
            Err(_) => warn!(path = %path.display(), "ignoring unreadable font file"),
        }
    }
    false
}

fn padded_range(low: f64, high: f64) -> Range<f64> {
    if (high - low).abs() < f64::EPSILON {
        return (low - 1.0)..(high + 1.0);
    }
    let pad = (high - low) * 0.1;
    (low - pad)..(high + pad)
}

fn format_date(date: &Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format).unwrap_or_else(|_| date.to_string())
}

fn draw_error(error: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(error.to_string())
}
