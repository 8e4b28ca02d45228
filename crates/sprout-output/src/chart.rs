//! Scatter charts with a simple least-squares fit line.
//!
//! Each chart plots one predictor against one outcome from the cleaned table,
//! overlays the fitted line `y = a + b x` in the chart colour and shades the
//! 95% confidence band of the fitted mean.

use crate::artifact::Artifact;
use crate::error::{OutputError, Result};
use crate::format::title_case;
use ndarray::{Array1, Array2, array};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use sprout_model::design::INTERCEPT;
use sprout_model::ols;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Chart width in pixels (7 in at 160 dpi).
pub const CHART_WIDTH: u32 = 1120;

/// Chart height in pixels (5 in at 160 dpi).
pub const CHART_HEIGHT: u32 = 800;

/// Confidence level of the shaded band.
pub const BAND_CONFIDENCE: f64 = 0.95;

/// Points evaluated along the fit line.
const LINE_POINTS: usize = 100;

const SCATTER_COLOR: RGBColor = RGBColor(76, 114, 176);
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);

/// Which columns to plot and how the chart looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    /// Horizontal axis column
    pub x: String,
    /// Vertical axis column
    pub y: String,
    /// Chart title
    pub title: String,
    /// Output file name
    pub file_name: String,
    /// Fit line colour as `#rrggbb`
    pub color: String,
}

impl ChartSpec {
    /// Create a chart specification.
    pub fn new(x: &str, y: &str, title: &str, file_name: &str, color: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            title: title.to_string(),
            file_name: file_name.to_string(),
            color: color.to_string(),
        }
    }

    /// The three regression charts, in report order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "sessions",
                "orders",
                "Orders vs Sessions",
                "reg_orders_vs_sessions.png",
                "#d9480f",
            ),
            Self::new(
                "orders",
                "revenue_usd",
                "Revenue vs Orders",
                "reg_revenue_vs_orders.png",
                "#0b7285",
            ),
            Self::new(
                "sessions",
                "signups",
                "Signups vs Sessions",
                "reg_signups_vs_sessions.png",
                "#2b8a3e",
            ),
        ]
    }

    /// Horizontal axis label.
    pub fn x_label(&self) -> String {
        title_case(&self.x)
    }

    /// Vertical axis label.
    pub fn y_label(&self) -> String {
        title_case(&self.y)
    }

    /// Parse the fit line colour.
    pub fn rgb(&self) -> Result<RGBColor> {
        let invalid = || OutputError::InvalidColor(self.color.clone());
        let hex = self.color.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Fitted line and confidence band sampled across the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct FitBand {
    /// Intercept of the fitted line
    pub intercept: f64,
    /// Slope of the fitted line
    pub slope: f64,
    /// Points on the fitted line
    pub line: Vec<(f64, f64)>,
    /// Lower edge of the band
    pub lower: Vec<(f64, f64)>,
    /// Upper edge of the band
    pub upper: Vec<(f64, f64)>,
}

/// A chart bound to its data.
#[derive(Debug, Clone)]
pub struct RegressionChart<'a> {
    spec: &'a ChartSpec,
    points: Vec<(f64, f64)>,
}

impl<'a> RegressionChart<'a> {
    /// Create a chart from `(x, y)` points.
    pub const fn new(spec: &'a ChartSpec, points: Vec<(f64, f64)>) -> Self {
        Self { spec, points }
    }

    /// Collect the rows of `df` where both chart columns are finite.
    pub fn from_table(df: &DataFrame, spec: &'a ChartSpec) -> Result<Self> {
        let xs = df.column(spec.x.as_str())?.f64()?;
        let ys = df.column(spec.y.as_str())?.f64()?;

        let points = xs
            .into_iter()
            .zip(ys)
            .filter_map(|pair| match pair {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
                _ => None,
            })
            .collect();

        Ok(Self::new(spec, points))
    }

    /// The chart specification.
    pub const fn spec(&self) -> &ChartSpec {
        self.spec
    }

    /// Plotted points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Fit `y ~ x` and sample the line and band, or `None` when the points
    /// do not support a fit (fewer than three, or constant `x`).
    pub fn fit_band(&self) -> Option<FitBand> {
        let n = self.points.len();
        let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { self.points[i].0 });
        let y: Array1<f64> = self.points.iter().map(|&(_, y)| y).collect();
        let names = vec![INTERCEPT.to_string(), self.spec.x.clone()];

        let fit = match ols::fit(&x, &y, names) {
            Ok(fit) => fit,
            Err(e) => {
                debug!(chart = %self.spec.file_name, error = %e, "no fit line");
                return None;
            }
        };
        let t = fit.t_critical(BAND_CONFIDENCE).ok()?;

        let x_range = value_range(self.points.iter().map(|&(x, _)| x))?;
        let step = (x_range.end - x_range.start) / (LINE_POINTS - 1) as f64;

        let mut band = FitBand {
            intercept: fit.params()[0],
            slope: fit.params()[1],
            line: Vec::with_capacity(LINE_POINTS),
            lower: Vec::with_capacity(LINE_POINTS),
            upper: Vec::with_capacity(LINE_POINTS),
        };
        for i in 0..LINE_POINTS {
            let gx = x_range.start + step * i as f64;
            let row = array![1.0, gx];
            let fitted = fit.predict(row.view());
            let half_width = t * fit.mean_std_error(row.view());
            band.line.push((gx, fitted));
            band.lower.push((gx, fitted - half_width));
            band.upper.push((gx, fitted + half_width));
        }
        Some(band)
    }

    fn draw(&self, path: &Path, band: Option<&FitBand>, labelled: bool) -> Result<()> {
        let color = self.spec.rgb()?;

        let x_range = padded(value_range(self.points.iter().map(|&(x, _)| x)));
        let band_ys = band
            .into_iter()
            .flat_map(|b| b.lower.iter().chain(&b.upper).map(|&(_, y)| y));
        let y_range = padded(value_range(self.points.iter().map(|&(_, y)| y).chain(band_ys)));

        let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(24);
        if labelled {
            builder
                .caption(&self.spec.title, ("sans-serif", 36))
                .x_label_area_size(70)
                .y_label_area_size(90);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(chart_error)?;

        if labelled {
            chart
                .configure_mesh()
                .x_desc(self.spec.x_label())
                .y_desc(self.spec.y_label())
                .bold_line_style(GRID_COLOR)
                .light_line_style(WHITE)
                .label_style(("sans-serif", 20))
                .axis_desc_style(("sans-serif", 24))
                .draw()
                .map_err(chart_error)?;
        }

        chart
            .draw_series(
                self.points
                    .iter()
                    .map(|&point| Circle::new(point, 6, SCATTER_COLOR.mix(0.75).filled())),
            )
            .map_err(chart_error)?;

        if let Some(band) = band {
            let outline: Vec<(f64, f64)> =
                band.upper.iter().chain(band.lower.iter().rev()).copied().collect();
            chart
                .draw_series(std::iter::once(Polygon::new(outline, color.mix(0.15).filled())))
                .map_err(chart_error)?;
            chart
                .draw_series(LineSeries::new(band.line.iter().copied(), color.stroke_width(3)))
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

impl Artifact for RegressionChart<'_> {
    fn file_name(&self) -> &str {
        &self.spec.file_name
    }

    /// Draw the chart as PNG. If the labelled chart cannot be drawn (for
    /// example when no system font is available) it is drawn again without
    /// title and axis text.
    fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.spec.file_name);
        let band = self.fit_band();

        if let Err(e) = self.draw(&path, band.as_ref(), true) {
            warn!(chart = %self.spec.file_name, error = %e, "drawing chart without text");
            self.draw(&path, band.as_ref(), false)?;
        }

        info!(file = %path.display(), points = self.points.len(), "wrote chart");
        Ok(path)
    }
}

fn chart_error<E: std::error::Error>(err: E) -> OutputError {
    OutputError::Chart(err.to_string())
}

/// Smallest range covering `values`, `None` when empty.
fn value_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    values.fold(None, |range: Option<Range<f64>>, v| match range {
        Some(r) => Some(r.start.min(v)..r.end.max(v)),
        None => Some(v..v),
    })
}

/// Widen a range by 5% on each side; unit range when there is no data.
fn padded(range: Option<Range<f64>>) -> Range<f64> {
    let Some(range) = range else {
        return 0.0..1.0;
    };
    let span = range.end - range.start;
    let pad = if span > 0.0 { span * 0.05 } else { range.start.abs().max(1.0) * 0.05 };
    (range.start - pad)..(range.end + pad)
}
