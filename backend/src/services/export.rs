//! Vector image export of rendered charts.
//!
//! Rendering backends sit behind [`ImageRenderer`]. The bundled [`SvgRenderer`]
//! draws through plotters' SVG backend; it does not rasterize, so PNG and PDF
//! requests fail with `RenderUnavailable`.

use std::collections::BTreeSet;
use std::ops::Range;

use log::info;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::routes::chart::ChartSpec;
use crate::routes::export::{ExportedImage, ImageFormat};

/// A backend able to serialize a chart to one or more image formats.
pub trait ImageRenderer: Send + Sync {
    fn supports(&self, format: ImageFormat) -> bool;

    /// Serialize `chart`. Must fail with `RenderUnavailable` for unsupported formats.
    fn render(&self, chart: &ChartSpec, format: ImageFormat) -> DashboardResult<Vec<u8>>;
}

/// Serialize `chart` through `renderer` and wrap it as a downloadable file.
pub fn export_chart(
    renderer: &dyn ImageRenderer,
    chart: &ChartSpec,
    format: ImageFormat,
) -> DashboardResult<ExportedImage> {
    if !renderer.supports(format) {
        return Err(DashboardError::RenderUnavailable(format!(
            "no rendering engine available for {}",
            format.extension()
        )));
    }
    let bytes = renderer.render(chart, format)?;
    info!(
        "Exported chart as {} ({} bytes, {} points)",
        format.filename(),
        bytes.len(),
        chart.point_count()
    );
    Ok(ExportedImage {
        filename: format.filename(),
        content_type: format.content_type().to_string(),
        bytes,
    })
}

const MARGIN: u32 = 20;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 70;
const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 150;
const Y_TICKS: usize = 5;
const MAX_X_TICKS: usize = 15;
const FONT: &str = "sans-serif";
const LINE_COLOR: RGBColor = RGBColor(0x63, 0x6e, 0xfa);

/// Canvas size of exported SVG charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
        }
    }
}

fn drawing_failed<E>(err: DrawingAreaErrorKind<E>) -> DashboardError
where
    E: std::error::Error + Send + Sync,
{
    DashboardError::RenderUnavailable(format!("chart drawing failed: {}", err))
}

/// Value with trailing zeros trimmed, for tick labels.
fn format_tick(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `(min, max)` widened so that a flat or single-point range still has extent.
fn padded_range(min: f64, max: f64, pad_fraction: f64) -> Range<f64> {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0)..(max + 1.0)
    } else {
        let pad = (max - min) * pad_fraction;
        (min - pad)..(max + pad)
    }
}

fn finite_points(xs: &[i32], ys: &[f64]) -> Vec<(i32, f64)> {
    xs.iter()
        .copied()
        .zip(ys.iter().copied())
        .filter(|(_, v)| v.is_finite())
        .collect()
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render `chart` as an SVG document.
    pub fn render_svg(&self, chart: &ChartSpec) -> DashboardResult<String> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(DashboardError::RenderUnavailable(format!(
                "canvas {}x{} is too small to draw a chart",
                self.width, self.height
            )));
        }

        let points: Vec<(i32, f64)> = chart
            .traces
            .iter()
            .flat_map(|t| finite_points(&t.x, &t.y))
            .collect();
        let years: BTreeSet<i32> = points.iter().map(|(y, _)| *y).collect();

        let x_range = match (years.first(), years.last()) {
            (Some(&min), Some(&max)) if min < max => min..max,
            (Some(&year), _) => (year - 1)..(year + 1),
            _ => 0..1,
        };
        let y_range = if points.is_empty() {
            0.0..1.0
        } else {
            let min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
            let max = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
            padded_range(min, max, 0.1)
        };

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(drawing_failed)?;

            let mut builder = ChartBuilder::on(&root);
            builder
                .margin(MARGIN)
                .x_label_area_size(X_LABEL_AREA)
                .y_label_area_size(Y_LABEL_AREA);
            if let Some(title) = &chart.layout.title {
                builder.caption(title, (FONT, 20));
            }
            let mut ctx = builder
                .build_cartesian_2d(x_range, y_range)
                .map_err(drawing_failed)?;

            ctx.configure_mesh()
                .x_desc(chart.layout.x_axis.title.as_str())
                .y_desc(chart.layout.y_axis.title.as_str())
                .axis_desc_style((FONT, 14))
                .label_style((FONT, 12))
                .x_labels(years.len().clamp(3, MAX_X_TICKS))
                .y_labels(Y_TICKS)
                .y_label_formatter(&|value: &f64| format_tick(*value))
                .draw()
                .map_err(drawing_failed)?;

            for trace in &chart.traces {
                let trace_points = finite_points(&trace.x, &trace.y);
                if trace_points.is_empty() {
                    continue;
                }
                ctx.draw_series(LineSeries::new(
                    trace_points.iter().copied(),
                    LINE_COLOR.stroke_width(2),
                ))
                .map_err(drawing_failed)?;
                let radius = (trace.marker_size / 2).max(1);
                ctx.draw_series(
                    trace_points
                        .iter()
                        .map(|&point| Circle::new(point, radius, LINE_COLOR.filled())),
                )
                .map_err(drawing_failed)?;
            }

            root.present().map_err(drawing_failed)?;
        }
        Ok(buffer)
    }
}

impl ImageRenderer for SvgRenderer {
    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Svg
    }

    fn render(&self, chart: &ChartSpec, format: ImageFormat) -> DashboardResult<Vec<u8>> {
        if !self.supports(format) {
            return Err(DashboardError::RenderUnavailable(format!(
                "SVG renderer cannot produce {}",
                format.extension()
            )));
        }
        self.render_svg(chart).map(String::into_bytes)
    }
}
