// Rasterization of the radar chart.

use std::fs;

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use once_cell::sync::OnceCell;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::radar::*;

/// The size of the picture, in pixels.
pub const CHART_SIZE: (u32, u32) = (600, 600);

const LABEL_FONT: &str = "sans-serif";

// Common locations of a sans-serif TrueType font.
const SYSTEM_FONTS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static LABEL_FONT_LOADED: OnceCell<bool> = OnceCell::new();

/// Registers the font used for the labels, once per process.
///
/// Only the first call looks up a font: the `font_path` of later calls is ignored
/// and the first outcome is returned. Returns false if no font could be loaded,
/// in which case the chart is drawn without any text.
pub fn ensure_label_font(font_path: Option<&str>) -> bool {
    if let (Some(loaded), Some(p)) = (LABEL_FONT_LOADED.get(), font_path) {
        warn!(
            "ensure_label_font: the label font is already set up, ignoring {}",
            p
        );
        return *loaded;
    }
    *LABEL_FONT_LOADED.get_or_init(|| {
        let candidates: Vec<&str> = font_path
            .into_iter()
            .chain(SYSTEM_FONTS.iter().cloned())
            .collect();
        for p in candidates {
            match fs::read(p) {
                Ok(bytes) => {
                    let leaked: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                    if register_font(LABEL_FONT, FontStyle::Normal, leaked).is_ok() {
                        info!("Using font {} for the chart labels", p);
                        return true;
                    }
                    warn!("ensure_label_font: {} is not a usable font", p);
                }
                Err(e) => {
                    debug!("ensure_label_font: cannot read {}: {:?}", p, e);
                }
            }
        }
        warn!("No font found, the chart will be drawn without labels");
        false
    })
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RadarError {
    RadarError::Drawing {
        message: e.to_string(),
    }
}

/// Draws the radar chart of the series and returns it as a PNG picture.
pub fn render_png(series: &ChartSeries, with_labels: bool) -> RadarResult<Vec<u8>> {
    ensure!(!series.is_empty(), NothingToChartSnafu {});
    let (w, h) = CHART_SIZE;
    let mut buf: Vec<u8> = vec![255; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_radar(&root, series, with_labels)?;
        root.present().map_err(drawing_err)?;
    }
    let mut out: Vec<u8> = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&buf, w, h, ColorType::Rgb8)
        .context(EncodingPngSnafu {})?;
    debug!("render_png: {} bytes", out.len());
    Ok(out)
}

// Polar to pixel coordinates. The angle 0 points to the right and the angles grow
// counterclockwise.
fn to_pixel(center: (i32, i32), radius: f64, angle: f64, percentage: f64) -> (i32, i32) {
    let r = radius * percentage / 100.0;
    (
        center.0 + (r * angle.cos()).round() as i32,
        center.1 - (r * angle.sin()).round() as i32,
    )
}

pub fn draw_radar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
    with_labels: bool,
) -> RadarResult<()> {
    root.fill(&WHITE).map_err(drawing_err)?;
    let (w, h) = root.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    // Leave room for the category labels around the plot.
    let radius = (w.min(h) as f64) * 0.38;
    let grid = BLACK.mix(0.2).stroke_width(1);
    let label_font = (LABEL_FONT, 12).into_font();

    for tick in RADIAL_TICKS.iter().filter(|t| **t > 0) {
        let r = (radius * (*tick as f64) / 100.0).round() as i32;
        root.draw(&Circle::new(center, r, grid))
            .map_err(drawing_err)?;
    }

    let n = series.num_categories();
    for idx in 0..n {
        let angle = series.angles[idx];
        let end = to_pixel(center, radius, angle, 100.0);
        root.draw(&PathElement::new(vec![center, end], grid))
            .map_err(drawing_err)?;
        if with_labels {
            let anchor = Pos::new(
                match angle.cos() {
                    c if c > 0.3 => HPos::Left,
                    c if c < -0.3 => HPos::Right,
                    _ => HPos::Center,
                },
                VPos::Center,
            );
            let pos = to_pixel(center, radius + 14.0, angle, 100.0);
            let style = TextStyle::from(label_font.clone()).pos(anchor);
            root.draw(&Text::new(series.labels[idx].clone(), pos, style))
                .map_err(drawing_err)?;
        }
    }

    if with_labels {
        for tick in RADIAL_TICKS.iter() {
            let r = (radius * (*tick as f64) / 100.0).round() as i32;
            let tick_color = BLACK.mix(0.6);
            let style = TextStyle::from(label_font.clone()).color(&tick_color);
            root.draw(&Text::new(
                format!("{}", tick),
                (center.0 + 3, center.1 - r - 7),
                style,
            ))
            .map_err(drawing_err)?;
        }
    }

    let points: Vec<(i32, i32)> = series
        .angles
        .iter()
        .zip(series.percentages.iter())
        .map(|(a, p)| to_pixel(center, radius, *a, *p))
        .collect();
    // Fewer than three axes do not make an area.
    if n >= 3 {
        root.draw(&Polygon::new(points.clone(), BLUE.mix(0.25).filled()))
            .map_err(drawing_err)?;
    }
    root.draw(&PathElement::new(points, BLUE.stroke_width(2)))
        .map_err(drawing_err)?;
    Ok(())
}
