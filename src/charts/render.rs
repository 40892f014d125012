//! SVG rendering of chart specs with Plotters.
//!
//! Everything here is presentation: the specs arrive fully computed, and
//! the renderer only picks bounds, colors, and glyphs. Rendering into a
//! `String` keeps one code path for both file artifacts and the dashboard
//! responses.

use plotters::element::Pie;
use plotters::prelude::*;

use crate::charts::spec::{ChartSpec, LineChart, PieChart, ScatterChart};
use crate::error::AppError;

/// High-contrast series palette, cycled in series order.
const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Render a chart spec as an SVG document of the given pixel size.
pub fn render_svg(chart: &ChartSpec, width: u32, height: u32) -> Result<String, AppError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match chart {
            ChartSpec::Line(c) => draw_line_chart(&root, c)?,
            ChartSpec::Scatter(c) => draw_scatter_chart(&root, c)?,
            ChartSpec::Pie(c) => draw_pie_chart(&root, c)?,
        }

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn draw_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::render(format!("Chart rendering failed: {e}"))
}

fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &LineChart,
) -> Result<(), AppError>
where
    DB::ErrorType: 'static,
{
    let points = chart.series.iter().flat_map(|s| s.points.iter().map(|&(x, y)| (x, y)));
    let ((x0, x1), (y0, y1)) = bounds(points);

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 22))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .light_line_style(&RGBColor(230, 230, 230))
        .x_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(draw_err)?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let style = color.stroke_width(2);
        let anno = if series.dashed {
            ctx.draw_series(DashedLineSeries::new(series.points.iter().copied(), 6, 4, style))
                .map_err(draw_err)?
        } else {
            ctx.draw_series(LineSeries::new(series.points.iter().copied(), style))
                .map_err(draw_err)?
        };
        anno.label(&series.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
    }

    if chart.series.len() > 1 {
        ctx.configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.85))
            .draw()
            .map_err(draw_err)?;
    }

    Ok(())
}

fn draw_scatter_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &ScatterChart,
) -> Result<(), AppError>
where
    DB::ErrorType: 'static,
{
    let points = chart.series.iter().flat_map(|s| s.points.iter().map(|&(x, y, _)| (x, y)));
    let ((x0, x1), (y0, y1)) = bounds(points);

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 22))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .light_line_style(&RGBColor(230, 230, 230))
        .x_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(draw_err)?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        // Semi-transparent fill so overlapping bubbles stay readable.
        let style = color.mix(0.5).filled();
        ctx.draw_series(
            series
                .points
                .iter()
                .map(|&(x, y, r)| Circle::new((x, y), r.round() as i32, style)),
        )
        .map_err(draw_err)?
        .label(&series.label)
        .legend(move |(x, y)| Circle::new((x + 8, y), 4, color.filled()));
    }

    if chart.series.len() > 1 {
        ctx.configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.85))
            .draw()
            .map_err(draw_err)?;
    }

    Ok(())
}

fn draw_pie_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &PieChart,
) -> Result<(), AppError>
where
    DB::ErrorType: 'static,
{
    let title_style = TextStyle::from(("sans-serif", 22).into_font()).color(&BLACK);
    let area = root.titled(&chart.title, title_style).map_err(draw_err)?;

    let total: f64 = chart.slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        // Degenerate dataset: nothing to slice, keep the artifact valid.
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            "no data",
            (w as i32 / 2 - 30, h as i32 / 2),
            ("sans-serif", 18),
        ))
        .map_err(draw_err)?;
        return Ok(());
    }

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;

    let sizes: Vec<f64> = chart.slices.iter().map(|s| s.value).collect();
    let labels: Vec<String> = chart.slices.iter().map(|s| s.label.clone()).collect();
    let colors: Vec<RGBColor> = (0..chart.slices.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 16).into_font());
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    area.draw(&pie).map_err(draw_err)?;

    Ok(())
}

/// Padded data bounds; falls back to a unit box so that empty series render
/// as an empty chart rather than an error.
fn bounds(points: impl Iterator<Item = (f64, f64)>) -> ((f64, f64), (f64, f64)) {
    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;
    for (x, y) in points {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
        return ((0.0, 1.0), (0.0, 1.0));
    }
    (pad_range(x0, x1), pad_range(y0, y1))
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::{LineSeries, PieSlice};

    #[test]
    fn renders_line_chart_svg() {
        let chart = ChartSpec::Line(LineChart {
            title: "Yearly Automobile Sales Trend".to_string(),
            x_label: "Year".to_string(),
            y_label: "Sales".to_string(),
            series: vec![LineSeries {
                label: "Total".to_string(),
                dashed: false,
                points: vec![(2000.0, 10.0), (2001.0, 12.0)],
            }],
        });
        let svg = render_svg(&chart, 640, 480).unwrap();
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
        assert!(svg.contains("Yearly Automobile Sales Trend"));
    }

    #[test]
    fn renders_empty_series_without_error() {
        let chart = ChartSpec::Line(LineChart {
            title: "empty".to_string(),
            x_label: "Year".to_string(),
            y_label: "Sales".to_string(),
            series: vec![],
        });
        assert!(render_svg(&chart, 320, 240).is_ok());
    }

    #[test]
    fn renders_zero_total_pie_without_error() {
        let chart = ChartSpec::Pie(PieChart {
            title: "ads".to_string(),
            slices: vec![PieSlice { label: "Recession".to_string(), value: 0.0 }],
        });
        assert!(render_svg(&chart, 320, 240).is_ok());
    }

    #[test]
    fn pad_range_handles_single_value() {
        assert_eq!(pad_range(5.0, 5.0), (4.5, 5.5));
    }
}
