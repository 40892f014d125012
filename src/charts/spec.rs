//! Render-only chart descriptions.
//!
//! A chart spec is intentionally data-driven: all series and values are
//! computed by the catalog before rendering. This keeps the Plotters code
//! focused on drawing and makes the data prep testable on its own.

/// One drawable chart.
#[derive(Debug, Clone)]
pub enum ChartSpec {
    Line(LineChart),
    Scatter(ScatterChart),
    Pie(PieChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(c) => &c.title,
            ChartSpec::Scatter(c) => &c.title,
            ChartSpec::Pie(c) => &c.title,
        }
    }
}

/// Multi-series line chart.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone)]
pub struct LineSeries {
    pub label: String,
    /// Dashed stroke; used to contrast non-recession against recession
    /// series within one chart.
    pub dashed: bool,
    /// `(x, y)` points, ascending by x.
    pub points: Vec<(f64, f64)>,
}

/// Scatter chart; bubble charts are scatter charts with per-point radii.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub label: String,
    /// `(x, y, marker radius in pixels)`.
    pub points: Vec<(f64, f64, f64)>,
}

/// Pie chart over a small number of labeled slices.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

impl PieChart {
    /// Slice shares in percent, in slice order. Sums to 100 (within
    /// floating-point tolerance) whenever the total is non-zero.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.slices.iter().map(|s| s.value).sum();
        if total == 0.0 {
            return vec![0.0; self.slices.len()];
        }
        self.slices.iter().map(|s| 100.0 * s.value / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_shares_sum_to_hundred() {
        let pie = PieChart {
            title: "ads".to_string(),
            slices: vec![
                PieSlice { label: "a".to_string(), value: 3.0 },
                PieSlice { label: "b".to_string(), value: 1.0 },
            ],
        };
        let shares = pie.shares();
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!((shares[0] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn pie_shares_zero_total_is_all_zero() {
        let pie = PieChart {
            title: "ads".to_string(),
            slices: vec![PieSlice { label: "a".to_string(), value: 0.0 }],
        };
        assert_eq!(pie.shares(), vec![0.0]);
    }
}
