//! The chart catalog: one builder per chart, plus the dashboard pair.
//!
//! Builders only run aggregations and shape the results into `ChartSpec`s;
//! none of them touch a drawing backend. Each static chart maps to one
//! named output artifact.

use crate::agg::{group_agg2, group_sum, AggregateOp, SummaryTable};
use crate::charts::spec::{
    ChartSpec, LineChart, LineSeries, PieChart, PieSlice, ScatterChart, ScatterSeries,
};
use crate::domain::{ChartConfig, SalesDataset, SalesRecord};

/// Fixed marker radius (pixels) for plain scatter charts.
const SCATTER_RADIUS: f64 = 3.0;

/// The full static chart set, in artifact order.
pub fn static_set(dataset: &SalesDataset, config: &ChartConfig) -> Vec<(&'static str, ChartSpec)> {
    vec![
        ("yearly_sales.svg", yearly_sales(dataset)),
        ("vehicle_type_trends.svg", vehicle_type_trends(dataset)),
        ("recession_comparison.svg", recession_comparison(dataset)),
        ("gdp_trend.svg", gdp_trend(dataset)),
        ("seasonality_bubble.svg", seasonality_bubble(dataset, config.bubble_scale)),
        ("price_vs_sales.svg", price_vs_sales(dataset)),
        ("ad_expenditure_share.svg", ad_expenditure_share(dataset)),
        ("ad_share_by_vehicle.svg", ad_share_by_vehicle(dataset)),
        ("unemployment_trend.svg", unemployment_trend(dataset)),
    ]
}

fn table_to_points(table: &SummaryTable<i32>) -> Vec<(f64, f64)> {
    table.iter().map(|(&year, &v)| (f64::from(year), v)).collect()
}

fn recession_label(recession: bool) -> &'static str {
    if recession {
        "Recession"
    } else {
        "Non-Recession"
    }
}

/// Chart 1: total automobile sales per year.
pub fn yearly_sales(dataset: &SalesDataset) -> ChartSpec {
    let table = group_sum(dataset.records(), |r| r.year, |r| r.automobile_sales);
    ChartSpec::Line(LineChart {
        title: "Yearly Automobile Sales Trend".to_string(),
        x_label: "Year".to_string(),
        y_label: "Total Automobile Sales".to_string(),
        series: vec![LineSeries {
            label: "Total sales".to_string(),
            dashed: false,
            points: table_to_points(&table),
        }],
    })
}

/// Chart 2: per vehicle type, yearly sales split into a recession (solid)
/// and a non-recession (dashed) series.
pub fn vehicle_type_trends(dataset: &SalesDataset) -> ChartSpec {
    let mut series = Vec::new();
    for vehicle_type in dataset.vehicle_types() {
        let split = group_agg2(
            dataset.by_vehicle_type(&vehicle_type),
            |r| r.recession,
            |r| r.year,
            |r| r.automobile_sales,
            AggregateOp::Sum,
        );
        for recession in [true, false] {
            // Missing (year, recession) combinations stay absent; the line
            // simply skips those years.
            let Some(by_year) = split.get(&recession) else { continue };
            series.push(LineSeries {
                label: format!("{vehicle_type} ({})", recession_label(recession)),
                dashed: !recession,
                points: table_to_points(by_year),
            });
        }
    }
    ChartSpec::Line(LineChart {
        title: "Sales Trends by Vehicle Type during Recession/Non-Recession".to_string(),
        x_label: "Year".to_string(),
        y_label: "Automobile Sales".to_string(),
        series,
    })
}

/// Chart 3: yearly sales with the recession flag as a hue dimension.
pub fn recession_comparison(dataset: &SalesDataset) -> ChartSpec {
    ChartSpec::Line(recession_hue_trend(
        dataset.records(),
        |r| r.automobile_sales,
        AggregateOp::Mean,
        "Sales Trends: Recession vs Non-Recession",
        "Automobile Sales",
    ))
}

/// Chart 4: mean GDP per year, recession as hue.
pub fn gdp_trend(dataset: &SalesDataset) -> ChartSpec {
    ChartSpec::Line(recession_hue_trend(
        dataset.records(),
        |r| r.gdp,
        AggregateOp::Mean,
        "GDP Variations: Recession vs Non-Recession",
        "GDP",
    ))
}

fn recession_hue_trend<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
    value: impl Fn(&SalesRecord) -> f64,
    op: AggregateOp,
    title: &str,
    y_label: &str,
) -> LineChart {
    let split = group_agg2(rows, |r| r.recession, |r| r.year, value, op);
    let series = [false, true]
        .iter()
        .filter_map(|&recession| {
            let by_year = split.get(&recession)?;
            Some(LineSeries {
                label: recession_label(recession).to_string(),
                dashed: false,
                points: table_to_points(by_year),
            })
        })
        .collect();
    LineChart {
        title: title.to_string(),
        x_label: "Year".to_string(),
        y_label: y_label.to_string(),
        series,
    }
}

/// Chart 5: seasonality bubble chart, one point per row.
///
/// `bubble_scale` multiplies `Seasonality_Weight` into a marker *area*; the
/// radius is its square root so that size grows linearly with the weight.
pub fn seasonality_bubble(dataset: &SalesDataset, bubble_scale: f64) -> ChartSpec {
    let points = dataset
        .records()
        .iter()
        .map(|r| {
            let radius = (r.seasonality_weight.max(0.0) * bubble_scale).sqrt().max(1.0);
            (f64::from(r.month), r.automobile_sales, radius)
        })
        .collect();
    ChartSpec::Scatter(ScatterChart {
        title: "Seasonality Impact on Automobile Sales".to_string(),
        x_label: "Month".to_string(),
        y_label: "Automobile Sales".to_string(),
        series: vec![ScatterSeries {
            label: "Monthly sales".to_string(),
            points,
        }],
    })
}

/// Chart 6: price vs sales, colored by recession flag.
pub fn price_vs_sales(dataset: &SalesDataset) -> ChartSpec {
    let series = [false, true]
        .iter()
        .map(|&recession| ScatterSeries {
            label: recession_label(recession).to_string(),
            points: dataset
                .records()
                .iter()
                .filter(|r| r.recession == recession)
                .map(|r| (r.price, r.automobile_sales, SCATTER_RADIUS))
                .collect(),
        })
        .collect();
    ChartSpec::Scatter(ScatterChart {
        title: "Price vs Sales during Recession".to_string(),
        x_label: "Price".to_string(),
        y_label: "Automobile Sales".to_string(),
        series,
    })
}

/// Chart 7: advertising expenditure share, recession vs non-recession.
pub fn ad_expenditure_share(dataset: &SalesDataset) -> ChartSpec {
    let table = group_sum(dataset.records(), |r| r.recession, |r| r.advertising_expenditure);
    let slices = [false, true]
        .iter()
        .map(|&recession| PieSlice {
            label: recession_label(recession).to_string(),
            value: table.get(&recession).copied().unwrap_or(0.0),
        })
        .collect();
    ChartSpec::Pie(PieChart {
        title: "Advertising Expenditure during Recession/Non-Recession".to_string(),
        slices,
    })
}

/// Chart 8: advertising expenditure share per vehicle type, recession
/// periods only.
pub fn ad_share_by_vehicle(dataset: &SalesDataset) -> ChartSpec {
    let recession_rows = dataset.records().iter().filter(|r| r.recession);
    let table = group_sum(recession_rows, |r| r.vehicle_type.clone(), |r| r.advertising_expenditure);
    let slices = table
        .into_iter()
        .map(|(vehicle_type, value)| PieSlice { label: vehicle_type, value })
        .collect();
    ChartSpec::Pie(PieChart {
        title: "Advertising Expenditure by Vehicle Type during Recession".to_string(),
        slices,
    })
}

/// Chart 9: mean unemployment rate per year, one series per
/// (vehicle type, recession) combination.
pub fn unemployment_trend(dataset: &SalesDataset) -> ChartSpec {
    let mut series = Vec::new();
    for vehicle_type in dataset.vehicle_types() {
        let split = group_agg2(
            dataset.by_vehicle_type(&vehicle_type),
            |r| r.recession,
            |r| r.year,
            |r| r.unemployment_rate,
            AggregateOp::Mean,
        );
        for recession in [false, true] {
            let Some(by_year) = split.get(&recession) else { continue };
            series.push(LineSeries {
                label: format!("{vehicle_type} ({})", recession_label(recession)),
                dashed: recession,
                points: table_to_points(by_year),
            });
        }
    }
    ChartSpec::Line(LineChart {
        title: "Unemployment Rate Effect on Sales".to_string(),
        x_label: "Year".to_string(),
        y_label: "Unemployment Rate".to_string(),
        series,
    })
}

/// Dashboard pane 1: yearly sales for one vehicle type, segmented by the
/// recession flag.
pub fn dashboard_recession(dataset: &SalesDataset, vehicle_type: &str) -> ChartSpec {
    let chart = recession_hue_trend(
        dataset.by_vehicle_type(vehicle_type),
        |r| r.automobile_sales,
        AggregateOp::Sum,
        &format!("Sales Trend for {vehicle_type} during Recession/Non-Recession"),
        "Automobile Sales",
    );
    ChartSpec::Line(chart)
}

/// Dashboard pane 2: unsegmented yearly sales trend for one vehicle type.
pub fn dashboard_yearly(dataset: &SalesDataset, vehicle_type: &str) -> ChartSpec {
    let table = group_sum(dataset.by_vehicle_type(vehicle_type), |r| r.year, |r| r.automobile_sales);
    ChartSpec::Line(LineChart {
        title: format!("Yearly Sales Trend for {vehicle_type}"),
        x_label: "Year".to_string(),
        y_label: "Automobile Sales".to_string(),
        series: vec![LineSeries {
            label: vehicle_type.to_string(),
            dashed: false,
            points: table_to_points(&table),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32, vehicle_type: &str, recession: bool, sales: f64, ads: f64) -> SalesRecord {
        SalesRecord {
            year,
            month,
            vehicle_type: vehicle_type.to_string(),
            recession,
            automobile_sales: sales,
            gdp: 1000.0,
            advertising_expenditure: ads,
            unemployment_rate: 5.0,
            seasonality_weight: 1.0,
            price: 20_000.0,
        }
    }

    fn dataset() -> SalesDataset {
        SalesDataset::new(vec![
            record(2000, 1, "Sports", false, 10.0, 300.0),
            record(2000, 2, "Sports", true, 5.0, 100.0),
            record(2000, 3, "Sedan", true, 7.0, 200.0),
            record(2001, 1, "Sports", false, 8.0, 400.0),
        ])
    }

    #[test]
    fn static_set_has_nine_distinct_artifacts() {
        let ds = dataset();
        let config = ChartConfig {
            data_path: "unused.csv".into(),
            out_dir: "unused".into(),
            bubble_scale: 100.0,
            width: 800,
            height: 600,
        };
        let set = static_set(&ds, &config);
        assert_eq!(set.len(), 9);
        let mut names: Vec<&str> = set.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 9, "artifact names must be distinct");
    }

    #[test]
    fn yearly_sales_sums_per_year() {
        let ChartSpec::Line(chart) = yearly_sales(&dataset()) else {
            panic!("expected a line chart");
        };
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points, vec![(2000.0, 22.0), (2001.0, 8.0)]);
    }

    #[test]
    fn ad_share_slices_cover_all_expenditure() {
        let ChartSpec::Pie(pie) = ad_expenditure_share(&dataset()) else {
            panic!("expected a pie chart");
        };
        assert_eq!(pie.slices.len(), 2);
        let total: f64 = pie.slices.iter().map(|s| s.value).sum();
        assert!((total - 1000.0).abs() < 1e-9);
        assert!((pie.shares().iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn dashboard_yearly_filters_to_selection() {
        let ChartSpec::Line(chart) = dashboard_yearly(&dataset(), "Sedan") else {
            panic!("expected a line chart");
        };
        assert_eq!(chart.series[0].points, vec![(2000.0, 7.0)]);
    }

    #[test]
    fn dashboard_unknown_vehicle_yields_empty_series() {
        let ChartSpec::Line(chart) = dashboard_yearly(&dataset(), "Truck") else {
            panic!("expected a line chart");
        };
        assert!(chart.series[0].points.is_empty());

        let ChartSpec::Line(chart) = dashboard_recession(&dataset(), "Truck") else {
            panic!("expected a line chart");
        };
        assert!(chart.series.is_empty());
    }

    #[test]
    fn bubble_radius_scales_with_weight() {
        let ds = SalesDataset::new(vec![
            record(2000, 1, "Sports", false, 10.0, 0.0),
            {
                let mut r = record(2000, 2, "Sports", false, 10.0, 0.0);
                r.seasonality_weight = 4.0;
                r
            },
        ]);
        let ChartSpec::Scatter(chart) = seasonality_bubble(&ds, 100.0) else {
            panic!("expected a scatter chart");
        };
        let radii: Vec<f64> = chart.series[0].points.iter().map(|p| p.2).collect();
        assert!((radii[0] - 10.0).abs() < 1e-9);
        assert!((radii[1] - 20.0).abs() < 1e-9);
    }
}
