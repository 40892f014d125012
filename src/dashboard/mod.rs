//! Interactive dashboard: one page, one dropdown, two chart panes.
//!
//! The serving loop is deliberately synchronous and single-threaded: each
//! request blocks on one aggregation-and-render cycle against the immutable
//! dataset, so there is no shared mutable state and nothing to cancel. The
//! only compute path is `select_vehicle`, the dropdown-selection state
//! transition; the HTTP layer parses the query and ships SVG bytes.

pub mod html;

use tiny_http::{Header, Method, Response, Server};
use tracing::{debug, info, warn};

use crate::charts::{catalog, render, spec::ChartSpec};
use crate::domain::{SalesDataset, ServeConfig};
use crate::error::AppError;

/// Dashboard chart dimensions in pixels.
const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 450;

/// The two chart specs produced by one selection event. A new update fully
/// replaces the previous pair; nothing is merged.
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    /// Yearly sales for the selection, segmented by the recession flag.
    pub recession_chart: ChartSpec,
    /// Unsegmented yearly sales trend for the selection.
    pub yearly_chart: ChartSpec,
}

/// The dashboard's single state transition: selection-changed(vehicle_type).
///
/// A selection with no matching rows produces charts over empty series,
/// which render as empty panes rather than failing.
pub fn select_vehicle(dataset: &SalesDataset, vehicle_type: &str) -> DashboardUpdate {
    DashboardUpdate {
        recession_chart: catalog::dashboard_recession(dataset, vehicle_type),
        yearly_chart: catalog::dashboard_yearly(dataset, vehicle_type),
    }
}

/// Run the dashboard server until the process is terminated.
pub fn serve(dataset: &SalesDataset, config: &ServeConfig) -> Result<(), AppError> {
    let vehicle_types = dataset.vehicle_types();
    let default_vehicle = vehicle_types
        .first()
        .cloned()
        .ok_or_else(|| AppError::new(3, "Cannot serve a dashboard over an empty dataset."))?;

    let addr = format!("{}:{}", config.addr, config.port);
    let server = Server::http(addr.as_str())
        .map_err(|e| AppError::render(format!("Failed to bind dashboard server on {addr}: {e}")))?;
    info!(%addr, rows = dataset.len(), "dashboard listening");

    // Last selection, kept only so a page reload re-opens on the same
    // vehicle type. Chart data is recomputed per request from the dataset.
    let mut selected = default_vehicle;

    loop {
        let request = server
            .recv()
            .map_err(|e| AppError::render(format!("Dashboard server failed: {e}")))?;

        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(%method, %url, "request");

        if method != Method::Get {
            respond(request, Response::from_string("method not allowed").with_status_code(405));
            continue;
        }

        let (path, query) = split_query(&url);
        match path {
            "/" => {
                if let Some(vehicle) = query_vehicle(query) {
                    selected = vehicle;
                }
                let page = html::render_page(&vehicle_types, &selected);
                respond(request, html_response(page));
            }
            "/chart/recession" | "/chart/yearly" => {
                let vehicle = query_vehicle(query).unwrap_or_else(|| selected.clone());
                if !vehicle_types.iter().any(|vt| vt == &vehicle) {
                    warn!(%vehicle, "selection matches no rows");
                }
                selected = vehicle.clone();

                let update = select_vehicle(dataset, &vehicle);
                let chart = if path == "/chart/recession" {
                    &update.recession_chart
                } else {
                    &update.yearly_chart
                };
                match render::render_svg(chart, CHART_WIDTH, CHART_HEIGHT) {
                    Ok(svg) => respond(request, svg_response(svg)),
                    Err(e) => {
                        warn!(error = %e, "chart render failed");
                        respond(request, Response::from_string("render error").with_status_code(500));
                    }
                }
            }
            _ => {
                respond(request, Response::from_string("not found").with_status_code(404));
            }
        }
    }
}

fn respond<R: std::io::Read>(request: tiny_http::Request, response: Response<R>) {
    if let Err(e) = request.respond(response) {
        // The client hung up; nothing to recover.
        debug!(error = %e, "failed to send response");
    }
}

fn html_response(body: String) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_header(content_type("text/html; charset=utf-8"))
}

fn svg_response(body: String) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_header(content_type("image/svg+xml"))
}

fn content_type(value: &str) -> Header {
    // Static known-good header values; constructing them cannot fail.
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).expect("valid header")
}

fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Extract the `vehicle` parameter from a query string.
fn query_vehicle(query: Option<&str>) -> Option<String> {
    let query = query?;
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == "vehicle" {
                return Some(html::urldecode(value));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::ChartSpec;
    use crate::domain::SalesRecord;

    fn record(year: i32, vehicle_type: &str, recession: bool, sales: f64) -> SalesRecord {
        SalesRecord {
            year,
            month: 1,
            vehicle_type: vehicle_type.to_string(),
            recession,
            automobile_sales: sales,
            gdp: 0.0,
            advertising_expenditure: 0.0,
            unemployment_rate: 0.0,
            seasonality_weight: 0.0,
            price: 0.0,
        }
    }

    fn dataset() -> SalesDataset {
        SalesDataset::new(vec![
            record(2000, "Sports", false, 10.0),
            record(2000, "Sports", true, 4.0),
            record(2000, "Sedan", false, 7.0),
            record(2001, "Sedan", false, 9.0),
        ])
    }

    fn yearly_points(update: &DashboardUpdate) -> Vec<(f64, f64)> {
        let ChartSpec::Line(chart) = &update.yearly_chart else {
            panic!("expected a line chart");
        };
        chart.series[0].points.clone()
    }

    #[test]
    fn selection_change_replaces_chart_data() {
        let ds = dataset();
        let first = select_vehicle(&ds, "Sports");
        let second = select_vehicle(&ds, "Sedan");

        assert_eq!(yearly_points(&first), vec![(2000.0, 14.0)]);
        // Fully replaced: no Sports data leaks into the Sedan update.
        assert_eq!(yearly_points(&second), vec![(2000.0, 7.0), (2001.0, 9.0)]);
    }

    #[test]
    fn unknown_selection_is_degenerate_not_an_error() {
        let update = select_vehicle(&dataset(), "Truck");
        assert!(yearly_points(&update).is_empty());
    }

    #[test]
    fn query_vehicle_parses_and_decodes() {
        assert_eq!(query_vehicle(Some("vehicle=Sports%20Car")), Some("Sports Car".to_string()));
        assert_eq!(query_vehicle(Some("other=1")), None);
        assert_eq!(query_vehicle(None), None);
    }

    #[test]
    fn split_query_separates_path() {
        assert_eq!(split_query("/chart/yearly?vehicle=Sedan"), ("/chart/yearly", Some("vehicle=Sedan")));
        assert_eq!(split_query("/"), ("/", None));
    }
}
