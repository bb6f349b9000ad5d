//! Weekly report job: aggregate customer and order counts plus revenue.
//!
//! Intended cadence: weekly.

use std::io;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::{ClientError, GraphqlClient};
use crate::logfile;

const QUERY: &str = "{ customers { id } orders { id totalAmount } }";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Aggregated report numbers.
#[derive(Debug, PartialEq, Eq)]
struct ReportTotals {
    customers: usize,
    orders: usize,
    revenue: Decimal,
}

/// Sum customers, orders, and revenue out of the report query data.
///
/// Totals arrive as the Decimal scalar's string form; unparseable or
/// missing totals count as zero rather than poisoning the whole report.
fn summarize(data: &Value) -> ReportTotals {
    let customers = data
        .get("customers")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let orders = data
        .get("orders")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let revenue = orders
        .iter()
        .filter_map(|order| order.get("totalAmount"))
        .filter_map(|total| match total {
            Value::String(s) => Decimal::from_str(s).ok(),
            Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
            _ => None,
        })
        .sum();

    ReportTotals {
        customers,
        orders: orders.len(),
        revenue,
    }
}

/// Render the report line for one run.
fn report_line(timestamp: &str, outcome: &Result<Value, ClientError>) -> String {
    match outcome {
        Ok(data) => {
            let totals = summarize(data);
            format!(
                "{timestamp} - Report: {} customers, {} orders, {} revenue",
                totals.customers, totals.orders, totals.revenue
            )
        }
        Err(err) => format!("{timestamp} - Report generation failed: {err}"),
    }
}

/// Run the report aggregation and append its line.
///
/// # Errors
///
/// Returns `io::Error` if the log file cannot be written.
pub async fn run(client: &GraphqlClient, log_path: &Path) -> io::Result<()> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let outcome = client.execute(QUERY).await;
    let line = report_line(&timestamp, &outcome);

    tracing::info!(%line, "report generated");
    logfile::append_lines(log_path, &[line])
}
