//! Low-stock job: invoke the restock mutation and log the outcome.
//!
//! Intended cadence: every 12 hours.

use std::io;
use std::path::Path;

use serde_json::Value;

use crate::client::{ClientError, GraphqlClient};
use crate::heartbeat::TIMESTAMP_FORMAT;
use crate::logfile;

const MUTATION: &str = "mutation { updateLowStockProducts { success message updatedProducts { name stock } } }";

/// Render the log lines for one restock invocation.
fn outcome_lines(timestamp: &str, outcome: &Result<Value, ClientError>) -> Vec<String> {
    let data = match outcome {
        Ok(data) => data,
        Err(err) => return vec![format!("{timestamp} Low stock update failed: {err}")],
    };

    let Some(payload) = data.get("updateLowStockProducts") else {
        return vec![format!("{timestamp} Low stock update returned no payload")];
    };

    let updated = payload
        .get("updatedProducts")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if updated.is_empty() {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return vec![format!("{timestamp} Low stock update completed: {message}")];
    }

    let mut lines = vec![format!("{timestamp} Restocked {} products", updated.len())];
    for product in updated {
        let name = product.get("name").and_then(Value::as_str).unwrap_or("?");
        let stock = product.get("stock").and_then(Value::as_i64).unwrap_or(0);
        lines.push(format!(" - {name}: {stock}"));
    }

    lines
}

/// Run the restock mutation and append the outcome lines.
///
/// # Errors
///
/// Returns `io::Error` if the log file cannot be written.
pub async fn run(client: &GraphqlClient, log_path: &Path) -> io::Result<()> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let outcome = client.execute(MUTATION).await;
    let lines = outcome_lines(&timestamp, &outcome);

    tracing::info!(lines = lines.len(), "low-stock update logged");
    logfile::append_lines(log_path, &lines)
}
