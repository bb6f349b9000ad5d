//! Heartbeat job: confirm the CRM GraphQL endpoint is alive.
//!
//! Queries the `hello` liveness field and appends one status line per run.
//! Intended cadence: every 5 minutes.

use std::io;
use std::path::Path;

use serde_json::Value;

use crate::client::{ClientError, GraphqlClient};
use crate::logfile;

const QUERY: &str = "{ hello }";

/// Timestamp format shared with the low-stock job's log lines.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y-%H:%M:%S";

/// Render the status line for one heartbeat check.
fn status_line(timestamp: &str, outcome: &Result<Value, ClientError>) -> String {
    match outcome {
        Ok(data) if data.get("hello").and_then(Value::as_str).is_some() => {
            format!("{timestamp} CRM is alive - GraphQL OK")
        }
        Ok(_) => format!("{timestamp} CRM is alive - GraphQL returned unexpected payload"),
        Err(err) => format!("{timestamp} CRM is alive - GraphQL check failed: {err}"),
    }
}

/// Run the heartbeat check and append its status line.
///
/// Endpoint failures are folded into the logged line; only a log-write
/// failure is propagated.
///
/// # Errors
///
/// Returns `io::Error` if the log file cannot be written.
pub async fn run(client: &GraphqlClient, log_path: &Path) -> io::Result<()> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let outcome = client.execute(QUERY).await;
    let line = status_line(&timestamp, &outcome);

    tracing::info!(%line, "heartbeat");
    logfile::append_lines(log_path, &[line])
}
